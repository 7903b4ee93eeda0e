//! Public and internal types for the splitarc API and pipeline.

use std::path::PathBuf;
use std::str::FromStr;

/// One regular file found by the enumerator. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// File size in bytes at enumeration time.
    pub size: u64,
}

/// One archive's worth of files, formed by the packer and consumed by the
/// stager, the archive driver, and the manifest writer.
///
/// Invariants: `id` is sequential starting at 1, `members` is never empty,
/// and `total_size` equals the sum of the member sizes.
#[derive(Clone, Debug)]
pub struct Batch {
    pub id: u64,
    pub members: Vec<FileEntry>,
    pub total_size: u64,
}

/// How the packer orders files when filling a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PackingPolicy {
    /// Fill batches in discovery order; stop a batch at the first file that
    /// does not fit, even if a later file would.
    #[default]
    PreserveOrder,
    /// Sort descending by size, then greedily fill each batch as close to
    /// the ceiling as the scan allows. Discovery order is not preserved.
    ArrangeBySize,
}

impl FromStr for PackingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" | "arrange_default" => Ok(PackingPolicy::PreserveOrder),
            "fitsize" | "arrange_fitsize" => Ok(PackingPolicy::ArrangeBySize),
            _ => Err(format!(
                "unknown packing order '{s}' (expected 'preserve' or 'fitsize')"
            )),
        }
    }
}

/// Container format passed to the external archiver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArchiveFormat {
    #[default]
    SevenZ,
    Zip,
}

impl ArchiveFormat {
    /// The `-t` type argument understood by 7-Zip.
    pub fn type_arg(&self) -> &'static str {
        match self {
            ArchiveFormat::SevenZ => "-t7z",
            ArchiveFormat::Zip => "-tzip",
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7z" => Ok(ArchiveFormat::SevenZ),
            "zip" => Ok(ArchiveFormat::Zip),
            _ => Err(format!("unknown archive format '{s}' (expected '7z' or 'zip')")),
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveFormat::SevenZ => write!(f, "7z"),
            ArchiveFormat::Zip => write!(f, "zip"),
        }
    }
}

/// One staged batch member: its path relative to the enumeration root and
/// its size. Produced by the stager, consumed by the manifest writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedMember {
    pub rel_path: PathBuf,
    pub size: u64,
}

/// Totals reported after a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunSummary {
    /// Files found by the enumerator.
    pub total_files: usize,
    /// Sum of all enumerated file sizes in bytes.
    pub total_bytes: u64,
    /// Batches formed by the packer (including skipped ones).
    pub batch_count: usize,
    /// Archives actually driven through the external archiver.
    pub archives_created: usize,
}

/// Lib-only options for [`plan_dir`](crate::plan_dir). Only the fields that
/// matter when computing a packing plan (no output, no archiver).
#[derive(Clone, Debug)]
pub struct PlanOpts {
    /// Maximum aggregate batch size in bytes. Must be greater than zero.
    pub max_batch_size: u64,
    /// Batch-formation policy.
    pub policy: PackingPolicy,
    /// Follow symbolic links during enumeration.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax, e.g. `node_modules`, `*.log`).
    pub exclude: Vec<String>,
    /// Strict mode: fail on the first walk error instead of skipping.
    pub strict: bool,
}

impl Default for PlanOpts {
    fn default() -> Self {
        Self {
            max_batch_size: crate::utils::config::PackerConsts::DEFAULT_MAX_BATCH_SIZE,
            policy: PackingPolicy::default(),
            follow_links: false,
            exclude: Vec::new(),
            strict: false,
        }
    }
}

impl From<&PlanOpts> for Opts {
    fn from(o: &PlanOpts) -> Self {
        Opts {
            max_batch_size: o.max_batch_size,
            policy: o.policy,
            follow_links: o.follow_links,
            exclude: o.exclude.clone(),
            strict: o.strict,
            summary_only: true,
            ..Opts::default()
        }
    }
}

/// Full options (CLI and orchestrator). Use [`PlanOpts`] for lib.
/// Immutable snapshot of all tunables for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Directory the archives and the manifest are written to.
    pub out_dir: PathBuf,
    /// Archive naming template; every `+ID_HERE+` is replaced with the
    /// zero-padded batch id.
    pub naming_convention: String,
    /// Minimum digit count for the substituted id (left-padded with zeros).
    pub pad_width: usize,
    /// Container format for the external archiver.
    pub format: ArchiveFormat,
    /// Archive password. None or empty means no password arguments.
    pub password: Option<String>,
    /// Maximum aggregate batch size in bytes. Must be greater than zero.
    pub max_batch_size: u64,
    /// Compress archive contents. When false the archiver stores only.
    pub compress: bool,
    /// Batch-formation policy.
    pub policy: PackingPolicy,
    /// First batch id to actually stage and drive (1-based). Batches below
    /// it are computed and recorded in the manifest but not archived.
    pub start_at: u64,
    /// Only produce the manifest; skip staging, copying, and the archiver.
    pub summary_only: bool,
    /// Manifest detail: 0 = member paths only, 1 = paths with sizes.
    pub detail_level: u8,
    /// Explicit archiver executable. When None, resolved from the
    /// environment and PATH.
    pub archiver: Option<PathBuf>,
    /// Manifest location. When None, `summary.txt` inside `out_dir`.
    pub manifest_path: Option<PathBuf>,
    /// Follow symbolic links during enumeration.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax).
    pub exclude: Vec<String>,
    /// Verbose output (progress bar, debug logging).
    pub verbose: bool,
    /// Strict mode: fail on the first walk error instead of skipping.
    pub strict: bool,
}

impl Default for Opts {
    fn default() -> Self {
        use crate::utils::config::PackerConsts;
        Self {
            out_dir: PathBuf::from("."),
            naming_convention: PackerConsts::DEFAULT_NAMING_CONVENTION.to_string(),
            pad_width: PackerConsts::DEFAULT_ID_PAD_WIDTH,
            format: ArchiveFormat::default(),
            password: None,
            max_batch_size: PackerConsts::DEFAULT_MAX_BATCH_SIZE,
            compress: false,
            policy: PackingPolicy::default(),
            start_at: 1,
            summary_only: false,
            detail_level: 1,
            archiver: None,
            manifest_path: None,
            follow_links: false,
            exclude: Vec::new(),
            verbose: false,
            strict: false,
        }
    }
}
