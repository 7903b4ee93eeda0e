use clap::Parser;
use std::path::PathBuf;

use crate::{ArchiveFormat, PackingPolicy};

fn parse_format(s: &str) -> Result<ArchiveFormat, String> {
    s.parse()
}

fn parse_policy(s: &str) -> Result<PackingPolicy, String> {
    s.parse()
}

/// Split a directory tree into size-capped archives via an external
/// 7-Zip-compatible archiver.
#[derive(Clone, Parser)]
#[command(name = "splitarc")]
#[command(about = "Archive a directory as a series of size-capped containers; use --summary-only to plan without archiving.")]
pub struct Cli {
    /// Directory whose subtree is archived.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Output directory for the archives and the manifest.
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    /// Archive naming template; `+ID_HERE+` is replaced with the padded
    /// batch id. Default: `+ID_HERE+.7z`.
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Archive format: `7z` or `zip`.
    #[arg(long, short = 't', value_parser = parse_format)]
    pub format: Option<ArchiveFormat>,

    /// Archive password. Prefer --ask-password to keep it out of the shell
    /// history.
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Read the password from SPLITARC_PASSWORD, .env in DIR, or an
    /// interactive prompt.
    #[arg(long)]
    pub ask_password: bool,

    /// Maximum aggregate size of one archive, in bytes.
    #[arg(long, short = 's', value_parser = clap::value_parser!(u64))]
    pub max_size: Option<u64>,

    /// Compress archive contents (slower). Off by default: files are only
    /// stored.
    #[arg(long, short = 'c', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub compress: Option<bool>,

    /// Packing order: `preserve` (discovery order) or `fitsize` (fewest
    /// archives).
    #[arg(long, short = 'o', value_parser = parse_policy)]
    pub order: Option<PackingPolicy>,

    /// Archive number to start at (1-based); earlier archives are planned
    /// and recorded but not created. Useful to resume a long run.
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub start_at: Option<u64>,

    /// Only write the manifest; no staging, copying, or archiver calls.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub summary_only: Option<bool>,

    /// Manifest detail: 0 = member paths only, 1 = paths with sizes.
    #[arg(long, value_parser = clap::value_parser!(u8))]
    pub detail: Option<u8>,

    /// Minimum digit count for the substituted archive id.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub pad_width: Option<usize>,

    /// Path or name of the 7-Zip-compatible executable. Default: the
    /// SPLITARC_ARCHIVER environment variable, then 7zz/7za/7z on PATH.
    #[arg(long)]
    pub archiver: Option<PathBuf>,

    /// Manifest location. Default: `summary.txt` in OUT.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e pattern1 pattern2 pattern3
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Strict mode: fail on the first walk error instead of skipping.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Verbose output (progress bar, debug logging).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
