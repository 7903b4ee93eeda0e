//! Application configuration constants.
//! Tuning and naming defaults in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived paths: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    scratch_dir_name: String,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                scratch_dir_name: format!("{pkg}_scratch"),
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Name of the staging directory created under the system temp dir.
    pub fn scratch_dir_name(&self) -> &str {
        &self.scratch_dir_name
    }

    /// Name of the optional per-directory config file.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Default manifest filename inside the output directory.
    pub fn manifest_filename(&self) -> &'static str {
        "summary.txt"
    }
}

// ---- Packing ----

/// Packer defaults matching the historical tool.
pub struct PackerConsts;

impl PackerConsts {
    /// Default maximum aggregate batch size: 1 GiB.
    pub const DEFAULT_MAX_BATCH_SIZE: u64 = 1024 * 1024 * 1024;
    /// Token in the naming template replaced with the padded batch id.
    pub const ID_PLACEHOLDER: &'static str = "+ID_HERE+";
    /// Default naming template.
    pub const DEFAULT_NAMING_CONVENTION: &'static str = "+ID_HERE+.7z";
    /// Default minimum digit count for the substituted id.
    pub const DEFAULT_ID_PAD_WIDTH: usize = 4;
}

// ---- Progress / reporting cadence ----

/// How often the walk and the packing scan report progress.
pub struct ProgressConsts;

impl ProgressConsts {
    /// Log a file-count line every this many files during enumeration.
    pub const ENUM_REPORT_EVERY: usize = 50;
    /// Log a batch-fill line every this many files placed into a batch.
    pub const PLACE_LOG_EVERY: usize = 20;
}

// ---- External archiver ----

/// Executable names probed on PATH when no archiver is configured.
pub const ARCHIVER_CANDIDATES: &[&str] = &["7zz", "7za", "7z"];

/// Environment variable naming an archiver executable.
pub const ARCHIVER_ENV_KEY: &str = "SPLITARC_ARCHIVER";
