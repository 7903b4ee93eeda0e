//! Load `.splitarc.toml` from the source directory (CLI only). Lib callers
//! inject config via PlanOpts instead.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Deserialize)]
pub(crate) struct SplitarcToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    name: Option<String>,
    format: Option<String>,
    max_size: Option<u64>,
    compress: Option<bool>,
    order: Option<String>,
    detail: Option<u8>,
    pad_width: Option<usize>,
    archiver: Option<String>,
    manifest: Option<String>,
    follow_links: Option<bool>,
    exclude: Option<Vec<String>>,
    verbose: Option<bool>,
    strict: Option<bool>,
}

/// Load `.splitarc.toml` from `dir` if present. Returns None if the file is
/// missing or malformed (malformed logs a warning). CLI only.
pub(crate) fn load_splitarc_toml(dir: &Path) -> Option<SplitarcToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {e}", path.display()))
        .ok()
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $opts_field:ident) => {
        if let Some(v) = $idx.$idx_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call
/// before applying CLI values. Unparseable enum values log a warning and
/// are ignored. The password never comes from this file.
pub(crate) fn apply_file_to_opts(file: &SplitarcToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref name) = s.name {
        opts.naming_convention = name.clone();
    }
    if let Some(ref fmt) = s.format {
        match fmt.parse() {
            Ok(v) => opts.format = v,
            Err(e) => log::warn!("settings.format: {e}"),
        }
    }
    if let Some(ref order) = s.order {
        match order.parse() {
            Ok(v) => opts.policy = v,
            Err(e) => log::warn!("settings.order: {e}"),
        }
    }
    apply_file_opt!(s, opts, max_size => max_batch_size);
    apply_file_opt!(s, opts, compress => compress);
    apply_file_opt!(s, opts, detail => detail_level);
    apply_file_opt!(s, opts, pad_width => pad_width);
    if let Some(ref p) = s.archiver {
        opts.archiver = Some(PathBuf::from(p));
    }
    if let Some(ref p) = s.manifest {
        opts.manifest_path = Some(PathBuf::from(p));
    }
    apply_file_opt!(s, opts, follow_links => follow_links);
    if let Some(ref v) = s.exclude {
        opts.exclude = v.clone();
    }
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, strict => strict);
}
