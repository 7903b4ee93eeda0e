//! Recursive file enumeration: walk the root and produce (path, size)
//! entries for every regular file.

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;
use walkdir::WalkDir;

use crate::engine::tools::should_include_in_walk;
use crate::utils::config::ProgressConsts;
use crate::{FileEntry, Opts};

/// Enumerate every regular file under `root`. Directories are never
/// emitted. Traversal order is filesystem-enumeration order and is not
/// stable across runs or platforms; only the packer's explicit policies
/// may depend on order.
///
/// A failed size query for one file logs a warning and skips that file;
/// walk errors (e.g. permission denied) do the same unless `opts.strict`
/// is set, in which case the first error aborts enumeration.
///
/// `manifest_path` and `scratch` are excluded from the walk by canonical
/// path when they fall under the root.
pub fn enumerate_files(
    root: &Path,
    opts: &Opts,
    manifest_path: Option<&Path>,
    scratch: Option<&Path>,
) -> Result<Vec<FileEntry>> {
    let manifest_canonical = manifest_path.and_then(|p| p.canonicalize().ok());
    let scratch_canonical = scratch.and_then(|p| p.canonicalize().ok());

    let mut entries = Vec::new();
    for result in WalkDir::new(root).follow_links(opts.follow_links) {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let meta = entry.metadata();
                let path = entry.into_path();
                if !should_include_in_walk(
                    &path,
                    root,
                    &manifest_canonical,
                    &scratch_canonical,
                    &opts.exclude,
                ) {
                    continue;
                }
                match meta {
                    Ok(meta) => {
                        entries.push(FileEntry {
                            path,
                            size: meta.len(),
                        });
                        if entries.len() % ProgressConsts::ENUM_REPORT_EVERY == 0 {
                            debug!("{} files found", entries.len());
                        }
                    }
                    Err(e) => {
                        warn!("getting file size of {} failed: {e}", path.display());
                    }
                }
            }
            Err(err) => {
                if opts.strict {
                    return Err(anyhow::anyhow!(
                        "strict mode: {err} (path: {:?})",
                        err.path()
                    ));
                }
                warn!("permission denied or error accessing path: {err}");
            }
        }
    }
    Ok(entries)
}
