//! Staging: mirror a batch's relative directory structure into the scratch
//! area and copy its files there, ready for the external archiver.

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::tools::path_relative_to;
use crate::utils::config::PackagePaths;
use crate::{Batch, StagedMember};

/// The scratch directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(PackagePaths::get().scratch_dir_name())
}

/// Recursively delete the scratch directory and recreate it empty, so a
/// batch never sees leftover files from a previous one.
pub fn clear_scratch(scratch: &Path) -> Result<()> {
    if let Err(e) = fs::remove_dir_all(scratch)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        return Err(e).with_context(|| format!("clear scratch directory {}", scratch.display()));
    }
    fs::create_dir_all(scratch)
        .with_context(|| format!("create scratch directory {}", scratch.display()))
}

/// Relative path of one member under the enumeration root. A member that
/// is not under the root (e.g. reached through a followed symlink) falls
/// back to its bare file name so it still lands inside the scratch area.
fn member_rel_path(path: &Path, root: &Path) -> PathBuf {
    path_relative_to(path, root).unwrap_or_else(|| {
        PathBuf::from(path.file_name().unwrap_or(path.as_os_str()))
    })
}

/// Stage one batch: compute each member's path relative to `root`, mirror
/// that structure under `scratch`, and copy the file there. When `copy` is
/// false (summary-only runs and start-at-skipped batches) nothing touches
/// the filesystem, but the relative paths are still computed so the
/// manifest is accurate.
///
/// Per-member failures (directory creation, copy) are logged and do not
/// affect the remaining members; the member is still listed.
pub fn stage_batch(batch: &Batch, root: &Path, scratch: &Path, copy: bool) -> Vec<StagedMember> {
    let mut staged = Vec::with_capacity(batch.members.len());
    for member in &batch.members {
        let rel = member_rel_path(&member.path, root);
        if copy {
            copy_member(&member.path, &scratch.join(&rel));
        }
        staged.push(StagedMember {
            rel_path: rel,
            size: member.size,
        });
    }
    staged
}

fn copy_member(src: &Path, dest: &Path) {
    if let Some(parent) = dest.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        // create_dir_all succeeds on already-existing directories, so any
        // error here is a real failure.
        warn!("directory creation failed: {}: {e}", parent.display());
        return;
    }
    if let Err(e) = fs::copy(src, dest) {
        warn!("copying {} failed: {e}", src.display());
    }
}
