//! Splitarc: split a directory tree into size-capped archive batches.
//!
//! The enumerator walks the tree, the packer partitions the files into
//! batches whose aggregate size stays under a ceiling, and each batch is
//! staged and driven through an external 7-Zip-compatible archiver while a
//! human-readable manifest records every batch.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::path::Path;

/// Result alias used by public splitarc API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Compute the packing plan for `root` without touching the filesystem
/// beyond the walk: enumerate, then partition into batches under
/// `opts.max_batch_size` with `opts.policy`.
///
/// The plan is a pure, deterministic function of the enumerated set, the
/// policy, and the ceiling; it is recomputed from scratch on every run and
/// never persisted. Use the CLI (or [`pipeline::run_split`]) to actually
/// stage batches and produce archives.
pub fn plan_dir(root: &Path, opts: &PlanOpts) -> Result<Vec<Batch>> {
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let root = root.canonicalize()?;
    let entries = pipeline::enumerate_files(&root, &opts, None, None)?;
    Ok(engine::pack(entries, opts.max_batch_size, opts.policy))
}
