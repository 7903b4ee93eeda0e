//! The sequential run loop: enumerate, pack, and per batch stage, record,
//! and drive the external archiver.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::engine::driver::{build_archiver_args, resolve_archiver, run_archiver};
use crate::engine::packer::{next_batch, sort_for_policy};
use crate::engine::progress::{create_progress_bar, update_progress_bar};
use crate::engine::tools::{format_size, render_archive_name};
use crate::pipeline::manifest::ManifestWriter;
use crate::pipeline::stage::{clear_scratch, scratch_dir, stage_batch};
use crate::pipeline::walk::enumerate_files;
use crate::utils::config::PackagePaths;
use crate::{Opts, RunSummary};

fn manifest_path_for(opts: &Opts) -> PathBuf {
    opts.manifest_path
        .clone()
        .unwrap_or_else(|| opts.out_dir.join(PackagePaths::get().manifest_filename()))
}

/// Install a Ctrl+C handler that requests a stop at the next between-batch
/// point. The current batch always completes, so the manifest stays
/// consistent with the archives on disk.
fn install_stop_handler() -> Result<Arc<AtomicBool>> {
    let stop_requested = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop_requested);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;
    Ok(stop_requested)
}

/// Run the whole pipeline: enumerate `root`, partition into size-bounded
/// batches, and for each batch stage it, record it in the manifest, and
/// drive the archiver. Strictly sequential; each batch completes before
/// the next packing scan starts.
pub fn run_split(root: &Path, opts: &Opts) -> Result<RunSummary> {
    let root = root
        .canonicalize()
        .with_context(|| format!("canonicalize source directory {}", root.display()))?;
    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("create output directory {}", opts.out_dir.display()))?;

    // Configuration-fatal when unresolvable: fail before any batch work.
    // Summary-only runs never invoke the archiver, so they skip this.
    let archiver = if opts.summary_only {
        None
    } else {
        Some(resolve_archiver(opts.archiver.as_deref())?)
    };

    let manifest_path = manifest_path_for(opts);
    let scratch = scratch_dir();

    let mut entries = enumerate_files(&root, opts, Some(&manifest_path), Some(&scratch))?;
    let total_files = entries.len();
    let total_bytes: u64 = entries.iter().map(|e| e.size).sum();
    info!(
        "Total files found: {total_files} ({})",
        format_size(total_bytes)
    );

    sort_for_policy(&mut entries, opts.policy);

    let mut manifest = ManifestWriter::create(&manifest_path, opts.detail_level)?;
    let stop_requested = install_stop_handler()?;
    let mut bar = opts
        .verbose
        .then(|| create_progress_bar(total_files, "Packing"));

    let mut remaining = entries;
    let mut summary = RunSummary {
        total_files,
        total_bytes,
        ..RunSummary::default()
    };
    let mut id = 0_u64;
    while let Some(batch) = next_batch(&mut remaining, opts.max_batch_size, opts.policy, id + 1) {
        id = batch.id;
        summary.batch_count += 1;

        let skip = batch.id < opts.start_at;
        let do_archive = !opts.summary_only && !skip;
        let archive_name = render_archive_name(&opts.naming_convention, batch.id, opts.pad_width);
        let archive_path = opts.out_dir.join(&archive_name);

        if do_archive {
            clear_scratch(&scratch)?;
        }
        let staged = stage_batch(&batch, &root, &scratch, do_archive);
        manifest.record_batch(&archive_path.display().to_string(), &staged)?;

        if do_archive && let Some(archiver) = archiver.as_deref() {
            info!(
                "Finished preparation for {archive_name}. Size: {}",
                format_size(batch.total_size)
            );
            let args = build_archiver_args(opts, &archive_path, &scratch);
            run_archiver(archiver, &args);
            summary.archives_created += 1;
            info!("Finished creating archive #{}", batch.id);
        } else if skip {
            debug!("Skipping archive #{} (starting at {})", batch.id, opts.start_at);
        }

        if let Some(bar) = bar.as_mut() {
            update_progress_bar(bar, batch.members.len());
        }
        if stop_requested.load(Ordering::Relaxed) {
            warn!("Stop requested; halting after archive #{}", batch.id);
            break;
        }
    }

    manifest.finish()?;
    info!("All done archiving!");
    Ok(summary)
}
