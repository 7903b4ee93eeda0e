//! Batch formation: greedy size-bounded packing under two ordering policies.

use log::{debug, warn};

use crate::engine::tools::format_size;
use crate::utils::config::ProgressConsts;
use crate::{Batch, FileEntry, PackingPolicy};

/// Order entries for the given policy. ArrangeBySize sorts descending by
/// size (stable, so ties keep source order); PreserveOrder leaves the
/// discovery order untouched.
pub fn sort_for_policy(entries: &mut [FileEntry], policy: PackingPolicy) {
    if policy == PackingPolicy::ArrangeBySize {
        entries.sort_by(|a, b| b.size.cmp(&a.size));
    }
}

/// A candidate is admitted when it keeps the running total strictly below
/// the ceiling, or when it is the first candidate considered for the batch.
/// The first-item exception guarantees every batch takes at least one entry,
/// so packing always terminates.
fn admits(size: u64, running_total: u64, max_size: u64, first: bool) -> bool {
    first || size + running_total < max_size
}

/// An oversized file still gets its own batch rather than being skipped.
fn warn_if_oversized(entry: &FileEntry, max_size: u64) {
    if entry.size > max_size {
        warn!(
            "{} ({}) was added to its own archive, although it is greater than the maximum archive size",
            entry.path.display(),
            format_size(entry.size)
        );
    }
}

fn log_fill_progress(placed: usize, id: u64, running_total: u64) {
    if placed > 0 && placed % ProgressConsts::PLACE_LOG_EVERY == 0 {
        debug!(
            "{placed} files in archive list of archive #{id}. Current archive size: {}",
            format_size(running_total)
        );
    }
}

/// Take the leading run of entries that fit, in discovery order. Stops at
/// the first entry that fails the admission rule; later entries are never
/// considered out of order, even if they would fit.
fn fill_preserve_order(remaining: &mut Vec<FileEntry>, max_size: u64, id: u64) -> (Vec<FileEntry>, u64) {
    let mut total = 0_u64;
    let mut taken = 0_usize;
    for (i, entry) in remaining.iter().enumerate() {
        if !admits(entry.size, total, max_size, i == 0) {
            break;
        }
        if i == 0 {
            warn_if_oversized(entry, max_size);
        }
        total += entry.size;
        taken += 1;
        log_fill_progress(taken, id, total);
    }
    // Bulk removal of the admitted run after the scan.
    let members: Vec<FileEntry> = remaining.drain(..taken).collect();
    (members, total)
}

/// Scan the whole (size-sorted) remaining list once, admitting everything
/// that still fits. Rejected entries keep their order in the new remaining
/// list, so the next batch sees them in the same sorted sequence.
fn fill_arrange_by_size(remaining: &mut Vec<FileEntry>, max_size: u64, id: u64) -> (Vec<FileEntry>, u64) {
    let mut members: Vec<FileEntry> = Vec::new();
    let mut rest: Vec<FileEntry> = Vec::with_capacity(remaining.len());
    let mut total = 0_u64;
    for (i, entry) in remaining.drain(..).enumerate() {
        if admits(entry.size, total, max_size, i == 0) {
            if i == 0 {
                warn_if_oversized(&entry, max_size);
            }
            total += entry.size;
            members.push(entry);
            log_fill_progress(members.len(), id, total);
        } else {
            rest.push(entry);
        }
    }
    *remaining = rest;
    (members, total)
}

/// Form the next batch with the given sequential id, draining the admitted
/// entries from `remaining`. Returns None when nothing is left.
///
/// `remaining` must already be ordered for the policy (see
/// [`sort_for_policy`]); this function never reorders it.
pub fn next_batch(
    remaining: &mut Vec<FileEntry>,
    max_size: u64,
    policy: PackingPolicy,
    id: u64,
) -> Option<Batch> {
    if remaining.is_empty() {
        return None;
    }
    let (members, total_size) = match policy {
        PackingPolicy::PreserveOrder => fill_preserve_order(remaining, max_size, id),
        PackingPolicy::ArrangeBySize => fill_arrange_by_size(remaining, max_size, id),
    };
    // The first-item exception makes an empty batch impossible while
    // entries remain; hitting this is a defect, not a runtime condition.
    debug_assert!(!members.is_empty(), "packer formed an empty batch");
    Some(Batch {
        id,
        members,
        total_size,
    })
}

/// Pack all entries into batches with sequential ids from 1. Pure: the
/// result depends only on the entries, the ceiling, and the policy.
pub fn pack(mut entries: Vec<FileEntry>, max_size: u64, policy: PackingPolicy) -> Vec<Batch> {
    sort_for_policy(&mut entries, policy);
    let mut batches = Vec::new();
    let mut id = 0_u64;
    while let Some(batch) = next_batch(&mut entries, max_size, policy, id + 1) {
        id = batch.id;
        batches.push(batch);
    }
    batches
}
