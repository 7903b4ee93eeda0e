//! Progress bar helpers for the packing loop.
//!
//! The pipeline is single-threaded, so the bar is owned and updated
//! directly (no shared handles).

use kdam::{Animation, Bar, BarExt};

/// Create a progress bar over a known file total.
pub fn create_progress_bar(total: usize, desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " files"
    )
}

/// Advance the bar by `n` files.
pub fn update_progress_bar(pb: &mut Bar, n: usize) {
    let _ = pb.update(n);
}
