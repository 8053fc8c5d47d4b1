//! Progress counter for the transfer pool.

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

/// Shared handle to the copy counter.
pub type ProgressCounter = Arc<Mutex<Bar>>;

/// Create a counter-style bar for an unknown total (shows a running
/// count, no percentage).
pub fn create_counter(desc: &'static str) -> ProgressCounter {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Force a refresh so the counter shows "0 files" immediately.
pub fn refresh_counter(pb: &ProgressCounter) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.refresh();
    }
}

/// Tick the counter by `n` without blocking the calling worker: a
/// contended lock skips the update and the display catches up on the
/// next tick.
pub fn update_counter(pb: &ProgressCounter, n: usize) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.update(n);
    }
}
