//! Transfer pool: copies matched files into the destination directory.

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::progress::{ProgressCounter, update_counter};
use crate::engine::tools::dest_path_for;
use crate::queue::TrackedQueue;

/// Spawn the transfer workers. They consume the results queue and produce
/// nothing downstream, so they carry no producer registration. `counter`
/// is the shared copy counter shown in verbose mode.
pub fn spawn_transfer_workers(
    results: &Arc<TrackedQueue<PathBuf>>,
    dest: &Path,
    num_workers: usize,
    counter: Option<ProgressCounter>,
) -> Vec<JoinHandle<(usize, usize)>> {
    (0..num_workers)
        .map(|_| {
            let results = Arc::clone(results);
            let dest = dest.to_path_buf();
            let counter = counter.clone();
            thread::spawn(move || transfer_worker_loop(&results, &dest, counter.as_ref()))
        })
        .collect()
}

/// Single transfer worker: pop file paths until end of stream and copy
/// each into `dest` under its base name. A failed copy is logged and
/// counted, never fatal to the worker. Returns `(copied, failed)`.
fn transfer_worker_loop(
    results: &TrackedQueue<PathBuf>,
    dest: &Path,
    counter: Option<&ProgressCounter>,
) -> (usize, usize) {
    let mut copied = 0_usize;
    let mut failed = 0_usize;
    while let Some(source) = results.pop() {
        match copy_into(&source, dest) {
            Ok(()) => {
                copied += 1;
                if let Some(counter) = counter {
                    update_counter(counter, 1);
                }
            }
            Err(err) => {
                warn!("transfer: {:#}", err);
                failed += 1;
            }
        }
    }
    (copied, failed)
}

/// Copy `source` into `dest` under the same base name. Two sources with
/// the same base name overwrite each other, last write wins.
fn copy_into(source: &Path, dest: &Path) -> Result<()> {
    let target = dest_path_for(dest, source)
        .with_context(|| format!("source {} has no file name", source.display()))?;
    fs::copy(source, &target)
        .with_context(|| format!("copy {} -> {}", source.display(), target.display()))?;
    Ok(())
}
