//! Matcher pool: scans directories from the scout for files matching the
//! configured name pattern and extension.

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::tools::file_name_matches;
use crate::queue::{Producer, TrackedQueue};

/// Spawn the matcher workers. Each worker's producer registration on the
/// results queue is created here, before its thread starts, so the
/// transfer pool can never observe the results queue producer-less while
/// matchers are still coming up.
pub fn spawn_matcher_workers(
    dirs: &Arc<TrackedQueue<PathBuf>>,
    results: &Arc<TrackedQueue<PathBuf>>,
    pattern: &str,
    extension: &str,
    num_workers: usize,
) -> Vec<JoinHandle<usize>> {
    (0..num_workers)
        .map(|_| {
            let dirs = Arc::clone(dirs);
            let results = Producer::new(results);
            let pattern = pattern.to_string();
            let extension = extension.to_string();
            thread::spawn(move || matcher_worker_loop(&dirs, &results, &pattern, &extension))
        })
        .collect()
}

/// Single matcher worker: pop directories until end of stream, scan each
/// one's immediate children, push matches. Returns the number of files
/// this worker matched; its producer registration is released when
/// `results` drops.
fn matcher_worker_loop(
    dirs: &TrackedQueue<PathBuf>,
    results: &Producer<PathBuf>,
    pattern: &str,
    extension: &str,
) -> usize {
    let mut matched = 0_usize;
    while let Some(dir) = dirs.pop() {
        matched += scan_directory(&dir, results, pattern, extension);
    }
    matched
}

/// List the immediate children of `dir` (never recursing; subdirectories
/// arrive from the scout as their own items) and push every regular file
/// whose name matches. Unreadable directories and entries are logged and
/// skipped.
fn scan_directory(
    dir: &Path,
    results: &Producer<PathBuf>,
    pattern: &str,
    extension: &str,
) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("matcher: cannot list {}: {}", dir.display(), err);
            return 0;
        }
    };
    let mut matched = 0_usize;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("matcher: skipping entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name = entry.file_name();
        if file_name_matches(&name.to_string_lossy(), pattern, extension) {
            if results.push(entry.path()).is_err() {
                // Stopped: the next pop returns None and the worker exits.
                break;
            }
            matched += 1;
        }
    }
    matched
}
