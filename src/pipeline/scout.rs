//! Scout: single walk thread that publishes directories for the matcher
//! pool.

use log::warn;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use walkdir::WalkDir;

use crate::queue::Producer;

/// Spawn the scout thread. `dirs` must already hold the scout's producer
/// registration (create it with `Producer::new` before calling), so no
/// matcher can observe the directory queue producer-less first.
pub fn spawn_scout_thread(
    dirs: Producer<PathBuf>,
    root: PathBuf,
    follow_links: bool,
) -> JoinHandle<usize> {
    thread::spawn(move || run_scout_loop(&dirs, &root, follow_links))
}

/// Walk `root` depth-first and push every directory below it. The root
/// itself is not published, so files directly under the root are never
/// matched. Entries that cannot be read are logged and skipped. Returns
/// the number of directories published; the producer registration is
/// released when `dirs` drops, even on an early exit.
pub fn run_scout_loop(dirs: &Producer<PathBuf>, root: &Path, follow_links: bool) -> usize {
    let mut count = 0_usize;
    for entry in WalkDir::new(root).min_depth(1).follow_links(follow_links) {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {
                if dirs.push(entry.into_path()).is_err() {
                    // Stopped: the run was cancelled.
                    break;
                }
                count += 1;
            }
            Ok(_) => {}
            Err(err) => warn!("scout: skipping unreadable entry: {}", err),
        }
    }
    count
}
