//! Gleaner: parallel find-and-copy over a directory tree.
//!
//! A single scout thread walks the tree and publishes directories; a pool
//! of matcher workers scans each directory's immediate children for files
//! whose name contains a pattern and ends with an extension; a pool of
//! transfer workers copies the matches into a destination directory. The
//! stages share nothing but two [`queue::TrackedQueue`] instances — a
//! bounded queue that counts live producers, so consumers can tell
//! "empty for now" from "finished" without a shutdown message.

pub mod engine;
pub mod pipeline;
pub mod queue;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use std::path::Path;

/// Result alias used by public gleaner API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: copy every file under `root` whose name contains
/// `opts.pattern` and ends with `opts.extension` into `dest`, and return
/// the run's [`Report`].
///
/// Spawns `1 + opts.matchers + opts.transfers` threads and blocks until
/// the pipeline drains. Files directly under `root` are not scanned; only
/// directories below it are. For cancellation, use
/// [`pipeline::start_pipeline`] directly and trip the handles' cancel
/// switch.
pub fn glean_dir(root: &Path, dest: &Path, opts: &Opts) -> Result<Report> {
    let ctx = pipeline::PipelineContext::new(root, dest, opts)?;
    pipeline::run_pipeline(&ctx)
}
