//! Pipeline context and handles: per-run data shared with worker threads
//! and the join-side bundle the orchestrator hands back.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::Opts;
use crate::queue::TrackedQueue;

/// Per-run configuration for the pipeline, validated at construction.
pub struct PipelineContext {
    pub root: PathBuf,
    pub dest: PathBuf,
    pub pattern: String,
    pub extension: String,
    pub matchers: usize,
    pub transfers: usize,
    pub queue_capacity: usize,
    pub follow_links: bool,
    pub verbose: bool,
}

impl PipelineContext {
    /// Build a context from run options. Fails when `root` is not a
    /// directory or `dest` cannot be created; creating `dest` here keeps
    /// the transfer workers free of setup work (the creation is
    /// idempotent, existing directories pass).
    pub fn new(root: &Path, dest: &Path, opts: &Opts) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("invalid root directory: {}", root.display());
        }
        if opts.matchers == 0 || opts.transfers == 0 {
            // A pool of zero workers would leave the upstream queue with
            // consumers that never come: the scout would block forever.
            anyhow::bail!("matcher and transfer worker counts must be at least 1");
        }
        if opts.queue_capacity == 0 {
            anyhow::bail!("queue capacity must be at least 1");
        }
        std::fs::create_dir_all(dest)
            .with_context(|| format!("create destination directory {}", dest.display()))?;
        Ok(PipelineContext {
            root: root.to_path_buf(),
            dest: dest.to_path_buf(),
            pattern: opts.pattern.clone(),
            extension: opts.extension.clone(),
            matchers: opts.matchers,
            transfers: opts.transfers,
            queue_capacity: opts.queue_capacity,
            follow_links: opts.follow_links,
            verbose: opts.verbose,
        })
    }
}

/// Cooperative cancel switch: trips a shared flag and stops both queues
/// so threads blocked in a queue wait exit promptly. Producer
/// registrations are released by the workers' own guards as they unwind.
pub struct CancelSwitch {
    requested: AtomicBool,
    dirs: Arc<TrackedQueue<PathBuf>>,
    results: Arc<TrackedQueue<PathBuf>>,
}

impl CancelSwitch {
    pub(crate) fn new(
        dirs: &Arc<TrackedQueue<PathBuf>>,
        results: &Arc<TrackedQueue<PathBuf>>,
    ) -> Self {
        CancelSwitch {
            requested: AtomicBool::new(false),
            dirs: Arc::clone(dirs),
            results: Arc::clone(results),
        }
    }

    /// Request cancellation. Idempotent; safe to call from a signal
    /// handler thread.
    pub fn trip(&self) {
        self.requested.store(true, Ordering::Relaxed);
        self.dirs.stop();
        self.results.stop();
    }

    pub fn is_tripped(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Handles returned by [`start_pipeline`](super::start_pipeline): join the
/// threads in dependency order via
/// [`join_pipeline`](super::join_pipeline), or trip the cancel switch to
/// abort the run.
pub struct PipelineHandles {
    pub scout: JoinHandle<usize>,
    pub matchers: Vec<JoinHandle<usize>>,
    pub transfers: Vec<JoinHandle<(usize, usize)>>,
    pub cancel: Arc<CancelSwitch>,
}

impl PipelineHandles {
    /// Shared cancel switch for this run (e.g. to trip from a Ctrl-C
    /// handler).
    pub fn cancel_switch(&self) -> Arc<CancelSwitch> {
        Arc::clone(&self.cancel)
    }
}
