//! Public types for the gleaner API and pipeline.

use crate::pipeline::DEFAULT_QUEUE_CAPACITY;

/// Run options for [`glean_dir`](crate::glean_dir).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Substring that must appear in a file's name for it to match.
    pub pattern: String,
    /// Literal suffix the file's name must end with (e.g. `.log`).
    pub extension: String,
    /// Number of matcher workers scanning directories. Must be at least 1.
    pub matchers: usize,
    /// Number of transfer workers copying matched files. Must be at least 1.
    pub transfers: usize,
    /// Capacity of the directory and results queues.
    pub queue_capacity: usize,
    /// Follow symbolic links during the walk.
    pub follow_links: bool,
    /// Show a progress counter while copying.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            pattern: String::new(),
            extension: String::new(),
            matchers: 1,
            transfers: 1,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            follow_links: false,
            verbose: false,
        }
    }
}

/// Summary of one run, aggregated from per-thread counts when the
/// pipeline is joined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Directories the scout published.
    pub directories: usize,
    /// Files the matcher pool matched.
    pub matched: usize,
    /// Files copied into the destination.
    pub copied: usize,
    /// Files that failed to copy (logged, non-fatal).
    pub failed: usize,
}
