use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::DEFAULT_QUEUE_CAPACITY;

/// Parallel find-and-copy over a directory tree.
#[derive(Clone, Parser)]
#[command(name = "gleaner")]
#[command(
    about = "Copy every file under ROOT_DIR whose name contains PATTERN and ends with EXTENSION into DEST_DIR."
)]
pub struct Cli {
    /// Substring that must appear in a file's name.
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Suffix the file's name must end with (e.g. `.log`).
    #[arg(value_name = "EXTENSION")]
    pub extension: String,

    /// Root directory to search. Only directories below it are scanned.
    #[arg(value_name = "ROOT_DIR")]
    pub root: PathBuf,

    /// Destination directory for the copies. Created if missing.
    #[arg(value_name = "DEST_DIR")]
    pub dest: PathBuf,

    /// Number of matcher workers scanning directories.
    #[arg(value_name = "MATCHERS", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub matchers: usize,

    /// Number of transfer workers copying matched files.
    #[arg(value_name = "TRANSFERS", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub transfers: usize,

    /// Capacity of the directory and results queues.
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub queue_capacity: usize,

    /// Follow symbolic links during the walk.
    #[arg(long)]
    pub follow_links: bool,

    /// Verbose output with a copy progress counter.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
