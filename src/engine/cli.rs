//! CLI command handler: validate arguments, run the pipeline, report.

use anyhow::{Context, Result};
use log::info;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::pipeline::{PipelineContext, join_pipeline, start_pipeline};
use crate::utils::setup_logging;

fn setup_opts(cli: &Cli) -> Opts {
    setup_logging(cli.verbose);
    Opts {
        pattern: cli.pattern.clone(),
        extension: cli.extension.clone(),
        matchers: cli.matchers,
        transfers: cli.transfers,
        queue_capacity: cli.queue_capacity,
        follow_links: cli.follow_links,
        verbose: cli.verbose,
    }
}

/// Run a search-and-copy from the parsed command line. Installs the
/// process Ctrl-C handler: an interrupt trips the cancel switch, blocked
/// workers drain out, and the run exits with an "interrupted" error.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli);
    let ctx = PipelineContext::new(&cli.root, &cli.dest, &opts)?;

    let handles = start_pipeline(&ctx);
    let cancel = handles.cancel_switch();
    ctrlc::set_handler(move || cancel.trip()).context("set Ctrl+C handler")?;

    let report = join_pipeline(handles)?;
    info!(
        "{} directories scanned, {} files matched, {} copied, {} failed",
        report.directories, report.matched, report.copied, report.failed
    );
    Ok(())
}
