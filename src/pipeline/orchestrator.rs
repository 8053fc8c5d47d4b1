//! Pipeline orchestration: queue creation, producer registration, spawn
//! and join order.

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::Report;
use crate::engine::progress::{create_counter, refresh_counter};
use crate::queue::{Producer, TrackedQueue};

use super::context::{CancelSwitch, PipelineContext, PipelineHandles};
use super::{matcher, scout, transfer};

/// Start all three stages: scout → directory queue → matcher pool →
/// results queue → transfer pool.
///
/// The scout's registration on the directory queue and every matcher's
/// registration on the results queue are created here, before the
/// corresponding threads spawn, so no consumer can observe either queue
/// producer-less before its producers exist.
pub fn start_pipeline(ctx: &PipelineContext) -> PipelineHandles {
    let dirs = Arc::new(TrackedQueue::new(ctx.queue_capacity));
    let results = Arc::new(TrackedQueue::new(ctx.queue_capacity));
    let cancel = Arc::new(CancelSwitch::new(&dirs, &results));

    let scout =
        scout::spawn_scout_thread(Producer::new(&dirs), ctx.root.clone(), ctx.follow_links);
    let matchers = matcher::spawn_matcher_workers(
        &dirs,
        &results,
        &ctx.pattern,
        &ctx.extension,
        ctx.matchers,
    );
    let counter = ctx.verbose.then(|| {
        let counter = create_counter("copying");
        refresh_counter(&counter);
        counter
    });
    let transfers = transfer::spawn_transfer_workers(&results, &ctx.dest, ctx.transfers, counter);

    debug!(
        "pipeline started: 1 scout, {} matchers, {} transfers, queue capacity {}",
        ctx.matchers, ctx.transfers, ctx.queue_capacity
    );

    PipelineHandles {
        scout,
        matchers,
        transfers,
        cancel,
    }
}

/// Join the pipeline in dependency order (scout, then matchers, then
/// transfers) and aggregate the per-thread counts into a [`Report`]. A
/// panicked worker surfaces as an error; a tripped cancel switch turns
/// the joined run into an "interrupted" error, with any partial copies
/// left on disk.
pub fn join_pipeline(handles: PipelineHandles) -> Result<Report> {
    let PipelineHandles {
        scout,
        matchers,
        transfers,
        cancel,
    } = handles;

    let directories = scout
        .join()
        .map_err(|_| anyhow::anyhow!("scout thread panicked"))?;
    let mut report = Report {
        directories,
        ..Report::default()
    };
    for handle in matchers {
        report.matched += handle
            .join()
            .map_err(|_| anyhow::anyhow!("matcher thread panicked"))?;
    }
    for handle in transfers {
        let (copied, failed) = handle
            .join()
            .map_err(|_| anyhow::anyhow!("transfer thread panicked"))?;
        report.copied += copied;
        report.failed += failed;
    }

    if cancel.is_tripped() {
        return Err(anyhow::anyhow!(
            "interrupted: {} of {} matched files were copied",
            report.copied,
            report.matched
        ));
    }
    debug!(
        "pipeline done: {} directories, {} matched, {} copied, {} failed",
        report.directories, report.matched, report.copied, report.failed
    );
    Ok(report)
}

/// Run the whole pipeline to completion. Library path with no signal
/// handling; the CLI wires Ctrl-C around [`start_pipeline`] itself.
pub fn run_pipeline(ctx: &PipelineContext) -> Result<Report> {
    join_pipeline(start_pipeline(ctx))
}
