//! Pipeline components: context, scout, matcher pool, transfer pool,
//! orchestration.

pub mod context;
pub mod matcher;
pub mod orchestrator;
pub mod scout;
pub mod transfer;

pub use context::{CancelSwitch, PipelineContext, PipelineHandles};
pub use matcher::spawn_matcher_workers;
pub use orchestrator::{join_pipeline, run_pipeline, start_pipeline};
pub use scout::spawn_scout_thread;
pub use transfer::spawn_transfer_workers;

/// Default capacity for the directory and results queues. Small on
/// purpose: the queues coordinate the stages rather than buffer the whole
/// tree, and a full queue is what holds the scout back while the copiers
/// catch up.
pub const DEFAULT_QUEUE_CAPACITY: usize = 50;
