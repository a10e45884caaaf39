mod recording_observer;
mod simulated_pipeline;
mod static_capabilities;

pub use recording_observer::{NullMetrics, RecordingObserver};
pub use simulated_pipeline::{LedgerEntry, PipelineLedger, SimulatedPipelineFactory};
pub use static_capabilities::StaticCapabilities;
