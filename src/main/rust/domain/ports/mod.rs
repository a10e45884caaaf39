mod config_store;
mod media_pipeline;
mod metrics_reporter;
mod playback_capabilities;
mod session_observer;

pub use config_store::ConfigStore;
pub use media_pipeline::{
    MediaPipeline, PipelineEvent, PipelineEventKind, PipelineEventReceiver, PipelineEventSender,
    PipelineFactory, PipelineRequest,
};
pub use metrics_reporter::MetricsReporter;
pub use playback_capabilities::PlaybackCapabilities;
pub use session_observer::SessionObserver;
