pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-exports for convenience
pub use application::services::{GridOrchestrator, GridTile, ReconcileSummary};
pub use config::Config;
pub use domain::entities::{
    AppConfig, CameraList, CameraUpdate, NewCamera, SessionLifecycle, StateTransition,
    StreamSession, Theme,
};
pub use domain::errors::{ConfigError, DomainError, Result, SessionError};
pub use domain::ports::{
    ConfigStore, MediaPipeline, MetricsReporter, PipelineEvent, PipelineEventKind,
    PipelineFactory, PlaybackCapabilities, SessionObserver,
};
pub use domain::services::{StrategySelector, StreamUrlResolver};
pub use domain::value_objects::{
    Camera, CameraId, GridLayout, PlaybackStrategy, ProxyConfig, ResolvedUrl, SessionState,
    StreamType,
};
