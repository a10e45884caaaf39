use tokio::sync::mpsc;

use crate::domain::errors::Result;
use crate::domain::value_objects::{PipelineToken, PlaybackStrategy, ResolvedUrl, SurfaceId};

/// Notification from a running pipeline instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEventKind {
    /// First decoded frame or parsed manifest
    Ready,
    /// Recoverable hiccup the pipeline handles itself
    Warning(String),
    /// The pipeline cannot continue
    Fatal(String),
}

/// Pipeline notification tagged with the instance that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineEvent {
    pub token: PipelineToken,
    pub kind: PipelineEventKind,
}

impl PipelineEvent {
    pub fn ready(token: PipelineToken) -> Self {
        Self {
            token,
            kind: PipelineEventKind::Ready,
        }
    }

    pub fn warning(token: PipelineToken, reason: impl Into<String>) -> Self {
        Self {
            token,
            kind: PipelineEventKind::Warning(reason.into()),
        }
    }

    pub fn fatal(token: PipelineToken, reason: impl Into<String>) -> Self {
        Self {
            token,
            kind: PipelineEventKind::Fatal(reason.into()),
        }
    }
}

pub type PipelineEventSender = mpsc::UnboundedSender<PipelineEvent>;
pub type PipelineEventReceiver = mpsc::UnboundedReceiver<PipelineEvent>;

/// Everything a factory needs to build one pipeline instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub token: PipelineToken,
    pub strategy: PlaybackStrategy,
    pub url: ResolvedUrl,
    pub surface: SurfaceId,
}

/// Port for one live decoder/fetch instance bound to a display surface
pub trait MediaPipeline: Send {
    fn token(&self) -> &PipelineToken;

    /// Halt decoding, keeping the instance alive
    fn pause(&mut self) -> Result<()>;

    /// Resume decoding after a pause
    fn resume(&mut self) -> Result<()>;

    /// Stop in-flight fetches, detach listeners and release the surface.
    /// Returns only once the instance can no longer touch the surface.
    /// Must be safe to call more than once.
    fn teardown(&mut self);
}

/// Port for pipeline construction
///
/// `create` starts fetching immediately; progress is reported asynchronously
/// as [`PipelineEvent`]s carrying the request's token.
pub trait PipelineFactory: Send {
    fn create(&mut self, request: PipelineRequest) -> Result<Box<dyn MediaPipeline>>;
}
