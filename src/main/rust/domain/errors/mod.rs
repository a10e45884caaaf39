use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Camera name cannot be empty")]
    EmptyCameraName,

    #[error("Camera URL cannot be empty")]
    EmptyCameraUrl,

    #[error("Camera not found: {0}")]
    CameraNotFound(String),

    #[error("Duplicate camera id: {0}")]
    DuplicateCameraId(String),

    #[error("Reorder must be a permutation of the current camera ids")]
    InvalidReorder,

    #[error("Invalid proxy URL: {0}")]
    InvalidProxyUrl(String),

    #[error("Invalid grid columns: {0} (expected 1-4)")]
    InvalidGridColumns(u8),

    #[error("Pipeline creation failed: {0}")]
    PipelineCreationFailed(String),

    #[error("Pipeline execution failed: {0}")]
    PipelineExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors raised while loading or saving viewer preferences
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration format: {0}")]
    InvalidImport(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors observed at the stream session boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Permanent capability gap, e.g. RTSP without a proxy
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// Recoverable hiccup absorbed by the pipeline
    #[error("Transient playback error: {0}")]
    TransientPlayback(String),

    /// The pipeline cannot recover on its own
    #[error("Fatal playback error: {0}")]
    FatalPlayback(String),

    /// Malformed camera record
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SessionError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FatalPlayback(_))
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::EmptyCameraName
            | DomainError::EmptyCameraUrl
            | DomainError::InvalidProxyUrl(_) => Self::Configuration(err.to_string()),
            _ => Self::FatalPlayback(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fatal_errors_are_retryable() {
        assert!(SessionError::FatalPlayback("decode".into()).is_retryable());
        assert!(!SessionError::TransientPlayback("stall".into()).is_retryable());
        assert!(!SessionError::UnsupportedSource("rtsp".into()).is_retryable());
        assert!(!SessionError::Configuration("empty url".into()).is_retryable());
    }

    #[test]
    fn test_pipeline_failures_map_to_fatal() {
        let err: SessionError = DomainError::PipelineCreationFailed("no sink".into()).into();
        assert!(matches!(err, SessionError::FatalPlayback(_)));

        let err: SessionError = DomainError::EmptyCameraUrl.into();
        assert!(matches!(err, SessionError::Configuration(_)));
    }
}
