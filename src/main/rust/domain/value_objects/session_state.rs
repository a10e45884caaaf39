use std::fmt;

/// Stream session states (pure domain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, resolution/selection not done yet
    Idle,
    /// Pipeline created, waiting for the first frame or manifest
    Loading,
    /// Playback confirmed
    Playing,
    /// Paused by the user, pipeline still held
    Paused,
    /// Fatal pipeline error, pipeline released, retry available
    Errored,
    /// No viable playback path until the inputs change
    Unsupported,
    /// Camera switched off, never acquires a pipeline
    Disabled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Loading => write!(f, "LOADING"),
            Self::Playing => write!(f, "PLAYING"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Errored => write!(f, "ERRORED"),
            Self::Unsupported => write!(f, "UNSUPPORTED"),
            Self::Disabled => write!(f, "DISABLED"),
        }
    }
}

impl SessionState {
    /// States in which a pipeline instance is held
    pub fn holds_pipeline(&self) -> bool {
        matches!(self, Self::Loading | Self::Playing | Self::Paused)
    }

    /// Check if state indicates a problem
    pub fn is_problematic(&self) -> bool {
        matches!(self, Self::Errored | Self::Unsupported)
    }

    /// Only errored sessions expose a retry action
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Errored)
    }

    pub fn all() -> [SessionState; 7] {
        [
            Self::Idle,
            Self::Loading,
            Self::Playing,
            Self::Paused,
            Self::Errored,
            Self::Unsupported,
            Self::Disabled,
        ]
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
    }

    #[test]
    fn test_holds_pipeline() {
        assert!(!SessionState::Idle.holds_pipeline());
        assert!(SessionState::Loading.holds_pipeline());
        assert!(SessionState::Playing.holds_pipeline());
        assert!(SessionState::Paused.holds_pipeline());
        assert!(!SessionState::Errored.holds_pipeline());
        assert!(!SessionState::Unsupported.holds_pipeline());
        assert!(!SessionState::Disabled.holds_pipeline());
    }

    #[test]
    fn test_only_errored_can_retry() {
        for state in SessionState::all() {
            assert_eq!(state.can_retry(), state == SessionState::Errored);
        }
    }

    #[test]
    fn test_is_problematic() {
        assert!(SessionState::Errored.is_problematic());
        assert!(SessionState::Unsupported.is_problematic());
        assert!(!SessionState::Disabled.is_problematic());
        assert!(!SessionState::Playing.is_problematic());
    }
}
