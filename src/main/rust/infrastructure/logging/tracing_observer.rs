use tracing::{error, info, warn};

use crate::domain::errors::SessionError;
use crate::domain::ports::SessionObserver;
use crate::domain::value_objects::{CameraId, SessionState};

/// Renders tile state changes as log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl SessionObserver for TracingObserver {
    fn state_changed(&self, camera_id: &CameraId, state: SessionState) {
        if state.is_problematic() {
            warn!(camera_id = %camera_id, state = %state, "Tile state changed");
        } else {
            info!(camera_id = %camera_id, state = %state, "Tile state changed");
        }
    }

    fn error_occurred(&self, camera_id: &CameraId, error: &SessionError) {
        if error.is_retryable() {
            error!(camera_id = %camera_id, "Stream failed: {}", error);
        } else {
            warn!(camera_id = %camera_id, "Stream unavailable: {}", error);
        }
    }
}
