use crate::domain::errors::SessionError;
use crate::domain::value_objects::{CameraId, SessionState};

/// Port for surfacing per-tile state to the display layer
pub trait SessionObserver: Send + Sync {
    fn state_changed(&self, camera_id: &CameraId, state: SessionState);
    fn error_occurred(&self, camera_id: &CameraId, error: &SessionError);
}
