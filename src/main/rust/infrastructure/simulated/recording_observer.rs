use std::sync::Mutex;

use crate::domain::errors::SessionError;
use crate::domain::ports::{MetricsReporter, SessionObserver};
use crate::domain::value_objects::{CameraId, PlaybackStrategy, SessionState};

/// Observer that keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<(CameraId, SessionState)>>,
    errors: Mutex<Vec<(CameraId, SessionError)>>,
}

impl RecordingObserver {
    pub fn states_for(&self, camera_id: &CameraId) -> Vec<SessionState> {
        let states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        states
            .iter()
            .filter(|(id, _)| id == camera_id)
            .map(|(_, state)| *state)
            .collect()
    }

    pub fn errors_for(&self, camera_id: &CameraId) -> Vec<SessionError> {
        let errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        errors
            .iter()
            .filter(|(id, _)| id == camera_id)
            .map(|(_, err)| err.clone())
            .collect()
    }
}

impl SessionObserver for RecordingObserver {
    fn state_changed(&self, camera_id: &CameraId, state: SessionState) {
        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((camera_id.clone(), state));
    }

    fn error_occurred(&self, camera_id: &CameraId, error: &SessionError) {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((camera_id.clone(), error.clone()));
    }
}

/// Metrics sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMetrics;

impl MetricsReporter for NullMetrics {
    fn report_session_created(&self, _state: SessionState) {}
    fn report_session_destroyed(&self, _state: SessionState) {}
    fn report_state_change(&self, _from: SessionState, _to: SessionState) {}
    fn report_pipeline_created(&self, _strategy: PlaybackStrategy) {}
    fn report_pipeline_released(&self) {}
    fn report_fatal_error(&self) {}
    fn report_retry(&self) {}
    fn report_stale_event(&self) {}
}
