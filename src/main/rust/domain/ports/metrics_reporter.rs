use crate::domain::value_objects::{PlaybackStrategy, SessionState};

/// Port for metrics reporting
pub trait MetricsReporter: Send + Sync {
    fn report_session_created(&self, state: SessionState);
    fn report_session_destroyed(&self, state: SessionState);
    fn report_state_change(&self, from: SessionState, to: SessionState);
    fn report_pipeline_created(&self, strategy: PlaybackStrategy);
    fn report_pipeline_released(&self);
    fn report_fatal_error(&self);
    fn report_retry(&self);
    fn report_stale_event(&self);
}
