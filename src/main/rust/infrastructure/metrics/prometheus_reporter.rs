use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::domain::ports::MetricsReporter;
use crate::domain::value_objects::{PlaybackStrategy, SessionState};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Sessions per state (IDLE, LOADING, PLAYING, ...)
    pub static ref SESSIONS: IntGaugeVec = IntGaugeVec::new(
        Opts::new("camview_sessions", "Stream sessions by state"),
        &["state"]
    ).expect("metric can be created");

    // Pipelines currently holding a decoder
    pub static ref LIVE_PIPELINES: IntGauge = IntGauge::new(
        "camview_live_pipelines",
        "Pipeline instances currently alive"
    ).expect("metric can be created");

    pub static ref PIPELINES_CREATED: IntCounterVec = IntCounterVec::new(
        Opts::new("camview_pipelines_created_total", "Pipeline instances created by strategy"),
        &["strategy"]
    ).expect("metric can be created");

    pub static ref FATAL_ERRORS: IntCounter = IntCounter::new(
        "camview_fatal_errors_total",
        "Fatal playback errors surfaced to tiles"
    ).expect("metric can be created");

    pub static ref RETRIES: IntCounter = IntCounter::new(
        "camview_retries_total",
        "User-initiated stream retries"
    ).expect("metric can be created");

    pub static ref STALE_EVENTS: IntCounter = IntCounter::new(
        "camview_stale_events_total",
        "Pipeline events dropped because their instance was superseded"
    ).expect("metric can be created");
}

pub struct PrometheusReporter;

impl PrometheusReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn init_metrics() -> Result<(), prometheus::Error> {
        REGISTRY.register(Box::new(SESSIONS.clone()))?;
        REGISTRY.register(Box::new(LIVE_PIPELINES.clone()))?;
        REGISTRY.register(Box::new(PIPELINES_CREATED.clone()))?;
        REGISTRY.register(Box::new(FATAL_ERRORS.clone()))?;
        REGISTRY.register(Box::new(RETRIES.clone()))?;
        REGISTRY.register(Box::new(STALE_EVENTS.clone()))?;

        // Export every state from the start, not only once a session enters it
        for state in SessionState::all() {
            Self::sessions_in(state);
        }
        Ok(())
    }

    pub fn gather_metrics() -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = REGISTRY.gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return b"# Error encoding metrics\n".to_vec();
        }
        buffer
    }

    fn sessions_in(state: SessionState) -> IntGauge {
        SESSIONS.with_label_values(&[&state.to_string()])
    }
}

impl Default for PrometheusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsReporter for PrometheusReporter {
    fn report_session_created(&self, state: SessionState) {
        Self::sessions_in(state).inc();
    }

    fn report_session_destroyed(&self, state: SessionState) {
        Self::sessions_in(state).dec();
    }

    fn report_state_change(&self, from: SessionState, to: SessionState) {
        Self::sessions_in(from).dec();
        Self::sessions_in(to).inc();
    }

    fn report_pipeline_created(&self, strategy: PlaybackStrategy) {
        PIPELINES_CREATED.with_label_values(&[strategy.as_str()]).inc();
        LIVE_PIPELINES.inc();
    }

    fn report_pipeline_released(&self) {
        LIVE_PIPELINES.dec();
    }

    fn report_fatal_error(&self) {
        FATAL_ERRORS.inc();
    }

    fn report_retry(&self) {
        RETRIES.inc();
    }

    fn report_stale_event(&self) {
        STALE_EVENTS.inc();
    }
}
