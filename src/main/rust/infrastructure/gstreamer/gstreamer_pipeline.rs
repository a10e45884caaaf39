use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Context;
use gstreamer::prelude::*;

use super::PipelineBuilder;
use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::{
    MediaPipeline, PipelineEvent, PipelineEventKind, PipelineEventSender, PipelineFactory,
    PipelineRequest,
};
use crate::domain::value_objects::PipelineToken;

/// Timeout for bus polling (100ms allows responsive teardown)
const BUS_POLL_TIMEOUT_MS: u64 = 100;

/// Builds one GStreamer pipeline per tile and reports its bus on `events`
pub struct GStreamerPipelineFactory {
    events: PipelineEventSender,
}

impl GStreamerPipelineFactory {
    pub fn new(events: PipelineEventSender) -> Self {
        Self { events }
    }

    fn launch(request: &PipelineRequest) -> anyhow::Result<gstreamer::Pipeline> {
        let pipeline_str =
            PipelineBuilder::build_pipeline_string(request.strategy, &request.url, &request.surface)
                .ok_or_else(|| anyhow::anyhow!("No pipeline for {} strategy", request.strategy))?;
        tracing::info!(token = %request.token, "Creating pipeline: {}", pipeline_str);

        let pipeline = gstreamer::parse::launch(&pipeline_str)
            .context("Failed to parse pipeline")?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| anyhow::anyhow!("Failed to downcast to Pipeline"))?;

        Ok(pipeline)
    }
}

impl PipelineFactory for GStreamerPipelineFactory {
    fn create(&mut self, request: PipelineRequest) -> Result<Box<dyn MediaPipeline>> {
        let pipeline = Self::launch(&request)
            .map_err(|e| DomainError::PipelineCreationFailed(format!("{:#}", e)))?;

        let bus = pipeline
            .bus()
            .ok_or_else(|| DomainError::PipelineCreationFailed("Failed to get bus".to_string()))?;

        if let Err(e) = pipeline.set_state(gstreamer::State::Playing) {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(DomainError::PipelineExecutionFailed(e.to_string()));
        }

        let running = Arc::new(AtomicBool::new(true));
        let pump = BusPump {
            token: request.token.clone(),
            pipeline: pipeline.clone(),
            bus,
            events: self.events.clone(),
            running: running.clone(),
            ready_sent: false,
        };
        let thread = std::thread::Builder::new()
            .name(format!("bus-{}", request.surface))
            .spawn(move || pump.run());
        let thread = match thread {
            Ok(thread) => thread,
            Err(e) => {
                let _ = pipeline.set_state(gstreamer::State::Null);
                return Err(DomainError::PipelineCreationFailed(e.to_string()));
            }
        };

        Ok(Box::new(GStreamerPipeline {
            token: request.token,
            pipeline,
            running,
            pump: Some(thread),
        }))
    }
}

/// Forwards bus messages of one pipeline as [`PipelineEvent`]s
struct BusPump {
    token: PipelineToken,
    pipeline: gstreamer::Pipeline,
    bus: gstreamer::Bus,
    events: PipelineEventSender,
    running: Arc<AtomicBool>,
    ready_sent: bool,
}

impl BusPump {
    fn run(mut self) {
        // Use a timed pop so teardown is noticed between messages
        let timeout = gstreamer::ClockTime::from_mseconds(BUS_POLL_TIMEOUT_MS);

        while self.running.load(Ordering::SeqCst) {
            if let Some(msg) = self.bus.timed_pop(timeout) {
                if let Some(event) = self.translate(&msg) {
                    let terminal = matches!(event.kind, PipelineEventKind::Fatal(_));
                    if !self.running.load(Ordering::SeqCst) {
                        break;
                    }
                    // The receiver is gone during shutdown
                    let _ = self.events.send(event);
                    if terminal {
                        break;
                    }
                }
            }
        }
        tracing::debug!(token = %self.token, "Bus pump stopped");
    }

    fn translate(&mut self, msg: &gstreamer::Message) -> Option<PipelineEvent> {
        match msg.view() {
            gstreamer::MessageView::Eos(_) => {
                tracing::info!(token = %self.token, "End of stream");
                Some(PipelineEvent::fatal(self.token.clone(), "end of stream"))
            }
            gstreamer::MessageView::Error(err) => {
                let error_msg = format!(
                    "Error from {:?}: {} ({:?})",
                    err.src().map(|s| s.path_string()),
                    err.error(),
                    err.debug()
                );
                Some(PipelineEvent::fatal(self.token.clone(), error_msg))
            }
            gstreamer::MessageView::Warning(warn) => {
                let warning_msg = format!(
                    "Warning from {:?}: {} ({:?})",
                    warn.src().map(|s| s.path_string()),
                    warn.error(),
                    warn.debug()
                );
                Some(PipelineEvent::warning(self.token.clone(), warning_msg))
            }
            gstreamer::MessageView::StateChanged(state_changed) => {
                let from_pipeline = state_changed
                    .src()
                    .map(|s| s == &self.pipeline)
                    .unwrap_or(false);
                if !from_pipeline {
                    return None;
                }
                tracing::debug!(
                    token = %self.token,
                    "Pipeline state changed from {:?} to {:?}",
                    state_changed.old(),
                    state_changed.current()
                );
                if state_changed.current() == gstreamer::State::Playing && !self.ready_sent {
                    self.ready_sent = true;
                    return Some(PipelineEvent::ready(self.token.clone()));
                }
                None
            }
            _ => None,
        }
    }
}

struct GStreamerPipeline {
    token: PipelineToken,
    pipeline: gstreamer::Pipeline,
    running: Arc<AtomicBool>,
    pump: Option<JoinHandle<()>>,
}

impl GStreamerPipeline {
    fn set_state(&self, state: gstreamer::State) -> Result<()> {
        self.pipeline
            .set_state(state)
            .map(|_| ())
            .map_err(|e| DomainError::PipelineExecutionFailed(e.to_string()))
    }
}

impl MediaPipeline for GStreamerPipeline {
    fn token(&self) -> &PipelineToken {
        &self.token
    }

    fn pause(&mut self) -> Result<()> {
        self.set_state(gstreamer::State::Paused)
    }

    fn resume(&mut self) -> Result<()> {
        self.set_state(gstreamer::State::Playing)
    }

    fn teardown(&mut self) {
        let Some(pump) = self.pump.take() else {
            return;
        };
        self.running.store(false, Ordering::SeqCst);
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        if pump.join().is_err() {
            tracing::error!(token = %self.token, "Bus pump panicked");
        }
        tracing::debug!(token = %self.token, "Pipeline torn down");
    }
}

impl Drop for GStreamerPipeline {
    fn drop(&mut self) {
        self.teardown();
    }
}
