use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::{
    MediaPipeline, PipelineEvent, PipelineEventSender, PipelineFactory, PipelineRequest,
};
use crate::domain::value_objects::{CameraId, PipelineToken};

/// One observable step of a simulated pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    Created(PipelineToken),
    Paused(PipelineToken),
    Resumed(PipelineToken),
    TornDown(PipelineToken),
}

#[derive(Debug, Default)]
struct LedgerState {
    entries: Vec<LedgerEntry>,
    requests: Vec<PipelineRequest>,
    live: HashSet<PipelineToken>,
}

/// Shared record of everything the simulated factory and its pipelines did
#[derive(Debug, Clone, Default)]
pub struct PipelineLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl PipelineLedger {
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.lock().entries.clone()
    }

    pub fn created_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn live_for(&self, camera_id: &CameraId) -> usize {
        self.lock()
            .live
            .iter()
            .filter(|token| token.camera_id() == camera_id)
            .count()
    }

    pub fn was_torn_down(&self, token: &PipelineToken) -> bool {
        self.lock()
            .entries
            .iter()
            .any(|entry| matches!(entry, LedgerEntry::TornDown(t) if t == token))
    }

    pub fn teardown_count(&self) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|entry| matches!(entry, LedgerEntry::TornDown(_)))
            .count()
    }

    fn record(&self, entry: LedgerEntry) {
        let mut state = self.lock();
        match &entry {
            LedgerEntry::Created(token) => {
                state.live.insert(token.clone());
            }
            LedgerEntry::TornDown(token) => {
                state.live.remove(token);
            }
            _ => {}
        }
        state.entries.push(entry);
    }
}

/// Media stack stand-in that renders nothing
///
/// Used for dry runs of the viewer and as the pipeline backend in tests.
pub struct SimulatedPipelineFactory {
    events: Option<PipelineEventSender>,
    ledger: PipelineLedger,
    auto_ready: bool,
    rejected_urls: HashSet<String>,
    broken_urls: HashSet<String>,
    stuck_urls: HashSet<String>,
}

impl SimulatedPipelineFactory {
    pub fn new() -> Self {
        Self {
            events: None,
            ledger: PipelineLedger::default(),
            auto_ready: false,
            rejected_urls: HashSet::new(),
            broken_urls: HashSet::new(),
            stuck_urls: HashSet::new(),
        }
    }

    /// Report pipeline progress on `events`
    pub fn with_events(mut self, events: PipelineEventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Emit `Ready` as soon as a pipeline is created
    pub fn with_auto_ready(mut self, auto_ready: bool) -> Self {
        self.auto_ready = auto_ready;
        self
    }

    /// Fail pipeline construction for `url`
    pub fn reject_url(&mut self, url: &str) {
        self.rejected_urls.insert(url.to_string());
    }

    /// Build pipelines for `url` that report a fatal error right away
    pub fn break_url(&mut self, url: &str) {
        self.broken_urls.insert(url.to_string());
    }

    /// Build pipelines for `url` whose pause and resume calls fail
    pub fn fail_pause_url(&mut self, url: &str) {
        self.stuck_urls.insert(url.to_string());
    }

    pub fn ledger(&self) -> PipelineLedger {
        self.ledger.clone()
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(events) = &self.events {
            // The receiver is gone during shutdown
            let _ = events.send(event);
        }
    }
}

impl Default for SimulatedPipelineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineFactory for SimulatedPipelineFactory {
    fn create(&mut self, request: PipelineRequest) -> Result<Box<dyn MediaPipeline>> {
        let url = request.url.as_str().to_string();
        if self.rejected_urls.contains(&url) {
            return Err(DomainError::PipelineCreationFailed(format!(
                "simulated rejection of {}",
                url
            )));
        }

        let token = request.token.clone();
        tracing::debug!(
            token = %token,
            strategy = %request.strategy,
            surface = %request.surface,
            "Simulated pipeline created"
        );
        {
            let mut state = self.ledger.lock();
            state.requests.push(request);
        }
        self.ledger.record(LedgerEntry::Created(token.clone()));

        if self.broken_urls.contains(&url) {
            self.emit(PipelineEvent::fatal(token.clone(), format!("{} unreachable", url)));
        } else if self.auto_ready {
            self.emit(PipelineEvent::ready(token.clone()));
        }

        Ok(Box::new(SimulatedPipeline {
            token,
            ledger: self.ledger.clone(),
            torn_down: false,
            stuck: self.stuck_urls.contains(&url),
        }))
    }
}

struct SimulatedPipeline {
    token: PipelineToken,
    ledger: PipelineLedger,
    torn_down: bool,
    stuck: bool,
}

impl SimulatedPipeline {
    fn check_run_state_change(&self) -> Result<()> {
        if self.torn_down {
            return Err(DomainError::PipelineExecutionFailed("pipeline torn down".into()));
        }
        if self.stuck {
            return Err(DomainError::PipelineExecutionFailed(
                "simulated state change failure".into(),
            ));
        }
        Ok(())
    }
}

impl MediaPipeline for SimulatedPipeline {
    fn token(&self) -> &PipelineToken {
        &self.token
    }

    fn pause(&mut self) -> Result<()> {
        self.check_run_state_change()?;
        self.ledger.record(LedgerEntry::Paused(self.token.clone()));
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.check_run_state_change()?;
        self.ledger.record(LedgerEntry::Resumed(self.token.clone()));
        Ok(())
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.ledger.record(LedgerEntry::TornDown(self.token.clone()));
    }
}
