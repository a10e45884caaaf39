use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use crate::domain::entities::{SessionContext, StreamSession};
use crate::domain::ports::{
    MetricsReporter, PipelineEvent, PipelineEventReceiver, PipelineFactory, PlaybackCapabilities,
    SessionObserver,
};
use crate::domain::value_objects::{
    Camera, CameraId, GridLayout, ProxyConfig, SessionState, TokenSequence,
};

/// Everything sessions borrow while the orchestrator drives them
struct SessionDeps {
    factory: Box<dyn PipelineFactory>,
    capabilities: Arc<dyn PlaybackCapabilities>,
    proxy: Option<ProxyConfig>,
    tokens: TokenSequence,
    observer: Arc<dyn SessionObserver>,
    metrics: Arc<dyn MetricsReporter>,
}

impl SessionDeps {
    fn context(&mut self) -> SessionContext<'_> {
        SessionContext {
            factory: self.factory.as_mut(),
            capabilities: self.capabilities.as_ref(),
            proxy: self.proxy.as_ref(),
            tokens: &mut self.tokens,
            observer: self.observer.as_ref(),
            metrics: self.metrics.as_ref(),
        }
    }
}

/// Outcome of reconciling a new camera list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub recreated: usize,
    pub destroyed: usize,
    pub preserved: usize,
}

/// One grid cell as the display layer should render it
#[derive(Debug, Clone, Copy)]
pub struct GridTile<'a> {
    pub camera: &'a Camera,
    pub position: usize,
    pub state: SessionState,
    pub span: u8,
    pub can_retry: bool,
}

enum Reconcile {
    Keep,
    Recreate,
    Create,
}

/// Application service mapping the camera list onto stream sessions
///
/// Holds exactly one session per camera id. Sessions survive reorders and
/// layout changes untouched; any identity-relevant change destroys the old
/// session (and its pipeline) before the replacement is created.
pub struct GridOrchestrator {
    deps: SessionDeps,
    layout: GridLayout,
    cameras: Vec<Camera>,
    sessions: HashMap<CameraId, StreamSession>,
}

impl GridOrchestrator {
    pub fn new(
        factory: Box<dyn PipelineFactory>,
        capabilities: Arc<dyn PlaybackCapabilities>,
        observer: Arc<dyn SessionObserver>,
        metrics: Arc<dyn MetricsReporter>,
    ) -> Self {
        Self {
            deps: SessionDeps {
                factory,
                capabilities,
                proxy: None,
                tokens: TokenSequence::new(),
                observer,
                metrics,
            },
            layout: GridLayout::default(),
            cameras: Vec::new(),
            sessions: HashMap::new(),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.deps.proxy = proxy;
        self
    }

    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.deps.proxy.as_ref()
    }

    pub fn session(&self, camera_id: &CameraId) -> Option<&StreamSession> {
        self.sessions.get(camera_id)
    }

    pub fn state_of(&self, camera_id: &CameraId) -> Option<SessionState> {
        self.sessions.get(camera_id).map(StreamSession::state)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Tiles in display order
    pub fn tiles(&self) -> Vec<GridTile<'_>> {
        self.cameras
            .iter()
            .enumerate()
            .filter_map(|(position, camera)| {
                let session = self.sessions.get(&camera.id)?;
                Some(GridTile {
                    camera,
                    position,
                    state: session.state(),
                    span: self.layout.span_for(camera.is_expanded()),
                    can_retry: session.state().can_retry(),
                })
            })
            .collect()
    }

    /// Reconcile sessions against the authoritative, ordered camera list
    pub fn apply_cameras(&mut self, cameras: &[Camera]) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        let mut seen = HashSet::new();
        let mut incoming = Vec::with_capacity(cameras.len());
        for camera in cameras {
            if !seen.insert(camera.id.clone()) {
                tracing::warn!(camera_id = %camera.id, "Ignoring duplicate camera id");
                continue;
            }
            incoming.push(camera.clone());
        }

        let removed: Vec<CameraId> = self
            .sessions
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        for camera_id in removed {
            self.destroy_session(&camera_id);
            summary.destroyed += 1;
        }

        for camera in &incoming {
            let action = match self.sessions.get(&camera.id) {
                Some(session) if session.matches(camera, self.deps.proxy.as_ref()) => {
                    Reconcile::Keep
                }
                Some(_) => Reconcile::Recreate,
                None => Reconcile::Create,
            };

            match action {
                Reconcile::Keep => summary.preserved += 1,
                Reconcile::Recreate => {
                    tracing::info!(camera_id = %camera.id, "Stream identity changed, recreating session");
                    self.destroy_session(&camera.id);
                    self.spawn_session(camera);
                    summary.recreated += 1;
                }
                Reconcile::Create => {
                    self.spawn_session(camera);
                    summary.created += 1;
                }
            }
        }

        self.cameras = incoming;

        tracing::debug!(
            created = summary.created,
            recreated = summary.recreated,
            destroyed = summary.destroyed,
            preserved = summary.preserved,
            "Camera list applied"
        );
        summary
    }

    /// Swap the RTSP proxy; only sessions whose resolved target moves are recreated
    pub fn set_proxy_config(&mut self, proxy: Option<ProxyConfig>) -> usize {
        if self.deps.proxy == proxy {
            return 0;
        }
        self.deps.proxy = proxy;

        let cameras = self.cameras.clone();
        let mut recreated = 0;
        for camera in &cameras {
            let stale = self
                .sessions
                .get(&camera.id)
                .map_or(false, |session| !session.matches(camera, self.deps.proxy.as_ref()));
            if stale {
                self.destroy_session(&camera.id);
                self.spawn_session(camera);
                recreated += 1;
            }
        }

        tracing::info!(
            proxy = ?self.deps.proxy.as_ref().map(ProxyConfig::base_url),
            recreated,
            "Proxy configuration updated"
        );
        recreated
    }

    /// Column count change; presentation only
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
        tracing::debug!(columns = layout.columns(), "Grid layout changed");
    }

    pub fn toggle_play_pause(&mut self, camera_id: &CameraId) -> bool {
        match self.sessions.get_mut(camera_id) {
            Some(session) => session.toggle_play_pause(&mut self.deps.context()),
            None => false,
        }
    }

    pub fn retry(&mut self, camera_id: &CameraId) -> bool {
        let camera = match self.cameras.iter().find(|camera| &camera.id == camera_id) {
            Some(camera) => camera,
            None => return false,
        };
        match self.sessions.get_mut(camera_id) {
            Some(session) => session.retry(camera, &mut self.deps.context()),
            None => false,
        }
    }

    /// Route a pipeline notification to its session; stale events are dropped
    pub fn handle_event(&mut self, event: PipelineEvent) -> bool {
        match self.sessions.get_mut(event.token.camera_id()) {
            Some(session) => session.handle_event(event, &mut self.deps.context()),
            None => {
                tracing::debug!(token = %event.token, "Dropping event for unknown camera");
                self.deps.metrics.report_stale_event();
                false
            }
        }
    }

    /// Dispatch every queued event without waiting; returns how many were read
    pub fn drain_events(&mut self, events: &mut PipelineEventReceiver) -> usize {
        let mut count = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_event(event);
            count += 1;
        }
        count
    }

    /// Dispatch pipeline events until `shutdown` resolves or every sender is
    /// gone, then shut the grid down. Returns how many events were read.
    ///
    /// Pipeline teardown blocks, so dispatch goes through `block_in_place`;
    /// this requires the multi-threaded runtime.
    pub async fn run_until<F>(&mut self, events: &mut PipelineEventReceiver, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut count = 0;
        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Some(event) => {
                        tokio::task::block_in_place(|| self.handle_event(event));
                        count += 1;
                    }
                    None => break,
                },
                _ = &mut shutdown => break,
            }
        }
        tokio::task::block_in_place(|| self.shutdown());
        count
    }

    /// Destroy every session, releasing all pipelines
    pub fn shutdown(&mut self) {
        let ids: Vec<CameraId> = self.sessions.keys().cloned().collect();
        for camera_id in &ids {
            self.destroy_session(camera_id);
        }
        self.cameras.clear();
        tracing::info!(sessions = ids.len(), "Grid shut down");
    }

    fn spawn_session(&mut self, camera: &Camera) {
        let mut ctx = self.deps.context();
        let mut session = StreamSession::create(camera, &mut ctx);
        session.start(camera, &mut ctx);
        self.sessions.insert(camera.id.clone(), session);
    }

    fn destroy_session(&mut self, camera_id: &CameraId) {
        if let Some(session) = self.sessions.remove(camera_id) {
            session.destroy(&mut self.deps.context());
        }
    }
}

impl Drop for GridOrchestrator {
    fn drop(&mut self) {
        // Route remaining sessions through destroy so metrics stay balanced
        if !self.sessions.is_empty() {
            self.shutdown();
        }
    }
}
