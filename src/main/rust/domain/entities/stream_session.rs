use tracing::{debug, info, warn};

use super::{PipelineHandle, SessionLifecycle};
use crate::domain::errors::SessionError;
use crate::domain::ports::{
    MetricsReporter, PipelineEvent, PipelineEventKind, PipelineFactory, PipelineRequest,
    PlaybackCapabilities, SessionObserver,
};
use crate::domain::services::{StrategySelector, StreamUrlResolver};
use crate::domain::value_objects::{
    Camera, CameraId, PipelineToken, PlaybackStrategy, ProxyConfig, ResolvedUrl, SessionState,
    StreamIdentity, SurfaceId, TokenSequence,
};

/// Collaborators a session needs for one operation
pub struct SessionContext<'a> {
    pub factory: &'a mut dyn PipelineFactory,
    pub capabilities: &'a dyn PlaybackCapabilities,
    pub proxy: Option<&'a ProxyConfig>,
    pub tokens: &'a mut TokenSequence,
    pub observer: &'a dyn SessionObserver,
    pub metrics: &'a dyn MetricsReporter,
}

/// Playback state machine of one camera tile
///
/// The session refers to its camera by id only; callers pass the current
/// record into the operations that need it. At most one pipeline is held at a
/// time and it is released on every path out of a pipeline-holding state.
#[derive(Debug)]
pub struct StreamSession {
    camera_id: CameraId,
    identity: StreamIdentity,
    resolved_url: Option<ResolvedUrl>,
    strategy: Option<PlaybackStrategy>,
    pipeline: Option<PipelineHandle>,
    error_generation: u32,
    last_error: Option<SessionError>,
    lifecycle: SessionLifecycle,
}

impl StreamSession {
    /// New session in `Idle`, or `Disabled` when the camera is switched off
    pub fn create(camera: &Camera, ctx: &mut SessionContext<'_>) -> Self {
        let initial = if camera.enabled {
            SessionState::Idle
        } else {
            SessionState::Disabled
        };

        let session = Self {
            camera_id: camera.id.clone(),
            identity: StreamIdentity::of(camera, ctx.proxy),
            resolved_url: None,
            strategy: None,
            pipeline: None,
            error_generation: 0,
            last_error: None,
            lifecycle: SessionLifecycle::new(initial),
        };

        ctx.metrics.report_session_created(initial);
        ctx.observer.state_changed(&session.camera_id, initial);
        debug!(camera_id = %session.camera_id, state = %initial, "Stream session created");

        session
    }

    pub fn camera_id(&self) -> &CameraId {
        &self.camera_id
    }

    pub fn state(&self) -> SessionState {
        self.lifecycle.current_state()
    }

    pub fn resolved_url(&self) -> Option<&ResolvedUrl> {
        self.resolved_url.as_ref()
    }

    pub fn strategy(&self) -> Option<PlaybackStrategy> {
        self.strategy
    }

    pub fn error_generation(&self) -> u32 {
        self.error_generation
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn lifecycle(&self) -> &SessionLifecycle {
        &self.lifecycle
    }

    /// Token of the live pipeline instance, if any
    pub fn current_token(&self) -> Option<&PipelineToken> {
        self.pipeline.as_ref().map(PipelineHandle::token)
    }

    pub fn has_pipeline(&self) -> bool {
        self.pipeline.is_some()
    }

    /// True when `camera` under `proxy` still maps onto this session
    pub fn matches(&self, camera: &Camera, proxy: Option<&ProxyConfig>) -> bool {
        self.camera_id == camera.id && self.identity == StreamIdentity::of(camera, proxy)
    }

    /// Resolve, select and instantiate a pipeline. Only acts in `Idle`.
    pub fn start(&mut self, camera: &Camera, ctx: &mut SessionContext<'_>) -> SessionState {
        if self.state() != SessionState::Idle {
            return self.state();
        }
        debug_assert!(self.matches(camera, ctx.proxy));

        let resolved = StreamUrlResolver::resolve(camera, ctx.proxy);
        let strategy = StrategySelector::select(camera, &resolved, ctx.capabilities);
        self.strategy = Some(strategy);

        let url = match resolved {
            Ok(url) if strategy.is_playable() => url,
            Ok(_) => {
                let reason = format!("no pipeline for {} streams", camera.stream_type);
                self.mark_unsupported(SessionError::UnsupportedSource(reason), ctx);
                return self.state();
            }
            Err(err) => {
                self.mark_unsupported(err, ctx);
                return self.state();
            }
        };
        self.resolved_url = Some(url.clone());

        let token = ctx.tokens.next_token(&self.camera_id);
        let request = PipelineRequest {
            token: token.clone(),
            strategy,
            url,
            surface: SurfaceId::for_camera(&self.camera_id),
        };

        match ctx.factory.create(request) {
            Ok(pipeline) => {
                self.pipeline = Some(PipelineHandle::new(pipeline));
                ctx.metrics.report_pipeline_created(strategy);
                info!(
                    camera_id = %self.camera_id,
                    token = %token,
                    strategy = %strategy,
                    "Pipeline created"
                );
                self.enter(SessionState::Loading, None, ctx);
            }
            Err(e) => self.fail(e.into(), ctx),
        }

        self.state()
    }

    /// Apply a pipeline notification. Returns `false` for stale events.
    pub fn handle_event(&mut self, event: PipelineEvent, ctx: &mut SessionContext<'_>) -> bool {
        if self.current_token() != Some(&event.token) {
            debug!(
                camera_id = %self.camera_id,
                token = %event.token,
                "Dropping event from superseded pipeline"
            );
            ctx.metrics.report_stale_event();
            return false;
        }

        match event.kind {
            PipelineEventKind::Ready if self.state() == SessionState::Loading => {
                self.enter(SessionState::Playing, None, ctx);
            }
            PipelineEventKind::Ready => {
                debug!(camera_id = %self.camera_id, state = %self.state(), "Ready ignored");
            }
            PipelineEventKind::Warning(reason) => {
                let err = SessionError::TransientPlayback(reason);
                debug!(camera_id = %self.camera_id, error = %err, "Absorbed by pipeline");
            }
            PipelineEventKind::Fatal(reason) => {
                self.fail(SessionError::FatalPlayback(reason), ctx);
            }
        }

        true
    }

    /// Flip between `Playing` and `Paused`; a no-op in every other state
    pub fn toggle_play_pause(&mut self, ctx: &mut SessionContext<'_>) -> bool {
        let (result, next) = match (self.state(), self.pipeline.as_mut()) {
            (SessionState::Playing, Some(pipeline)) => (pipeline.pause(), SessionState::Paused),
            (SessionState::Paused, Some(pipeline)) => (pipeline.resume(), SessionState::Playing),
            _ => return false,
        };

        match result {
            Ok(()) => self.enter(next, None, ctx),
            Err(e) => self.fail(e.into(), ctx),
        }
        true
    }

    /// Start over with a fresh pipeline instance. Only acts in `Errored`.
    pub fn retry(&mut self, camera: &Camera, ctx: &mut SessionContext<'_>) -> bool {
        if !self.state().can_retry() {
            return false;
        }

        self.error_generation += 1;
        self.resolved_url = None;
        self.strategy = None;
        self.last_error = None;
        ctx.metrics.report_retry();
        info!(
            camera_id = %self.camera_id,
            generation = self.error_generation,
            "Retrying stream"
        );

        let reason = format!("retry #{}", self.error_generation);
        self.enter(SessionState::Idle, Some(reason), ctx);
        self.start(camera, ctx);
        true
    }

    /// Tear the session down, releasing the pipeline whatever the state
    pub fn destroy(mut self, ctx: &mut SessionContext<'_>) {
        self.release_pipeline(ctx);
        ctx.metrics.report_session_destroyed(self.state());
        debug!(
            camera_id = %self.camera_id,
            state = %self.state(),
            uptime = ?self.lifecycle.uptime(),
            transitions = self.lifecycle.transition_count(),
            "Stream session destroyed"
        );
    }

    fn mark_unsupported(&mut self, err: SessionError, ctx: &mut SessionContext<'_>) {
        info!(camera_id = %self.camera_id, reason = %err, "Stream unsupported");
        let reason = err.to_string();
        self.last_error = Some(err);
        self.enter(SessionState::Unsupported, Some(reason), ctx);
    }

    fn fail(&mut self, err: SessionError, ctx: &mut SessionContext<'_>) {
        self.release_pipeline(ctx);
        ctx.metrics.report_fatal_error();
        warn!(camera_id = %self.camera_id, error = %err, "Stream errored");

        self.enter(SessionState::Errored, Some(err.to_string()), ctx);
        ctx.observer.error_occurred(&self.camera_id, &err);
        self.last_error = Some(err);
    }

    fn release_pipeline(&mut self, ctx: &mut SessionContext<'_>) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.release();
            ctx.metrics.report_pipeline_released();
        }
    }

    fn enter(&mut self, to: SessionState, reason: Option<String>, ctx: &mut SessionContext<'_>) {
        debug_assert_eq!(to.holds_pipeline(), self.pipeline.is_some());
        let from = self.lifecycle.transition(to, reason);
        ctx.metrics.report_state_change(from, to);
        ctx.observer.state_changed(&self.camera_id, to);
        debug!(camera_id = %self.camera_id, %from, %to, "Session state changed");
    }
}
