use std::sync::Arc;

use tokio::sync::mpsc;

use camview::infrastructure::simulated::{
    NullMetrics, PipelineLedger, RecordingObserver, SimulatedPipelineFactory, StaticCapabilities,
};
use camview::{
    AppConfig, Camera, CameraId, GridOrchestrator, PipelineEvent, PlaybackStrategy, ProxyConfig,
    SessionState, StreamType, StreamUrlResolver,
};

const BROKEN_URL: &str = "http://cams.local/gone.m3u8";

struct Grid {
    orchestrator: GridOrchestrator,
    events: mpsc::UnboundedReceiver<PipelineEvent>,
    ledger: PipelineLedger,
    observer: Arc<RecordingObserver>,
}

impl Grid {
    fn new(proxy: Option<ProxyConfig>) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let mut factory = SimulatedPipelineFactory::new()
            .with_events(tx)
            .with_auto_ready(true);
        factory.break_url(BROKEN_URL);
        let ledger = factory.ledger();
        let observer = Arc::new(RecordingObserver::default());

        let orchestrator = GridOrchestrator::new(
            Box::new(factory),
            Arc::new(StaticCapabilities::new(true, true)),
            observer.clone(),
            Arc::new(NullMetrics),
        )
        .with_proxy(proxy);

        Self {
            orchestrator,
            events,
            ledger,
            observer,
        }
    }

    fn settle(&mut self) -> usize {
        self.orchestrator.drain_events(&mut self.events)
    }
}

fn hls(id: &str, url: &str) -> Camera {
    Camera::new(id, id.to_uppercase(), url, StreamType::Hls)
}

#[test]
fn test_gstreamer_init() {
    assert!(gstreamer::init().is_ok());
}

#[test]
fn test_hls_camera_errors_after_edit_and_retries() {
    let mut grid = Grid::new(None);
    let id = CameraId::new("front");
    let mut camera = hls("front", "http://cams.local/front.m3u8");

    grid.orchestrator.apply_cameras(&[camera.clone()]);
    assert_eq!(grid.orchestrator.state_of(&id), Some(SessionState::Loading));

    grid.settle();
    assert_eq!(grid.orchestrator.state_of(&id), Some(SessionState::Playing));

    camera.url = BROKEN_URL.to_string();
    let summary = grid.orchestrator.apply_cameras(&[camera.clone()]);
    assert_eq!(summary.recreated, 1);
    grid.settle();
    assert_eq!(grid.orchestrator.state_of(&id), Some(SessionState::Errored));
    assert_eq!(grid.ledger.live_for(&id), 0);
    assert_eq!(grid.observer.errors_for(&id).len(), 1);

    assert!(grid.orchestrator.retry(&id));
    let session = grid.orchestrator.session(&id).unwrap();
    assert_eq!(session.error_generation(), 1);
    assert_eq!(session.state(), SessionState::Loading);

    let states = grid.observer.states_for(&id);
    assert_eq!(
        &states[states.len() - 3..],
        &[SessionState::Errored, SessionState::Idle, SessionState::Loading]
    );
}

#[test]
fn test_disabled_camera_never_fetches() {
    let mut grid = Grid::new(None);
    let camera = hls("side", "http://cams.local/side.m3u8").with_enabled(false);

    grid.orchestrator.apply_cameras(&[camera]);
    grid.settle();

    assert_eq!(
        grid.orchestrator.state_of(&CameraId::new("side")),
        Some(SessionState::Disabled)
    );
    assert_eq!(grid.ledger.created_count(), 0);
}

#[test]
fn test_rtsp_without_proxy_is_unsupported() {
    let mut grid = Grid::new(None);
    let camera = Camera::new("yard", "Yard", "rtsp://10.0.0.9/live", StreamType::Rtsp);

    grid.orchestrator.apply_cameras(&[camera]);

    let session = grid.orchestrator.session(&CameraId::new("yard")).unwrap();
    assert_eq!(session.state(), SessionState::Unsupported);
    assert_eq!(session.strategy(), Some(PlaybackStrategy::Unsupported));
    assert_eq!(grid.ledger.created_count(), 0);
    assert!(!grid.orchestrator.retry(&CameraId::new("yard")));
}

#[test]
fn test_rtsp_proxy_url_is_bit_exact() {
    let camera = Camera::new("s", "S", "rtsp://h/s", StreamType::Rtsp);
    let proxy = ProxyConfig::new("http://p:1984").unwrap();

    let url = StreamUrlResolver::resolve(&camera, Some(&proxy)).unwrap();

    assert_eq!(
        url.as_str(),
        "http://p:1984/api/stream.m3u8?src=rtsp%3A%2F%2Fh%2Fs"
    );
}

#[test]
fn test_reorder_keeps_every_session() {
    let mut grid = Grid::new(None);
    let a = hls("a", "http://cams.local/a.m3u8");
    let b = hls("b", "http://cams.local/b.m3u8");
    grid.orchestrator.apply_cameras(&[a.clone(), b.clone()]);
    grid.settle();
    let tokens: Vec<_> = ["a", "b"]
        .iter()
        .map(|id| {
            grid.orchestrator
                .session(&CameraId::new(*id))
                .and_then(|s| s.current_token().cloned())
        })
        .collect();

    let summary = grid.orchestrator.apply_cameras(&[b, a]);

    assert_eq!(summary.preserved, 2);
    assert_eq!(grid.ledger.created_count(), 2);
    assert_eq!(grid.ledger.teardown_count(), 0);
    let tiles = grid.orchestrator.tiles();
    assert_eq!(tiles[0].camera.id, CameraId::new("b"));
    assert_eq!(
        grid.orchestrator
            .session(&CameraId::new("a"))
            .and_then(|s| s.current_token().cloned()),
        tokens[0]
    );
}

#[test]
fn test_identity_change_never_overlaps_pipelines() {
    let mut grid = Grid::new(None);
    let id = CameraId::new("gate");
    let mut camera = hls("gate", "http://cams.local/gate.m3u8");
    grid.orchestrator.apply_cameras(&[camera.clone()]);
    let old_token = grid
        .orchestrator
        .session(&id)
        .and_then(|s| s.current_token().cloned())
        .unwrap();

    camera.stream_type = StreamType::Http;
    grid.orchestrator.apply_cameras(&[camera]);

    assert!(grid.ledger.was_torn_down(&old_token));
    assert_eq!(grid.ledger.live_for(&id), 1);

    // The first pipeline's Ready is still queued and must not promote the new one
    grid.settle();
    assert_eq!(grid.orchestrator.state_of(&id), Some(SessionState::Playing));
    assert_eq!(grid.ledger.live_for(&id), 1);
}

#[test]
fn test_stale_event_is_dropped() {
    let mut grid = Grid::new(None);
    let id = CameraId::new("dock");
    let mut camera = hls("dock", "http://cams.local/dock.m3u8");
    grid.orchestrator.apply_cameras(&[camera.clone()]);
    grid.settle();
    let old_token = grid
        .orchestrator
        .session(&id)
        .and_then(|s| s.current_token().cloned())
        .unwrap();

    camera.url = "http://cams.local/dock2.m3u8".to_string();
    grid.orchestrator.apply_cameras(&[camera]);
    grid.settle();

    let handled = grid
        .orchestrator
        .handle_event(PipelineEvent::fatal(old_token, "late failure"));

    assert!(!handled);
    assert_eq!(grid.orchestrator.state_of(&id), Some(SessionState::Playing));
}

#[test]
fn test_proxy_change_recreates_only_rtsp_sessions() {
    let mut grid = Grid::new(Some(ProxyConfig::new("http://proxy-a:1984").unwrap()));
    let rtsp = Camera::new("r", "R", "rtsp://10.0.0.2/live", StreamType::Rtsp);
    let stream = hls("h", "http://cams.local/h.m3u8");
    grid.orchestrator.apply_cameras(&[rtsp, stream]);
    grid.settle();

    let recreated = grid
        .orchestrator
        .set_proxy_config(Some(ProxyConfig::new("http://proxy-b:1984").unwrap()));

    assert_eq!(recreated, 1);
    let resolved = grid
        .orchestrator
        .session(&CameraId::new("r"))
        .and_then(|s| s.resolved_url().cloned())
        .unwrap();
    assert!(resolved.as_str().starts_with("http://proxy-b:1984/api/stream.m3u8?src="));
    assert_eq!(
        grid.orchestrator.state_of(&CameraId::new("h")),
        Some(SessionState::Playing)
    );
}

#[test]
fn test_shutdown_releases_every_pipeline() {
    let mut grid = Grid::new(None);
    let config = AppConfig::default();
    grid.orchestrator.apply_cameras(&config.cameras);
    assert_eq!(grid.ledger.live_count(), config.cameras.len());

    grid.orchestrator.shutdown();

    assert_eq!(grid.ledger.live_count(), 0);
    assert_eq!(grid.orchestrator.session_count(), 0);
}

#[test]
fn test_imported_config_drives_grid() {
    let json = r#"{
        "cameras": [
            {"id": "k1", "name": "Kitchen", "url": "http://cams.local/k.mjpg",
             "type": "mjpeg", "enabled": true, "order": 0}
        ],
        "gridColumns": 3
    }"#;
    let config = AppConfig::import_json(json).unwrap();
    let mut grid = Grid::new(config.proxy_config().unwrap());
    grid.orchestrator.set_layout(config.layout().unwrap());

    grid.orchestrator
        .apply_cameras(config.camera_list().unwrap().cameras());
    grid.settle();

    let session = grid.orchestrator.session(&CameraId::new("k1")).unwrap();
    assert_eq!(session.strategy(), Some(PlaybackStrategy::PollingImage));
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(grid.orchestrator.layout().columns(), 3);
}
