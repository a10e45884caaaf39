use crate::domain::errors::SessionError;
use crate::domain::ports::PlaybackCapabilities;
use crate::domain::value_objects::{Camera, PlaybackStrategy, ResolvedUrl, StreamType};

pub struct StrategySelector;

impl StrategySelector {
    /// Pick the pipeline kind for a tile; first matching rule wins
    pub fn select(
        camera: &Camera,
        resolved: &Result<ResolvedUrl, SessionError>,
        capabilities: &dyn PlaybackCapabilities,
    ) -> PlaybackStrategy {
        let resolved = match resolved {
            Ok(url) => url,
            Err(_) => return PlaybackStrategy::Unsupported,
        };

        if camera.stream_type == StreamType::Mjpeg {
            return PlaybackStrategy::PollingImage;
        }

        let playlist = camera.stream_type == StreamType::Hls
            || (camera.stream_type == StreamType::Rtsp && resolved.is_proxied());

        if playlist && capabilities.supports_adaptive_engine() {
            return PlaybackStrategy::EngineManaged;
        }
        if playlist && capabilities.supports_native_playlist() {
            return PlaybackStrategy::NativeElement;
        }

        PlaybackStrategy::NativeElement
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    struct Caps {
        engine: AtomicBool,
        native: bool,
        queries: AtomicUsize,
    }

    impl Caps {
        fn new(engine: bool, native: bool) -> Self {
            Self {
                engine: AtomicBool::new(engine),
                native,
                queries: AtomicUsize::new(0),
            }
        }
    }

    impl PlaybackCapabilities for Caps {
        fn supports_adaptive_engine(&self) -> bool {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.engine.load(Ordering::SeqCst)
        }

        fn supports_native_playlist(&self) -> bool {
            self.native
        }
    }

    fn select(camera: &Camera, caps: &Caps) -> PlaybackStrategy {
        StrategySelector::select(camera, &Ok(ResolvedUrl::direct(camera.url.clone())), caps)
    }

    #[test]
    fn test_failed_resolution_is_unsupported() {
        let camera = Camera::new("a", "A", "rtsp://h/s", StreamType::Rtsp);
        let resolved = Err(SessionError::UnsupportedSource("no proxy".into()));
        assert_eq!(
            StrategySelector::select(&camera, &resolved, &Caps::new(true, true)),
            PlaybackStrategy::Unsupported
        );
    }

    #[test]
    fn test_mjpeg_uses_polling_image() {
        let camera = Camera::new("a", "A", "http://cam/mjpg", StreamType::Mjpeg);
        assert_eq!(select(&camera, &Caps::new(true, true)), PlaybackStrategy::PollingImage);
    }

    #[test]
    fn test_hls_prefers_engine_then_native() {
        let camera = Camera::new("a", "A", "http://x/a.m3u8", StreamType::Hls);
        assert_eq!(select(&camera, &Caps::new(true, true)), PlaybackStrategy::EngineManaged);
        assert_eq!(select(&camera, &Caps::new(false, true)), PlaybackStrategy::NativeElement);
        assert_eq!(select(&camera, &Caps::new(false, false)), PlaybackStrategy::NativeElement);
    }

    #[test]
    fn test_proxied_rtsp_uses_engine() {
        let camera = Camera::new("a", "A", "rtsp://h/s", StreamType::Rtsp);
        let resolved = Ok(ResolvedUrl::proxied("http://p/api/stream.m3u8?src=x"));
        assert_eq!(
            StrategySelector::select(&camera, &resolved, &Caps::new(true, false)),
            PlaybackStrategy::EngineManaged
        );
    }

    #[test]
    fn test_progressive_sources_use_native_element() {
        let caps = Caps::new(true, true);
        for stream_type in [StreamType::Http, StreamType::Other] {
            let camera = Camera::new("a", "A", "http://x/v.mp4", stream_type);
            assert_eq!(select(&camera, &caps), PlaybackStrategy::NativeElement);
        }
    }

    #[test]
    fn test_capabilities_are_queried_on_every_selection() {
        let caps = Caps::new(true, true);
        let camera = Camera::new("a", "A", "http://x/a.m3u8", StreamType::Hls);

        assert_eq!(select(&camera, &caps), PlaybackStrategy::EngineManaged);
        caps.engine.store(false, Ordering::SeqCst);
        assert_eq!(select(&camera, &caps), PlaybackStrategy::NativeElement);
        assert_eq!(caps.queries.load(Ordering::SeqCst), 2);
    }
}
