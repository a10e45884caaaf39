use crate::domain::ports::PlaybackCapabilities;

/// Capability answers fixed at construction
#[derive(Debug, Clone, Copy)]
pub struct StaticCapabilities {
    adaptive_engine: bool,
    native_playlist: bool,
}

impl StaticCapabilities {
    pub fn new(adaptive_engine: bool, native_playlist: bool) -> Self {
        Self {
            adaptive_engine,
            native_playlist,
        }
    }
}

impl PlaybackCapabilities for StaticCapabilities {
    fn supports_adaptive_engine(&self) -> bool {
        self.adaptive_engine
    }

    fn supports_native_playlist(&self) -> bool {
        self.native_playlist
    }
}
