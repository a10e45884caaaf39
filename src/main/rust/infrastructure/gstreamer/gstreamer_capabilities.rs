use crate::domain::ports::PlaybackCapabilities;

/// Answers capability queries from the GStreamer plugin registry
///
/// `gstreamer::init` must have been called first.
pub struct GStreamerCapabilities;

impl GStreamerCapabilities {
    pub fn new() -> Self {
        Self
    }

    fn has_elements(names: &[&str]) -> bool {
        names
            .iter()
            .all(|name| gstreamer::ElementFactory::find(name).is_some())
    }
}

impl Default for GStreamerCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackCapabilities for GStreamerCapabilities {
    fn supports_adaptive_engine(&self) -> bool {
        Self::has_elements(&["souphttpsrc", "hlsdemux"])
    }

    fn supports_native_playlist(&self) -> bool {
        Self::has_elements(&["playbin", "hlsdemux"])
    }
}
