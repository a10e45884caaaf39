use std::fmt;

/// Pipeline kind used to render one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackStrategy {
    /// Plain media element playback (progressive video or native playlist support)
    NativeElement,
    /// Adaptive-streaming engine that loads the playlist itself
    EngineManaged,
    /// Multipart JPEG push stream rendered frame by frame
    PollingImage,
    /// No viable pipeline for this source
    Unsupported,
}

impl PlaybackStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NativeElement => "native-element",
            Self::EngineManaged => "engine-managed",
            Self::PollingImage => "polling-image",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_playable(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for PlaybackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
