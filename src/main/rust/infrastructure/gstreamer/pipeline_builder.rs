use crate::domain::value_objects::{PlaybackStrategy, ResolvedUrl, SurfaceId};

pub struct PipelineBuilder;

impl PipelineBuilder {
    /// Build the GStreamer launch string for one tile
    ///
    /// The video sink (or playbin itself) is named after the tile surface so
    /// bus messages can be traced back to it. Returns `None` for
    /// `Unsupported`, which never gets a pipeline.
    pub fn build_pipeline_string(
        strategy: PlaybackStrategy,
        url: &ResolvedUrl,
        surface: &SurfaceId,
    ) -> Option<String> {
        let url = Self::quote(url.as_str());
        let surface = Self::quote(surface.as_str());
        let sink = format!("autovideosink name=\"{}\"", surface);
        match strategy {
            // playbin handles playlist parsing and decoding on its own
            PlaybackStrategy::NativeElement => Some(format!(
                "playbin name=\"{}\" uri=\"{}\" mute=true",
                surface, url
            )),
            PlaybackStrategy::EngineManaged => Some(format!(
                "souphttpsrc location=\"{}\" ! \
                 hlsdemux ! \
                 decodebin ! \
                 videoconvert ! \
                 {}",
                url, sink
            )),
            // MJPEG over HTTP is a multipart stream of JPEG frames
            PlaybackStrategy::PollingImage => Some(format!(
                "souphttpsrc location=\"{}\" is-live=true do-timestamp=true ! \
                 multipartdemux ! \
                 jpegdec ! \
                 videoconvert ! \
                 {}",
                url, sink
            )),
            PlaybackStrategy::Unsupported => None,
        }
    }

    fn quote(value: &str) -> String {
        value.replace('\\', "\\\\").replace('"', "\\\"")
    }
}
