use super::{Camera, ProxyConfig, StreamType};

/// Inputs whose change invalidates a running session
///
/// Name, order and the expanded hint are deliberately absent: changing them
/// only moves or relabels a tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamIdentity {
    url: String,
    stream_type: StreamType,
    enabled: bool,
    proxy_target: Option<String>,
}

impl StreamIdentity {
    pub fn of(camera: &Camera, proxy: Option<&ProxyConfig>) -> Self {
        // Only RTSP sources depend on the proxy
        let proxy_target = match camera.stream_type {
            StreamType::Rtsp => proxy.map(|p| p.base_url().to_string()),
            _ => None,
        };

        Self {
            url: camera.url.clone(),
            stream_type: camera.stream_type,
            enabled: camera.enabled,
            proxy_target,
        }
    }
}
