use crate::domain::errors::SessionError;
use crate::domain::value_objects::{Camera, ProxyConfig, ResolvedUrl, StreamType};

/// Path of the HLS endpoint exposed by the RTSP bridge
const PROXY_HLS_PATH: &str = "/api/stream.m3u8";

pub struct StreamUrlResolver;

impl StreamUrlResolver {
    /// Derive the fetchable URL of a camera. Pure, no network access.
    pub fn resolve(
        camera: &Camera,
        proxy: Option<&ProxyConfig>,
    ) -> Result<ResolvedUrl, SessionError> {
        if camera.url.trim().is_empty() {
            return Err(SessionError::Configuration(format!(
                "camera {} has an empty URL",
                camera.id
            )));
        }

        match (camera.stream_type, proxy) {
            (StreamType::Rtsp, Some(proxy)) => Ok(ResolvedUrl::proxied(format!(
                "{}{}?src={}",
                proxy.base_url(),
                PROXY_HLS_PATH,
                encode_uri_component(&camera.url)
            ))),
            (StreamType::Rtsp, None) => Err(SessionError::UnsupportedSource(
                "RTSP requires a configured proxy".to_string(),
            )),
            _ => Ok(ResolvedUrl::direct(camera.url.clone())),
        }
    }
}

/// Percent-encode with the unreserved set of ECMAScript `encodeURIComponent`
pub fn encode_uri_component(input: &str) -> String {
    // urlencoding keeps only A-Z a-z 0-9 - _ . ~ and escapes these marks
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}
