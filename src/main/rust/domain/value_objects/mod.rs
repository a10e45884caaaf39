mod camera;
mod grid_layout;
mod pipeline_token;
mod playback_strategy;
mod proxy_config;
mod resolved_url;
mod session_state;
mod stream_identity;

pub use camera::{Camera, CameraId, StreamType};
pub use grid_layout::GridLayout;
pub use pipeline_token::{PipelineToken, SurfaceId, TokenSequence};
pub use playback_strategy::PlaybackStrategy;
pub use proxy_config::ProxyConfig;
pub use resolved_url::ResolvedUrl;
pub use session_state::SessionState;
pub use stream_identity::StreamIdentity;
