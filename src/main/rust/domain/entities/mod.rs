mod app_config;
mod camera_list;
mod pipeline_handle;
mod session_lifecycle;
mod stream_session;

pub use app_config::{example_cameras, AppConfig, Theme};
pub use camera_list::{CameraList, CameraUpdate, NewCamera};
pub use pipeline_handle::PipelineHandle;
pub use session_lifecycle::{SessionLifecycle, StateTransition};
pub use stream_session::{SessionContext, StreamSession};
