pub mod gstreamer;
pub mod logging;
pub mod metrics;
pub mod simulated;
pub mod storage;
