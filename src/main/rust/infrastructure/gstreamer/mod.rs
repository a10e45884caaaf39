mod gstreamer_capabilities;
mod gstreamer_pipeline;
mod pipeline_builder;

pub use gstreamer_capabilities::GStreamerCapabilities;
pub use gstreamer_pipeline::GStreamerPipelineFactory;
pub use pipeline_builder::PipelineBuilder;
