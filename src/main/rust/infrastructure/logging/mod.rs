mod tracing_observer;

pub use tracing_observer::TracingObserver;
