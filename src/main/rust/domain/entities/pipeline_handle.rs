use crate::domain::errors::Result;
use crate::domain::ports::MediaPipeline;
use crate::domain::value_objects::PipelineToken;

/// Exclusive owner of one pipeline instance
///
/// Teardown runs exactly once: either through [`PipelineHandle::release`] or,
/// on any other exit path, when the handle is dropped.
pub struct PipelineHandle {
    pipeline: Box<dyn MediaPipeline>,
    released: bool,
}

impl PipelineHandle {
    pub fn new(pipeline: Box<dyn MediaPipeline>) -> Self {
        Self {
            pipeline,
            released: false,
        }
    }

    pub fn token(&self) -> &PipelineToken {
        self.pipeline.token()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.pipeline.pause()
    }

    pub fn resume(&mut self) -> Result<()> {
        self.pipeline.resume()
    }

    pub fn release(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.pipeline.teardown();
        tracing::debug!(token = %self.pipeline.token(), "Pipeline released");
    }
}

impl Drop for PipelineHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PipelineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineHandle")
            .field("token", self.pipeline.token())
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::domain::value_objects::{CameraId, TokenSequence};

    struct CountingPipeline {
        token: PipelineToken,
        teardowns: Arc<AtomicUsize>,
    }

    impl MediaPipeline for CountingPipeline {
        fn token(&self) -> &PipelineToken {
            &self.token
        }

        fn pause(&mut self) -> Result<()> {
            Ok(())
        }

        fn resume(&mut self) -> Result<()> {
            Ok(())
        }

        fn teardown(&mut self) {
            self.teardowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn handle(teardowns: &Arc<AtomicUsize>) -> PipelineHandle {
        let token = TokenSequence::new().next_token(&CameraId::new("cam"));
        PipelineHandle::new(Box::new(CountingPipeline {
            token,
            teardowns: teardowns.clone(),
        }))
    }

    #[test]
    fn test_release_tears_down_once() {
        let teardowns = Arc::new(AtomicUsize::new(0));
        handle(&teardowns).release();
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_tears_down() {
        let teardowns = Arc::new(AtomicUsize::new(0));
        {
            let _handle = handle(&teardowns);
        }
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
    }
}
