use std::fmt;

use super::CameraId;

/// Identity stamp of one pipeline instance
///
/// `instance` comes from a [`TokenSequence`] shared by every session of a grid,
/// so a token is never handed out twice, not even to a session recreated for
/// the same camera id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineToken {
    camera_id: CameraId,
    instance: u64,
}

impl PipelineToken {
    pub fn camera_id(&self) -> &CameraId {
        &self.camera_id
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }
}

impl fmt::Display for PipelineToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.camera_id, self.instance)
    }
}

/// Monotonic source of pipeline tokens
#[derive(Debug, Default)]
pub struct TokenSequence {
    next: u64,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_token(&mut self, camera_id: &CameraId) -> PipelineToken {
        self.next += 1;
        PipelineToken {
            camera_id: camera_id.clone(),
            instance: self.next,
        }
    }
}

/// Display surface a pipeline renders into; one per tile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn for_camera(camera_id: &CameraId) -> Self {
        Self(format!("tile-{}", camera_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_never_reused() {
        let mut tokens = TokenSequence::new();
        let cam = CameraId::new("cam-1");

        let first = tokens.next_token(&cam);
        let second = tokens.next_token(&cam);

        assert_ne!(first, second);
        assert!(second.instance() > first.instance());
    }

    #[test]
    fn test_surface_is_bound_to_camera() {
        let cam = CameraId::new("abc");
        assert_eq!(SurfaceId::for_camera(&cam).as_str(), "tile-abc");
    }
}
