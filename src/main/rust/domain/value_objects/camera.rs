use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, Result};

/// Opaque camera identifier, stable for the camera's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraId(String);

impl CameraId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CameraId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Http,
    Hls,
    Mjpeg,
    Rtsp,
    Other,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::Http => "http",
            StreamType::Hls => "hls",
            StreamType::Mjpeg => "mjpeg",
            StreamType::Rtsp => "rtsp",
            StreamType::Other => "other",
        }
    }
}

impl Default for StreamType {
    fn default() -> Self {
        StreamType::Hls
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stream source as configured by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    pub enabled: bool,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl Camera {
    pub fn new(
        id: impl Into<CameraId>,
        name: impl Into<String>,
        url: impl Into<String>,
        stream_type: StreamType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            stream_type,
            enabled: true,
            order: 0,
            expanded: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.unwrap_or(false)
    }

    /// Pure validation of the user-editable fields
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyCameraName);
        }
        if self.url.trim().is_empty() {
            return Err(DomainError::EmptyCameraUrl);
        }
        Ok(())
    }
}

impl From<String> for CameraId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
