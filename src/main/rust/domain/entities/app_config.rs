use serde::{Deserialize, Serialize};

use super::CameraList;
use crate::domain::errors::{ConfigError, ConfigResult, Result};
use crate::domain::value_objects::{Camera, GridLayout, ProxyConfig, StreamType};

const DEFAULT_GRID_COLUMNS: u8 = 2;
const DEFAULT_AUTO_REFRESH_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Persisted viewer preferences
///
/// Field names follow the JSON document the browser build stores, so exports
/// from either side can be imported by the other. Missing fields take their
/// default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub cameras: Vec<Camera>,
    pub grid_columns: u8,
    pub auto_refresh_interval: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtsp_proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seamless_view: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_camera_names: Option<bool>,
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cameras: example_cameras(),
            grid_columns: DEFAULT_GRID_COLUMNS,
            auto_refresh_interval: DEFAULT_AUTO_REFRESH_SECS,
            rtsp_proxy_url: None,
            seamless_view: None,
            show_camera_names: None,
            theme: Theme::default(),
        }
    }
}

/// Public HLS test streams shipped as the initial camera set
pub fn example_cameras() -> Vec<Camera> {
    vec![
        Camera::new(
            "example-1",
            "Test Stream 1 (Big Buck Bunny)",
            "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8",
            StreamType::Hls,
        )
        .with_order(0),
        Camera::new(
            "example-2",
            "Test Stream 2 (ARTE)",
            "https://test-streams.mux.dev/test_001/stream.m3u8",
            StreamType::Hls,
        )
        .with_order(1),
        Camera::new(
            "example-3",
            "Test Stream 3 (Tears of Steel)",
            "https://demo.unified-streaming.com/k8s/features/stable/video/tears-of-steel/tears-of-steel.ism/.m3u8",
            StreamType::Hls,
        )
        .with_order(2),
    ]
}

impl AppConfig {
    pub fn export_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an exported document; it must carry a `cameras` array
    pub fn import_json(json: &str) -> ConfigResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ConfigError::InvalidImport(e.to_string()))?;

        if !value.get("cameras").map_or(false, |c| c.is_array()) {
            return Err(ConfigError::InvalidImport(
                "missing \"cameras\" array".to_string(),
            ));
        }

        let config: AppConfig = serde_json::from_value(value)
            .map_err(|e| ConfigError::InvalidImport(e.to_string()))?;
        config.camera_list()?;
        Ok(config)
    }

    pub fn proxy_config(&self) -> Result<Option<ProxyConfig>> {
        ProxyConfig::from_optional(self.rtsp_proxy_url.as_deref())
    }

    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::new(self.grid_columns)
    }

    pub fn camera_list(&self) -> Result<CameraList> {
        CameraList::from_cameras(self.cameras.clone())
    }
}
