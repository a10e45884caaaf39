use std::path::PathBuf;

use clap::Parser;

use crate::domain::entities::AppConfig;
use crate::domain::value_objects::{GridLayout, ProxyConfig};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "camview",
    version = "0.1.0",
    author = "camview developers",
    about = "Multi-camera grid viewer for HLS, MJPEG and proxied RTSP streams"
)]
pub struct Config {
    /// Path of the stored viewer configuration
    #[arg(long, env = "CAMVIEW_CONFIG", default_value = "camview.json")]
    pub config: PathBuf,

    /// Configuration written by an older build, migrated on first start
    #[arg(long, env = "CAMVIEW_LEGACY_CONFIG")]
    pub legacy_config: Option<PathBuf>,

    /// RTSP-to-HLS proxy base URL (overrides the stored value)
    #[arg(long, env = "RTSP_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Grid column count (overrides the stored value)
    #[arg(long)]
    pub grid_columns: Option<u8>,

    /// Metrics server port
    #[arg(long, env = "METRICS_PORT", default_value = "9003")]
    pub metrics_port: u16,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub export: bool,

    /// Drive the grid with simulated pipelines instead of GStreamer
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Minimum allowed port (ports below 1024 are privileged)
const MIN_USER_PORT: u16 = 1024;

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        Self::validate_port(self.metrics_port, "metrics")?;

        if let Some(proxy_url) = &self.proxy_url {
            ProxyConfig::new(proxy_url).map_err(|e| anyhow::anyhow!("{}", e))?;
        }

        if let Some(columns) = self.grid_columns {
            GridLayout::new(columns).map_err(|e| anyhow::anyhow!("{}", e))?;
        }

        Ok(())
    }

    fn validate_port(port: u16, name: &str) -> anyhow::Result<()> {
        if port == 0 {
            anyhow::bail!("Invalid {} port: port cannot be 0", name);
        }
        if port < MIN_USER_PORT {
            anyhow::bail!(
                "Invalid {} port: {} is a privileged port (< {}). Use a port >= {}",
                name,
                port,
                MIN_USER_PORT,
                MIN_USER_PORT
            );
        }
        Ok(())
    }

    /// Overlay command-line overrides on the stored configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(proxy_url) = &self.proxy_url {
            config.rtsp_proxy_url = Some(proxy_url.clone());
        }
        if let Some(columns) = self.grid_columns {
            config.grid_columns = columns;
        }
    }
}
