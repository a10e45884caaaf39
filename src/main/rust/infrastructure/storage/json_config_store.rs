use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::entities::AppConfig;
use crate::domain::errors::ConfigResult;
use crate::domain::ports::ConfigStore;

/// Stores the viewer configuration as one JSON document on disk
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Move a document written by an older build into this store
    ///
    /// The legacy file is removed only after the store has been written.
    /// An unreadable legacy document is left in place.
    pub async fn migrate_legacy(&self, legacy_path: &Path) -> ConfigResult<Option<AppConfig>> {
        let raw = match tokio::fs::read_to_string(legacy_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let config: AppConfig = match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %legacy_path.display(), "Ignoring unreadable legacy config: {}", e);
                return Ok(None);
            }
        };

        self.save(&config).await?;
        tokio::fs::remove_file(legacy_path).await?;
        info!(
            from = %legacy_path.display(),
            to = %self.path.display(),
            "Migrated legacy config"
        );
        Ok(Some(config))
    }
}

#[async_trait]
impl ConfigStore for JsonFileConfigStore {
    async fn load(&self) -> ConfigResult<Option<AppConfig>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn save(&self, config: &AppConfig) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write then rename so readers never see a partial document
        let temp = self.temp_path();
        tokio::fs::write(&temp, config.export_json()?).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> ConfigResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolve the startup configuration: stored document, then a migrated
/// legacy document, then the defaults
pub async fn load_or_default(
    store: &JsonFileConfigStore,
    legacy_path: Option<&Path>,
) -> AppConfig {
    match store.load().await {
        Ok(Some(config)) => return config,
        Ok(None) => {}
        Err(e) => warn!(path = %store.path().display(), "Failed to load config: {}", e),
    }

    if let Some(legacy_path) = legacy_path {
        match store.migrate_legacy(legacy_path).await {
            Ok(Some(config)) => return config,
            Ok(None) => {}
            Err(e) => warn!("Legacy config migration failed: {}", e),
        }
    }

    AppConfig::default()
}
