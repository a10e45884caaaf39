use async_trait::async_trait;

use crate::domain::entities::AppConfig;
use crate::domain::errors::ConfigResult;

/// Port for persisted viewer preferences
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored document, `None` when nothing was saved yet
    async fn load(&self) -> ConfigResult<Option<AppConfig>>;

    /// Replace the stored document
    async fn save(&self, config: &AppConfig) -> ConfigResult<()>;

    /// Forget the stored document
    async fn clear(&self) -> ConfigResult<()>;
}
