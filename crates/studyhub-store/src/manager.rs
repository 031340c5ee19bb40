//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use studyhub_core::config::state::StateConfig;
use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::traits::store::StateStore;

use crate::file::FileStateStore;
use crate::memory::MemoryStateStore;

/// State manager that wraps the configured state provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner state provider.
    inner: Arc<dyn StateStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub fn new(config: &StateConfig) -> AppResult<Self> {
        let inner: Arc<dyn StateStore> = match config.provider.as_str() {
            "file" => {
                info!(path = %config.path, "Initializing file state provider");
                Arc::new(FileStateStore::new(&config.path))
            }
            "memory" => {
                info!("Initializing in-memory state provider");
                Arc::new(MemoryStateStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown state provider: '{other}'. Supported: file, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn StateStore>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl StateStore for StoreManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }
}
