//! In-memory state store, used by tests and the `"memory"` provider.

use async_trait::async_trait;
use dashmap::DashMap;

use studyhub_core::result::AppResult;
use studyhub_core::traits::store::StateStore;

/// In-memory state provider. Contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    /// Key → serialized value.
    entries: DashMap<String, String>,
}

impl MemoryStateStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|r| r.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
