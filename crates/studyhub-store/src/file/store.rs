//! File-backed state store: one JSON object per client.
//!
//! Writes go through a temp file and rename so a crash mid-write never
//! leaves a truncated state file behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::traits::store::StateStore;

/// File-backed state provider.
///
/// The whole store is a single flat JSON object; every operation is a
/// mutex-guarded read-modify-write. State files are small (a handful of
/// keys), so rewriting the file per set is fine.
#[derive(Debug)]
pub struct FileStateStore {
    /// Path of the state file.
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl FileStateStore {
    /// Create a store over the given state file. The file and its parent
    /// directories are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Load the state map from disk.
    ///
    /// A missing file is an empty map. A malformed file is reported once
    /// and then treated as empty, so one corrupted write does not brick
    /// the client.
    async fn load(&self) -> AppResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => Ok(map),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "State file is malformed, starting empty");
                    Ok(HashMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::with_source(
                studyhub_core::error::ErrorKind::Storage,
                format!("Failed to read state file {}", self.path.display()),
                e,
            )),
        }
    }

    /// Persist the state map via temp file + rename.
    async fn save(&self, map: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = tmp_path(&self.path);
        let json = serde_json::to_string_pretty(map)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let map = self.load().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.save(&map).await?;
        }
        Ok(())
    }
}
