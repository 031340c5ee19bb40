//! Notification backend trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Notification;

/// Remote broadcast notification feed.
#[async_trait]
pub trait NotificationBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the most recent broadcasts, newest first.
    async fn fetch(&self, limit: u64) -> AppResult<Vec<Notification>>;
}
