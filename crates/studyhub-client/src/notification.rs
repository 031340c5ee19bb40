//! Broadcast notification feed endpoint.

use async_trait::async_trait;

use studyhub_core::result::AppResult;
use studyhub_core::traits::notification::NotificationBackend;
use studyhub_core::types::Notification;

use crate::dto::response::NotificationRow;
use crate::http::ApiClient;

#[async_trait]
impl NotificationBackend for ApiClient {
    async fn fetch(&self, limit: u64) -> AppResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = self
            .get_json(&format!("/notifications?limit={limit}"))
            .await?;
        Ok(rows
            .into_iter()
            .map(NotificationRow::into_notification)
            .collect())
    }
}
