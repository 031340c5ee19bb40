//! Community timer endpoints.

use chrono::Utc;

use studyhub_core::result::AppResult;
use studyhub_core::types::GlobalTimer;

use crate::dto::response::TimerStatusResponse;
use crate::http::ApiClient;

impl ApiClient {
    /// Fetch the shared community timer. A missing start time falls back
    /// to "now", matching the remote service's reset semantics.
    pub async fn timer_status(&self) -> AppResult<GlobalTimer> {
        let response: TimerStatusResponse = self.get_json("/timer/status").await?;
        Ok(GlobalTimer {
            start_time_ms: response
                .start_time
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
        })
    }

    /// Reset the shared community timer for everyone.
    pub async fn timer_reset(&self) -> AppResult<()> {
        self.post_json("/timer/reset", &serde_json::json!({})).await
    }
}
