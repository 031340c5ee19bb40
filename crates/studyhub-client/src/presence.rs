//! Presence endpoints: heartbeat, study flush, roster, status, rename,
//! departure notice.

use async_trait::async_trait;

use studyhub_core::result::AppResult;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::types::{Identity, RosterEntry, StatusMessage};

use crate::dto::request::{
    HeartbeatRequest, LeaveRequest, RenameRequest, StatusUpdateRequest, StudyUpdateRequest,
};
use crate::dto::response::{OutcomeResponse, RosterRow};
use crate::http::ApiClient;

#[async_trait]
impl PresenceBackend for ApiClient {
    async fn heartbeat(&self, identity: &Identity) -> AppResult<()> {
        let request = HeartbeatRequest {
            username: identity.as_str().to_string(),
        };
        self.post_json("/heartbeat", &request).await
    }

    async fn flush_study_minutes(&self, identity: &Identity, minutes: u64) -> AppResult<()> {
        debug_assert!(minutes > 0, "zero-minute flushes must never be sent");
        let request = StudyUpdateRequest {
            username: identity.as_str().to_string(),
            minutes,
        };
        self.post_json("/study/update", &request).await
    }

    async fn fetch_roster(&self) -> AppResult<Vec<RosterEntry>> {
        let rows: Vec<RosterRow> = self.get_json("/status").await?;
        Ok(rows.into_iter().map(RosterRow::into_entry).collect())
    }

    async fn set_status(&self, identity: &Identity, text: &StatusMessage) -> AppResult<()> {
        let request = StatusUpdateRequest {
            username: identity.as_str().to_string(),
            status_text: text.as_str().to_string(),
        };
        self.post_json("/user/status", &request).await
    }

    async fn rename(&self, old: &Identity, new: &Identity) -> AppResult<bool> {
        let request = RenameRequest {
            old_username: old.as_str().to_string(),
            new_username: new.as_str().to_string(),
        };
        let outcome: OutcomeResponse = self
            .post_json_any_status("/user/rename", &request)
            .await?;
        Ok(outcome.success)
    }

    async fn leave(&self, identity: &Identity) -> AppResult<()> {
        let request = LeaveRequest {
            username: identity.as_str().to_string(),
        };
        // Beacon-equivalent: a short dedicated timeout so teardown never
        // hangs on a dead network.
        self.post_json_with_timeout("/user/leave", &request, self.leave_timeout())
            .await
    }
}
