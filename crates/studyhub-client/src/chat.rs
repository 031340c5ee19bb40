//! Chat endpoints: history, send, typing indicators.

use async_trait::async_trait;

use studyhub_core::result::AppResult;
use studyhub_core::traits::chat::ChatBackend;
use studyhub_core::types::{ChatMessage, Identity, TypingUser};

use crate::dto::request::{ChatSendRequest, TypingRequest};
use crate::http::ApiClient;

#[async_trait]
impl ChatBackend for ApiClient {
    async fn history(&self, room: &str) -> AppResult<Vec<ChatMessage>> {
        self.get_json(&format!("/chat/history?room={room}")).await
    }

    async fn send(&self, room: &str, identity: &Identity, message: &str) -> AppResult<()> {
        let request = ChatSendRequest {
            room_id: room.to_string(),
            username: identity.as_str().to_string(),
            message: message.to_string(),
        };
        self.post_json("/chat/send", &request).await
    }

    async fn notify_typing(&self, room: &str, identity: &Identity) -> AppResult<()> {
        let request = TypingRequest {
            room_id: room.to_string(),
            username: identity.as_str().to_string(),
        };
        self.post_json("/chat/typing", &request).await
    }

    async fn typing_users(&self, room: &str) -> AppResult<Vec<TypingUser>> {
        self.get_json(&format!("/chat/typing?room={room}")).await
    }
}
