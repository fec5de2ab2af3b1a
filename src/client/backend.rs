//! Backend seam for callers that drive a conversation.

use async_trait::async_trait;

use crate::client::core::ChatClient;
use crate::types::{ChatReply, Language, SessionId};
use crate::Result;

/// The subset of chatbot operations a conversation needs.
///
/// Implemented by [`ChatClient`]; tests and embedders can supply their own.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn create_session(&self, language: Language) -> Result<SessionId>;

    async fn send_message(&self, text: &str, session_id: &SessionId) -> Result<ChatReply>;

    async fn rate_message(&self, message_id: &str, is_helpful: bool) -> Result<()>;
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn create_session(&self, language: Language) -> Result<SessionId> {
        ChatClient::create_session(self, language).await
    }

    async fn send_message(&self, text: &str, session_id: &SessionId) -> Result<ChatReply> {
        ChatClient::send_message(self, text, session_id).await
    }

    async fn rate_message(&self, message_id: &str, is_helpful: bool) -> Result<()> {
        ChatClient::rate_message(self, message_id, is_helpful).await
    }
}
