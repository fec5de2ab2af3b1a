//! Conversation messages and assistant replies.

use super::session::SessionId;
use serde::{Deserialize, Deserializer, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// A single conversation entry.
///
/// User messages carry a locally generated id; assistant messages carry the
/// server id rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub content: String,
    #[serde(rename = "message_type", alias = "type")]
    pub role: MessageRole,
    pub timestamp: String,
    #[serde(
        rename = "response_time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub response_time_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_helpful: Option<bool>,
}

impl Message {
    fn local(id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            timestamp: now_rfc3339(),
            response_time_ms: None,
            sources: None,
            is_helpful: None,
        }
    }

    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::local(id, MessageRole::User, content).with_response_time(0.0)
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::local(id, MessageRole::Assistant, content)
    }

    pub fn system(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::local(id, MessageRole::System, content)
    }

    /// Build the assistant history entry for a reply, stamped with local time.
    pub fn from_reply(reply: &ChatReply) -> Self {
        Self {
            id: reply.message_id.clone(),
            content: reply.content.clone(),
            role: MessageRole::Assistant,
            timestamp: now_rfc3339(),
            response_time_ms: Some(reply.response_time_ms),
            sources: reply.sources.clone(),
            is_helpful: None,
        }
    }

    pub fn with_response_time(mut self, ms: f64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Assistant reply to a sent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(rename = "response")]
    pub content: String,
    pub session_id: SessionId,
    #[serde(deserialize_with = "id_string")]
    pub message_id: String,
    /// Server-measured latency, passed through as reported.
    #[serde(rename = "response_time")]
    pub response_time_ms: f64,
    /// `None` when the server omitted the field; an empty list is kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// The service sends numeric row ids; older payloads used strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
