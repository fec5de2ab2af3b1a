use crate::config::ClientConfig;
use crate::transport::{HttpTransport, TransportError};
use crate::types::{
    ChatReply, HealthStatus, KnowledgeEntry, Language, NewKnowledgeEntry, Session, SessionId,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::builder::ChatClientBuilder;

/// Stateless client for the chatbot API.
///
/// Holds nothing but its transport configuration, fixed at construction.
/// Calls never retry, never cache, and may run concurrently; each resolves
/// independently.
#[derive(Debug, Clone)]
pub struct ChatClient {
    transport: HttpTransport,
    config: ClientConfig,
}

#[derive(Serialize)]
struct CreateSessionBody {
    language: Language,
}

#[derive(Deserialize)]
struct CreatedSession {
    session_id: SessionId,
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    message: &'a str,
    session_id: &'a SessionId,
}

#[derive(Serialize)]
struct RateMessageBody {
    is_helpful: bool,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

impl ChatClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        info!(api_root = transport.api_root(), "chatbot client ready");
        Ok(Self { transport, config })
    }

    /// Build a client from `CHATBOT_API_URL` / `CHATBOT_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open a new server session in `language` and return its id.
    pub async fn create_session(&self, language: Language) -> Result<SessionId> {
        let res: Result<SessionId> = match self
            .transport
            .post_json::<CreatedSession, _>(&["create-session"], &CreateSessionBody { language })
            .await
        {
            Ok(created) if created.session_id.is_empty() => Err(TransportError::InvalidResponse(
                "server returned an empty session_id".into(),
            )
            .into()),
            Ok(created) => Ok(created.session_id),
            Err(e) => Err(e),
        };
        logged("create session", res)
    }

    /// Send `text` within `session_id` and return the assistant reply.
    ///
    /// The text is forwarded as-is; length limits are a UI concern.
    pub async fn send_message(&self, text: &str, session_id: &SessionId) -> Result<ChatReply> {
        let res: Result<ChatReply> = self
            .transport
            .post_json(
                &["send-message"],
                &SendMessageBody {
                    message: text,
                    session_id,
                },
            )
            .await;
        logged("send message", res)
    }

    /// Fetch a session with its full history.
    pub async fn get_session(&self, session_id: &SessionId) -> Result<Session> {
        let res: Result<Session> = self
            .transport
            .get_json(&["session", session_id.as_str()])
            .await;
        logged("get session", res)
    }

    /// Record whether a reply was helpful. Failures are logged and returned.
    pub async fn rate_message(&self, message_id: &str, is_helpful: bool) -> Result<()> {
        let res: Result<()> = self
            .transport
            .post_discard(
                &["rate-message", message_id],
                &RateMessageBody { is_helpful },
            )
            .await;
        logged("rate message", res)
    }

    pub async fn list_knowledge(&self) -> Result<Vec<KnowledgeEntry>> {
        let res: Result<Vec<KnowledgeEntry>> = self.transport.get_json(&["knowledge"]).await;
        logged("get knowledge base", res)
    }

    /// Free-text search; ranking and filtering happen server-side.
    pub async fn search_knowledge(&self, query: &str) -> Result<Vec<KnowledgeEntry>> {
        let res: Result<Vec<KnowledgeEntry>> = self
            .transport
            .get_json_with_query(&["knowledge", "search"], &SearchQuery { q: query })
            .await;
        logged("search knowledge", res)
    }

    pub async fn add_knowledge_entry(&self, entry: &NewKnowledgeEntry) -> Result<KnowledgeEntry> {
        let res: Result<KnowledgeEntry> = self.transport.post_json(&["knowledge", "add"], entry).await;
        logged("add knowledge entry", res)
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let res: Result<Vec<Session>> = self.transport.get_json(&["sessions"]).await;
        logged("get sessions", res)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let res: Result<HealthStatus> = self.transport.get_json(&["health"]).await;
        logged("check health", res)
    }
}

fn logged<T>(operation: &str, res: Result<T>) -> Result<T> {
    if let Err(e) = &res {
        error!(operation, error = %e, "Failed to {}", operation);
    }
    res
}
