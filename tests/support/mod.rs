//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use chatbot_client::ChatClient;
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const API: &str = "/api/chatbot";

/// Test fixture that owns a mock chatbot backend
pub struct MockBackend {
    pub server: ServerGuard,
}

impl MockBackend {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn base_url(&self) -> String {
        self.server.url()
    }

    /// Client pointed at the mock server
    pub fn client(&self) -> ChatClient {
        ChatClient::builder()
            .base_url(self.base_url())
            .build()
            .expect("client should build against mock server")
    }

    pub async fn mock_create_session(&mut self, language: &str, session_id: &str) -> Mock {
        self.server
            .mock("POST", format!("{API}/create-session/").as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({ "language": language })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(session_body(session_id, &[]).to_string())
            .create_async()
            .await
    }

    /// JSON response for `method path` with the given status
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, format!("{API}{path}").as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn session_body(session_id: &str, messages: &[serde_json::Value]) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "session_id": session_id,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
        "is_active": true,
        "messages": messages,
    })
}

pub fn knowledge_body(id: i64, title: &str, category: &str, priority: i32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "content": format!("{title} content"),
        "category": category,
        "keywords": "python,course",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "is_active": true,
        "priority": priority,
    })
}
