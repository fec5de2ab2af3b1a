//! # chatbot-client
//!
//! Typed async client for the bilingual (English / Persian) course-assistant
//! chatbot API.
//!
//! ## Overview
//!
//! [`ChatClient`] turns the service's HTTP/JSON endpoints into async methods
//! returning typed values. It is a stateless, cloneable transport wrapper:
//! no retries, no caching, no local validation. Every failed call surfaces
//! as [`Error::Transport`].
//!
//! [`conversation::Conversation`] is an optional caller-side layer that keeps
//! the visible history, the current session and language, and applies the
//! rules a chat front end needs around the client.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatbot_client::{ChatClient, Language};
//!
//! #[tokio::main]
//! async fn main() -> chatbot_client::Result<()> {
//!     let client = ChatClient::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!
//!     let session = client.create_session(Language::En).await?;
//!     let reply = client.send_message("Course pricing?", &session).await?;
//!     println!("{}", reply.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and the [`ChatBackend`] seam |
//! | [`config`] | Base URL and timeout configuration |
//! | [`conversation`] | Caller-side conversation state |
//! | [`transport`] | JSON-over-HTTP transport and [`TransportError`] |
//! | [`types`] | Sessions, messages, replies, knowledge entries |

pub mod client;
pub mod config;
pub mod conversation;
pub mod transport;
pub mod types;

pub use client::{ChatBackend, ChatClient, ChatClientBuilder};
pub use config::ClientConfig;
pub use conversation::{Conversation, PendingTurn, SendOutcome};
pub use transport::TransportError;
pub use types::{
    ChatReply, HealthStatus, KnowledgeCategory, KnowledgeEntry, Language, Message, MessageRole,
    NewKnowledgeEntry, Session, SessionId,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
