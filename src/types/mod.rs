//! # Types Module
//!
//! Value objects exchanged with the chatbot service. None of them are mutated
//! by the client after they are returned; every call produces fresh values.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SessionId`] | Opaque, server-assigned session identifier |
//! | [`Language`] | Conversation language (`en` or `fa`) |
//! | [`Session`] | Server session record with message history |
//! | [`Message`] | A single conversation entry |
//! | [`ChatReply`] | Assistant reply to a sent message |
//! | [`KnowledgeEntry`] | Read-only knowledge base document |
//!
//! ## Example
//!
//! ```rust
//! use chatbot_client::types::{Language, Message};
//!
//! let lang: Language = "fa".parse().unwrap();
//! assert_eq!(lang.code(), "fa");
//!
//! let msg = Message::user("1700000000000", "Course pricing?");
//! assert!(msg.is_user());
//! ```

pub mod knowledge;
pub mod message;
pub mod session;

pub use knowledge::{KnowledgeCategory, KnowledgeEntry, NewKnowledgeEntry};
pub use message::{ChatReply, Message, MessageRole};
pub use session::{HealthStatus, Language, Session, SessionId};
