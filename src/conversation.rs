//! Caller-side conversation state.
//!
//! The client itself is stateless. This module keeps what a chat front end
//! keeps: the current language, the session, the visible history and the
//! in-flight flag. It also applies the boundary rules:
//!
//! - a failed send keeps the user's message and appends a localized apology;
//! - switching language discards session and history together;
//! - a reply that arrives after a language switch is dropped.
//!
//! Sending can be driven in one step with [`Conversation::send`], or split
//! into [`Conversation::begin_send`] / [`Conversation::complete_send`] when the
//! request runs on another task.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::client::ChatBackend;
use crate::types::{ChatReply, Language, Message, SessionId};
use crate::{Error, Result};

/// Length shown to the user as a counter. Not enforced anywhere.
pub const ADVISORY_MAX_CHARS: usize = 500;

pub const WELCOME_MESSAGE_ID: &str = "welcome";

pub fn welcome_text(language: Language) -> &'static str {
    match language {
        Language::En => "Hello! I'm Matin Kafashian AI assistant. I can help you with Python programming, AI concepts, and my course information. How can I assist you today?",
        Language::Fa => "سلام! من دستیار هوش مصنوعی متین کفاشیان هستم. می‌تونم در برنامه‌نویسی پایتون، مفاهیم هوش مصنوعی و اطلاعات دوره‌هام کمک‌تون کنم. از کجا شروع کنیم؟",
    }
}

pub fn error_text(language: Language) -> &'static str {
    match language {
        Language::En => "I'm sorry, I encountered an error. Please try again.",
        Language::Fa => "متأسفم، خطایی رخ داد. لطفاً دوباره تلاش کنید.",
    }
}

/// Quick prompts offered under the input box.
pub fn suggestions(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => &["Course pricing?", "Contact info?", "AI course?", "AI projects?"],
        Language::Fa => &[
            "قیمت دوره چقدره؟",
            "شماره تماس شما چیه؟",
            "دوره هوش مصنوعی؟",
            "پروژه‌های AI؟",
        ],
    }
}

/// Characters left before the advisory limit; negative once exceeded.
pub fn chars_remaining(text: &str) -> i64 {
    ADVISORY_MAX_CHARS as i64 - text.chars().count() as i64
}

/// Millisecond-timestamp ids, bumped so two ids in one tick never collide.
#[derive(Debug, Default)]
struct LocalIds {
    last: i64,
}

impl LocalIds {
    fn next(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let id = if now > self.last { now } else { self.last + 1 };
        self.last = id;
        id.to_string()
    }
}

/// Ticket for a send that has been shown to the user but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    text: String,
    session_id: SessionId,
    generation: u64,
    user_message_id: String,
}

impl PendingTurn {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn user_message_id(&self) -> &str {
        &self.user_message_id
    }
}

/// Result of [`Conversation::send`].
#[derive(Debug)]
pub enum SendOutcome {
    /// Nothing was sent: blank text, a send already in flight, or no session.
    Skipped,
    /// The assistant reply was appended to history.
    Replied(Message),
    /// The request failed; an apology was appended instead.
    Failed(Error),
}

pub struct Conversation {
    backend: Arc<dyn ChatBackend>,
    language: Language,
    session_id: Option<SessionId>,
    messages: Vec<Message>,
    loading: bool,
    generation: u64,
    ids: LocalIds,
}

impl Conversation {
    pub fn new(backend: Arc<dyn ChatBackend>, language: Language) -> Self {
        Self {
            backend,
            language,
            session_id: None,
            messages: Vec::new(),
            loading: false,
            generation: 0,
            ids: LocalIds::default(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped on every language switch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_user())
    }

    /// Open a session for the current language and show the welcome message.
    ///
    /// On failure the conversation is left without a session, so sending
    /// stays disabled until a later `start` succeeds.
    pub async fn start(&mut self) -> Result<SessionId> {
        match self.backend.create_session(self.language).await {
            Ok(id) => {
                self.session_id = Some(id.clone());
                self.messages = vec![Message::assistant(
                    WELCOME_MESSAGE_ID,
                    welcome_text(self.language),
                )
                .with_response_time(0.0)];
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, language = %self.language, "Failed to initialize session");
                self.session_id = None;
                Err(e)
            }
        }
    }

    /// Discard session and history if `language` differs from the current one.
    ///
    /// Returns `false` when the language is unchanged. Replies still in
    /// flight for the old session will be ignored by [`Self::complete_send`].
    pub fn switch_language(&mut self, language: Language) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        self.messages.clear();
        self.session_id = None;
        self.loading = false;
        self.generation += 1;
        true
    }

    /// Switch language and open a fresh session for it.
    pub async fn change_language(&mut self, language: Language) -> Result<bool> {
        if !self.switch_language(language) {
            return Ok(false);
        }
        self.start().await?;
        Ok(true)
    }

    pub fn can_send(&self, text: &str) -> bool {
        !text.trim().is_empty() && !self.loading && self.session_id.is_some()
    }

    /// Show the user's message and mark a send as in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingTurn> {
        if !self.can_send(text) {
            debug!(
                has_message = !text.trim().is_empty(),
                is_loading = self.loading,
                has_session = self.session_id.is_some(),
                "Message not sent"
            );
            return None;
        }
        let session_id = self.session_id.clone()?;

        let id = self.ids.next();
        self.messages.push(Message::user(id.clone(), text));
        self.loading = true;

        Some(PendingTurn {
            text: text.to_string(),
            session_id,
            generation: self.generation,
            user_message_id: id,
        })
    }

    /// Apply the outcome of a pending send.
    ///
    /// Returns `false` (and changes nothing) if the turn belongs to a
    /// session discarded by a language switch.
    pub fn complete_send(&mut self, turn: &PendingTurn, result: &Result<ChatReply>) -> bool {
        if turn.generation != self.generation {
            debug!(
                session_id = %turn.session_id,
                "ignoring reply for a discarded session"
            );
            return false;
        }

        match result {
            Ok(reply) => {
                if reply.session_id != turn.session_id {
                    warn!(
                        sent = %turn.session_id,
                        received = %reply.session_id,
                        "reply carries a different session id"
                    );
                }
                self.messages.push(Message::from_reply(reply));
            }
            Err(e) => {
                error!(error = %e, "Failed to send message");
                let id = self.ids.next();
                self.messages.push(
                    Message::assistant(id, error_text(self.language)).with_response_time(0.0),
                );
            }
        }
        self.loading = false;
        true
    }

    /// Send `text` and record the reply (or an apology) in history.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        let Some(turn) = self.begin_send(text) else {
            return SendOutcome::Skipped;
        };

        let result = self
            .backend
            .send_message(turn.text(), turn.session_id())
            .await;
        self.complete_send(&turn, &result);

        match result {
            Ok(_) => match self.messages.last() {
                Some(msg) => SendOutcome::Replied(msg.clone()),
                None => SendOutcome::Skipped,
            },
            Err(e) => SendOutcome::Failed(e),
        }
    }

    /// Rate a reply. Errors are returned to the caller.
    pub async fn rate(&self, message_id: &str, is_helpful: bool) -> Result<()> {
        self.backend.rate_message(message_id, is_helpful).await
    }
}
