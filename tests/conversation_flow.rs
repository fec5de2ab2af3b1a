//! Conversation layer driven by a real ChatClient against a mock backend.

mod support;

use chatbot_client::conversation::{error_text, welcome_text};
use chatbot_client::{Conversation, Language, MessageRole, SendOutcome};
use std::sync::Arc;
use support::MockBackend;

#[tokio::test]
async fn test_server_error_keeps_user_message() {
    let mut backend = MockBackend::new().await;
    let _s = backend.mock_create_session("en", "session-1").await;
    let _m = backend
        .mock_json("POST", "/send-message/", 500, r#"{"error":"internal"}"#)
        .await;

    let mut conv = Conversation::new(Arc::new(backend.client()), Language::En);
    conv.start().await.unwrap();

    let outcome = conv.send("Course pricing?").await;
    let SendOutcome::Failed(err) = outcome else {
        panic!("expected the send to fail");
    };
    assert!(err.is_transport());

    let msgs = conv.messages();
    assert_eq!(msgs.len(), 3);
    assert_eq!(conv.last_user_message().unwrap().content, "Course pricing?");
    assert_eq!(msgs[2].role, MessageRole::Assistant);
    assert_eq!(msgs[2].content, error_text(Language::En));
    assert!(!conv.is_loading());
    assert!(conv.can_send("try again"));
}

#[tokio::test]
async fn test_language_switch_gets_new_session() {
    let mut backend = MockBackend::new().await;
    let en = backend.mock_create_session("en", "session-en").await;
    let fa = backend.mock_create_session("fa", "session-fa").await;
    let _m = backend
        .mock_json(
            "POST",
            "/send-message/",
            200,
            r#"{"response":"Hi","session_id":"session-en","message_id":3,"response_time":1}"#,
        )
        .await;

    let mut conv = Conversation::new(Arc::new(backend.client()), Language::En);
    let first = conv.start().await.unwrap();
    assert!(matches!(conv.send("hello").await, SendOutcome::Replied(_)));
    assert_eq!(conv.messages().len(), 3);

    assert!(conv.change_language(Language::Fa).await.unwrap());
    let second = conv.session_id().cloned().unwrap();

    assert_ne!(first, second);
    assert_eq!(second.as_str(), "session-fa");
    assert_eq!(conv.messages().len(), 1);
    assert_eq!(conv.messages()[0].content, welcome_text(Language::Fa));
    en.assert_async().await;
    fa.assert_async().await;
}

#[tokio::test]
async fn test_failed_session_creation_blocks_sending() {
    let mut backend = MockBackend::new().await;
    let _m = backend
        .mock_json("POST", "/create-session/", 500, r#"{"error":"db"}"#)
        .await;

    let mut conv = Conversation::new(Arc::new(backend.client()), Language::Fa);
    assert!(conv.start().await.is_err());
    assert!(conv.session_id().is_none());
    assert!(matches!(conv.send("سلام").await, SendOutcome::Skipped));
    assert!(conv.messages().is_empty());
}
