//! Integration tests for chat HTTP endpoints.
//!
//! These tests verify:
//! 1. Messages round-trip through the assistant and are stored per session
//! 2. Sessions are private to their owner
//! 3. Expired sessions are unreachable

mod common;

use std::str::FromStr;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, TestDeps};
use skillzup::adapters::ai::MockAIProvider;
use skillzup::domain::chat::{ChatMessage, ChatSession};
use skillzup::domain::foundation::{ChatSessionId, Timestamp, UserId};
use skillzup::ports::{AIError, ChatSessionRepository};

#[tokio::test]
async fn chat_requires_session() {
    let app = TestApp::new();

    let response = app.post("/api/chat", json!({"message": "hi"}), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Unauthorized");
}

#[tokio::test]
async fn blank_message_is_400() {
    let app = TestApp::new();
    let (cookie, _) = app.signup("chatty").await;

    let response = app
        .post("/api/chat", json!({"message": "   "}), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Message required");
}

#[tokio::test]
async fn conversation_continues_in_same_session() {
    let ai = MockAIProvider::new()
        .with_response("Ownership moves values.")
        .with_response("Borrowing lends them.");
    let app = TestApp::with_deps(TestDeps {
        ai,
        ..TestDeps::default()
    });
    let (cookie, _) = app.signup("learner").await;

    let first = app
        .post("/api/chat", json!({"message": "What is ownership?"}), Some(&cookie))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["reply"], "Ownership moves values.");
    let session_id = first.body["sessionId"].as_str().unwrap().to_string();

    let second = app
        .post(
            "/api/chat",
            json!({"message": "And borrowing?", "sessionId": session_id}),
            Some(&cookie),
        )
        .await;
    assert_eq!(second.body["sessionId"], session_id.as_str());

    // Second call saw the first exchange as history.
    let calls = app.ai.get_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].messages.len(), 3);

    let transcript = app
        .get(&format!("/api/chat/{}", session_id), Some(&cookie))
        .await;
    assert_eq!(transcript.status, StatusCode::OK);
    let messages = transcript.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[3]["content"], "Borrowing lends them.");

    let list = app.get("/api/chat", Some(&cookie)).await;
    let sessions = list.body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["sessionId"], session_id.as_str());
    assert_eq!(sessions[0]["messageCount"], 4);
    assert!(sessions[0]["expiresAt"].is_string());
}

#[tokio::test]
async fn assistant_failure_is_500_and_nothing_is_stored() {
    let ai = MockAIProvider::new().with_error(AIError::unavailable("overloaded"));
    let app = TestApp::with_deps(TestDeps {
        ai,
        ..TestDeps::default()
    });
    let (cookie, _) = app.signup("unlucky").await;

    let response = app
        .post("/api/chat", json!({"message": "hello"}), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Internal Server Error");

    let list = app.get("/api/chat", Some(&cookie)).await;
    assert_eq!(list.body["sessions"], json!([]));
}

#[tokio::test]
async fn other_users_session_is_not_visible() {
    let app = TestApp::new();
    let (alice, _) = app.signup("alice").await;
    let (bob, _) = app.signup("bob_b").await;

    let first = app
        .post("/api/chat", json!({"message": "secret plans"}), Some(&alice))
        .await;
    let session_id = first.body["sessionId"].as_str().unwrap().to_string();

    let peek = app
        .get(&format!("/api/chat/{}", session_id), Some(&bob))
        .await;
    assert_eq!(peek.status, StatusCode::NOT_FOUND);
    assert_eq!(peek.body["error"], "Chat not found");

    // Reusing someone else's id starts a fresh session instead.
    let hijack = app
        .post(
            "/api/chat",
            json!({"message": "hi", "sessionId": session_id}),
            Some(&bob),
        )
        .await;
    assert_eq!(hijack.status, StatusCode::OK);
    assert_ne!(hijack.body["sessionId"], session_id.as_str());

    let delete = app
        .delete(&format!("/api/chat/{}", session_id), Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_session() {
    let app = TestApp::new();
    let (cookie, _) = app.signup("tidy").await;
    let first = app
        .post("/api/chat", json!({"message": "hello"}), Some(&cookie))
        .await;
    let session_id = first.body["sessionId"].as_str().unwrap().to_string();

    let deleted = app
        .delete(&format!("/api/chat/{}", session_id), Some(&cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Chat deleted successfully");

    let again = app
        .get(&format!("/api/chat/{}", session_id), Some(&cookie))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_older_than_seven_days_is_unreachable() {
    let app = TestApp::new();
    let (cookie, user_id) = app.signup("oldtimer").await;
    let user_id = UserId::from_str(&user_id).unwrap();

    let created = Timestamp::now().add_days(-8);
    let mut stale = ChatSession::start(ChatSessionId::new(), user_id, created, 7);
    stale.push(ChatMessage::user("old question", created));
    app.chat_sessions.create(&stale).await.unwrap();

    let fetched = app
        .get(&format!("/api/chat/{}", stale.id), Some(&cookie))
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let list = app.get("/api/chat", Some(&cookie)).await;
    assert_eq!(list.body["sessions"], json!([]));

    let removed = app.chat_sessions.purge_expired(Timestamp::now()).await.unwrap();
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn malformed_session_id_is_404() {
    let app = TestApp::new();
    let (cookie, _) = app.signup("typo").await;

    let response = app.get("/api/chat/not-a-uuid", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
