//! HTTP handlers for chat endpoints.
//!
//! Every chat route requires a session; the caller only ever sees their
//! own conversations.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, ApiJson, AppState};
use crate::application::handlers::chat::{
    DeleteChatSessionCommand, GetChatSessionQuery, ListChatSessionsQuery, SendChatMessageCommand,
};

use super::dto::{
    DeletedResponse, SendMessageRequest, SendMessageResponse, SessionListResponse,
    SessionSummaryResponse, TranscriptResponse,
};

/// POST /api/chat - Send a message and get the assistant's reply
pub async fn send_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .send_chat_message_handler()
        .handle(SendChatMessageCommand {
            user_id: user.id,
            message: request.message,
            session_id: request.session_id,
        })
        .await?;

    Ok(Json(SendMessageResponse {
        success: true,
        reply: result.reply,
        session_id: result.session_id.to_string(),
    }))
}

/// GET /api/chat - List the caller's live sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let summaries = state
        .list_chat_sessions_handler()
        .handle(ListChatSessionsQuery { user_id: user.id })
        .await?;

    Ok(Json(SessionListResponse {
        success: true,
        sessions: summaries.into_iter().map(SessionSummaryResponse::from).collect(),
    }))
}

/// GET /api/chat/:id - Full transcript of one session
pub async fn get_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .get_chat_session_handler()
        .handle(GetChatSessionQuery {
            user_id: user.id,
            session_id,
        })
        .await?;

    Ok(Json(TranscriptResponse {
        success: true,
        messages,
    }))
}

/// DELETE /api/chat/:id - Delete one session
pub async fn delete_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_chat_session_handler()
        .handle(DeleteChatSessionCommand {
            user_id: user.id,
            session_id,
        })
        .await?;

    Ok(Json(DeletedResponse {
        success: true,
        message: "Chat deleted successfully",
    }))
}
