//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use advisor_core::{ConversationContext, Intent, Message};
use advisor_engine::{ChatSession, SessionId};
use tokio::sync::Mutex as AsyncMutex;

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
    pub active_sessions: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    pub context: ConversationContext,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: Intent,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    pub context: ConversationContext,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: SessionId,
    pub reply: Message,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub busy: bool,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, code: &str, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model: state.model_name.clone(),
        active_sessions: state.sessions.len(),
    })
}

/// Free-form chat endpoint
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    if payload.message.trim().is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "EMPTY_INPUT",
            "Message must not be blank",
        ));
    }

    let (id, handle) = resolve_session(&state, payload.session_id, &payload.context)?;
    let mut session = acquire(&handle)?;

    session.set_context(payload.context);
    require_wallet(&session)?;

    session.submit_input(&payload.message).await.map_err(|e| {
        tracing::error!(session = %id, error = %e, "chat failed");
        error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CHAT_ERROR",
            e.user_message(),
        )
    })?;

    Ok(Json(ChatResponse {
        session_id: id,
        reply: latest_reply(&session),
    }))
}

/// Suggested-action endpoint
pub async fn action_handler(
    State(state): State<AppState>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let (id, handle) = resolve_session(&state, payload.session_id, &payload.context)?;
    let mut session = acquire(&handle)?;

    session.set_context(payload.context);
    require_wallet(&session)?;

    session.submit_action(payload.action).await.map_err(|e| {
        tracing::error!(session = %id, action = %payload.action, error = %e, "action failed");
        error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ACTION_ERROR",
            e.user_message(),
        )
    })?;

    Ok(Json(ChatResponse {
        session_id: id,
        reply: latest_reply(&session),
    }))
}

/// Return the full transcript for a session
pub async fn session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, HandlerError> {
    let id = SessionId::parse(&id)
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "BAD_SESSION_ID", "Malformed session id"))?;

    let handle = state
        .sessions
        .get(id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Unknown session"))?;

    let session = handle.lock().await;

    Ok(Json(SessionResponse {
        session_id: id,
        busy: session.is_busy(),
        messages: session.transcript().messages().to_vec(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Look up the session, or open a fresh one when no id was sent
fn resolve_session(
    state: &AppState,
    id: Option<SessionId>,
    context: &ConversationContext,
) -> Result<(SessionId, Arc<AsyncMutex<ChatSession>>), HandlerError> {
    match id {
        Some(id) => state
            .sessions
            .get(id)
            .map(|handle| (id, handle))
            .ok_or_else(|| error(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Unknown session")),
        None => Ok(state.sessions.open(context.clone(), state.composer.clone())),
    }
}

/// Take the session lock without waiting; a held lock means a reply is
/// already being composed for this session.
fn acquire(
    handle: &Arc<AsyncMutex<ChatSession>>,
) -> Result<tokio::sync::MutexGuard<'_, ChatSession>, HandlerError> {
    handle.try_lock().map_err(|_| {
        error(
            StatusCode::CONFLICT,
            "SESSION_BUSY",
            "A reply is already being composed for this session",
        )
    })
}

fn require_wallet(session: &ChatSession) -> Result<(), HandlerError> {
    if session.context().wallet_connected {
        Ok(())
    } else {
        Err(error(
            StatusCode::BAD_REQUEST,
            "WALLET_DISCONNECTED",
            "Connect a wallet before chatting",
        ))
    }
}

fn latest_reply(session: &ChatSession) -> Message {
    session
        .transcript()
        .last()
        .cloned()
        .unwrap_or_else(advisor_engine::ResponseComposer::apology)
}
