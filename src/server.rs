//! REST surface — the HTTP contract over the dialogue engine.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use crate::dialogue::{DialogueEngine, SessionStore};
use crate::error::Error;
use crate::response::Response;

/// Shared state for chat routes. The serving component owns the store's
/// lifecycle; the engine only consults it.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DialogueEngine>,
    pub store: Arc<SessionStore>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Required free text. Optional here so its absence maps to the
    /// contract's 400 instead of a deserialization rejection.
    pub message: Option<String>,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    pub user_data: Option<HashMap<String, String>>,
}

/// Body of `POST /api/reset`.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_session_id() -> String {
    "default".to_string()
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Chatbot API is running",
    }))
}

/// POST /api/chat
///
/// Runs one message through the dialogue engine for the given session.
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<Response>, Error> {
    let message = req.message.ok_or(Error::MissingMessage)?;
    debug!(session_id = %req.session_id, "chat request");
    let response = state
        .engine
        .respond(&message, &req.session_id, req.user_data)
        .await?;
    Ok(Json(response))
}

/// POST /api/reset
///
/// Drops the session so the next message starts a fresh conversation.
async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Json<serde_json::Value> {
    state.store.reset(&req.session_id).await;
    Json(serde_json::json!({ "message": "Session reset successfully" }))
}

/// Build the Axum router with the chat REST routes.
pub fn chat_routes(engine: Arc<DialogueEngine>, store: Arc<SessionStore>) -> Router {
    let state = AppState { engine, store };

    Router::new()
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/reset", post(reset))
        .with_state(state)
}
