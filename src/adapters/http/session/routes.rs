//! HTTP routes for therapy session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    chat, export_session, get_session, list_patient_sessions, session_insights, start_session,
    SessionHandlers,
};
use super::ws::{chat_ws_handler, ChatSocketState};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/sessions/start", post(start_session))
        .route("/sessions/chat", post(chat))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/export", get(export_session))
        .route("/sessions/:id/insights", get(session_insights))
        .route("/patients/:id/sessions", get(list_patient_sessions))
        .with_state(handlers)
}

/// Creates the WebSocket router for real-time chat.
pub fn chat_ws_routes(state: ChatSocketState) -> Router {
    Router::new()
        .route("/ws/:session_id", get(chat_ws_handler))
        .with_state(state)
}
