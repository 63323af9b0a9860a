//! WebSocket endpoint for real-time therapy chat.
//!
//! Speaks the same conversation loop as the REST chat endpoint: each
//! incoming `{"message": ...}` frame advances the session and the full
//! turn outcome is sent back as one JSON frame.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{AdvanceSessionCommand, AdvanceSessionHandler};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::SessionPhase;

/// State for the chat WebSocket.
#[derive(Clone)]
pub struct ChatSocketState {
    pub advance_handler: Arc<AdvanceSessionHandler>,
}

/// Incoming client frame.
#[derive(Debug, Deserialize)]
struct ClientFrame {
    #[serde(default)]
    message: String,
}

/// Outgoing turn outcome.
#[derive(Debug, Serialize)]
struct TurnFrame {
    response: String,
    phase: SessionPhase,
    phase_changed: bool,
    conversation_count: u32,
    detected_symptoms: Vec<String>,
    session_completed: bool,
    crisis_detected: bool,
}

/// Outgoing error frame.
#[derive(Debug, Serialize)]
struct ErrorFrame {
    error: String,
}

/// GET /ws/:session_id - Upgrade to the chat WebSocket
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<i64>,
    State(state): State<ChatSocketState>,
) -> Response {
    let session_id = SessionId::new(session_id);
    ws.on_upgrade(move |socket| handle_chat_socket(socket, session_id, state))
}

async fn handle_chat_socket(mut socket: WebSocket, session_id: SessionId, state: ChatSocketState) {
    tracing::info!(session_id = %session_id, "chat WebSocket connected");

    while let Some(result) = socket.recv().await {
        let message = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(session_id = %session_id, "WebSocket error: {}", e);
                break;
            }
        };

        let frame: ClientFrame = match serde_json::from_str(&message) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(session_id = %session_id, "unparseable client frame: {}", e);
                continue;
            }
        };

        if frame.message.trim().is_empty() {
            continue;
        }

        let outcome = state
            .advance_handler
            .handle(AdvanceSessionCommand {
                session_id,
                message: frame.message,
            })
            .await;

        let reply = match outcome {
            Ok(result) => serde_json::to_string(&TurnFrame {
                response: result.response,
                phase: result.phase,
                phase_changed: result.phase_changed,
                conversation_count: result.conversation_count,
                detected_symptoms: result.detected_symptoms,
                session_completed: result.session_completed,
                crisis_detected: result.crisis_alert.is_some(),
            }),
            Err(e) => {
                let error = match e.code {
                    ErrorCode::SessionNotFound | ErrorCode::SessionCompleted => {
                        "Session not found or completed".to_string()
                    }
                    _ => e.message,
                };
                serde_json::to_string(&ErrorFrame { error })
            }
        };

        match reply {
            Ok(json) => {
                if socket.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, "failed to serialize frame: {}", e);
                break;
            }
        }
    }

    tracing::info!(session_id = %session_id, "chat WebSocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_frame_defaults_missing_message_to_empty() {
        let frame: ClientFrame = serde_json::from_str("{}").unwrap();
        assert!(frame.message.is_empty());
    }

    #[test]
    fn turn_frame_serializes_crisis_flag() {
        let frame = TurnFrame {
            response: "stay with me".to_string(),
            phase: SessionPhase::Therapy,
            phase_changed: false,
            conversation_count: 8,
            detected_symptoms: vec!["anxiety".to_string()],
            session_completed: false,
            crisis_detected: true,
        };

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["crisis_detected"], true);
        assert_eq!(json["phase"], "therapy");
    }
}
