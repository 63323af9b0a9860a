//! Shared HTTP error mapping.
//!
//! Domain errors carry an `ErrorCode`; this module maps each code to an
//! HTTP status and a uniform JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Maps a domain error to its HTTP status.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::SessionCompleted
        | ErrorCode::EmptyConversation => StatusCode::BAD_REQUEST,
        ErrorCode::PatientNotFound
        | ErrorCode::SessionNotFound
        | ErrorCode::GoalNotFound
        | ErrorCode::HomeworkNotFound
        | ErrorCode::DiagnosisNotFound => StatusCode::NOT_FOUND,
        ErrorCode::AIProviderError
        | ErrorCode::ParseFailure
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a domain error as an HTTP response.
pub fn domain_error_response(error: DomainError) -> Response {
    let status = status_for(error.code);
    let details = if error.details.is_empty() {
        None
    } else {
        serde_json::to_value(&error.details).ok()
    };

    let body = ErrorResponse {
        code: error.code.to_string(),
        message: error.message,
        details,
    };

    (status, Json(body)).into_response()
}
