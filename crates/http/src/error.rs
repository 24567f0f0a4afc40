//! Error handling for the STACKS HTTP layer

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Field name to ordered violation messages, as reported to clients.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload failed schema validation. All violations are reported at once.
    #[error("validation error")]
    Validation { errors: FieldErrors },

    /// Write conflicts with existing state (duplicate username). The public
    /// contract reports these as 400, not 409.
    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error from collected field violations
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Not-found error for an entity lookup by id
    pub fn entity_not_found(id: i64) -> Self {
        Self::not_found(format!("Entity {id} doesn't exist"))
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation { errors } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation error", "errors": errors }),
            ),
            AppError::Conflict { message } => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, json!({ "message": message }))
            }
            AppError::Unauthorized { message } => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "unhandled fault");

                // In production, hide internal error details
                let message = if cfg!(debug_assertions) {
                    err.to_string()
                } else {
                    "An internal server error occurred".to_string()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": message }),
                )
            }
        };

        tracing::debug!(status = status.as_u16(), "request error");

        (status, Json(body)).into_response()
    }
}
