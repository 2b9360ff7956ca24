use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::carousel::state::CarouselError;
use crate::resume::builder::BuildError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Generation(#[from] BuildError),

    #[error(transparent)]
    Carousel(#[from] CarouselError),

    #[error("Chat is not configured")]
    ChatUnavailable,

    #[error("The chat service did not answer")]
    ChatFailed,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(BuildError::InProgress) => (
                StatusCode::CONFLICT,
                "GENERATION_IN_PROGRESS",
                self.to_string(),
            ),
            AppError::Generation(e @ BuildError::DocumentGenerationFailed { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DOCUMENT_GENERATION_FAILED",
                e.to_string(),
            ),
            AppError::Carousel(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CAROUSEL_UNAVAILABLE",
                e.to_string(),
            ),
            AppError::ChatUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CHAT_UNAVAILABLE",
                "Chat is not configured".to_string(),
            ),
            AppError::ChatFailed => (
                StatusCode::BAD_GATEWAY,
                "CHAT_ERROR",
                self.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
