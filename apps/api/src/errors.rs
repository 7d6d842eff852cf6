use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session limit of {0} reached")]
    SessionLimit(usize),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SessionLimit(_) => {
                tracing::warn!("{self}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SESSION_LIMIT",
                    "Too many open editing sessions, try again later".to_string(),
                )
            }
            AppError::Export(e) => match e {
                ExportError::InvalidOptions(msg) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_EXPORT_OPTIONS",
                    msg.clone(),
                ),
                ExportError::UnsupportedText { character, context } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNSUPPORTED_TEXT",
                    format!(
                        "PDF export cannot draw {character:?} ({context}); use the print export instead"
                    ),
                ),
                ExportError::BackendUnavailable(msg) => {
                    tracing::error!("Export backend unavailable: {msg}");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "EXPORT_BACKEND_UNAVAILABLE",
                        "The export backend is unavailable".to_string(),
                    )
                }
                ExportError::Timeout { seconds } => {
                    tracing::error!("Export timed out after {seconds}s");
                    (
                        StatusCode::GATEWAY_TIMEOUT,
                        "EXPORT_TIMEOUT",
                        format!("Export did not finish within {seconds}s"),
                    )
                }
                ExportError::Render(msg) | ExportError::Template(msg) => {
                    tracing::error!("Export failed: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "EXPORT_FAILED",
                        "The document could not be exported".to_string(),
                    )
                }
            },
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
