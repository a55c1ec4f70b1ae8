use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::database::StoreError;

/// Errors surfaced by request handlers.
///
/// Each variant maps to exactly one HTTP status; the payload is the message
/// returned to the client (or, for `Internal`, the underlying store error).
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    /// Client-facing message for the `message` field of the error body.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
            AppError::Internal(_) => "Internal server error",
        }
    }

    /// Logs the error at a level matching its severity and hands it back,
    /// so handlers can write `.map_err(|e| e.log("..."))`.
    pub fn log(self, context: &str) -> Self {
        match &self {
            AppError::Internal(detail) => log::error!("❌ {} failed: {}", context, detail),
            other => log::warn!("⚠️  {} rejected: {}", context, other),
        }
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Internal(detail) => serde_json::json!({
                "message": self.message(),
                "error": detail,
            }),
            _ => serde_json::json!({ "message": self.message() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}
