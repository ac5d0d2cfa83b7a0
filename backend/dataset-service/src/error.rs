/// Error types for Dataset Service
///
/// Handlers only ever return the four variants below. Causes that do not fit
/// them are logged where they happen and collapse to `Internal`, whose message
/// is the only thing a client sees.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for dataset-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Message returned for every request rejected before reaching a handler
pub const VALIDATION_DETAIL: &str = "Error campos en el request body";

/// Application error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No rows to return
    NotFound(String),

    /// Invalid filter value or request that failed schema validation
    UnprocessableEntity(String),

    /// Empty batch, malformed data, uniqueness conflict
    BadRequest(String),

    /// Catch-all; the original cause is never part of the message
    Internal(String),
}

/// Wire shape of every error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl AppError {
    /// Schema validation failure with the fixed client-facing message
    pub fn validation() -> Self {
        AppError::UnprocessableEntity(VALIDATION_DETAIL.to_string())
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::UnprocessableEntity(msg)
            | AppError::BadRequest(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::UnprocessableEntity(msg) => write!(f, "Unprocessable entity: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.detail().to_string(),
        })
    }
}
