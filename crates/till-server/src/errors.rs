//! HTTP error mapping.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use till_core::StorageError;

/// Surface-level errors, each mapping to one response status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("unknown record table: {0}")]
    UnknownTable(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("storage task cancelled")]
    Cancelled,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotAnObject => HttpResponse::BadRequest().json(ErrorResponse {
                error: self.to_string(),
                code: "BAD_REQUEST",
            }),
            ApiError::UnknownTable(_) => HttpResponse::NotFound().json(ErrorResponse {
                error: self.to_string(),
                code: "TABLE_NOT_FOUND",
            }),
            ApiError::Storage(StorageError::TableNotFound { .. }) => {
                HttpResponse::NotFound().json(ErrorResponse {
                    error: self.to_string(),
                    code: "TABLE_NOT_FOUND",
                })
            }
            // Transient backend failures: the caller retries with its own
            // backoff, this layer never does.
            ApiError::Storage(err) if err.is_transient() => {
                HttpResponse::ServiceUnavailable().json(ErrorResponse {
                    error: self.to_string(),
                    code: "STORAGE_UNAVAILABLE",
                })
            }
            _ => HttpResponse::InternalServerError().json(ErrorResponse {
                error: self.to_string(),
                code: "INTERNAL_ERROR",
            }),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
