//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its mapping
//! to HTTP responses. Every failure reaching a client becomes a short
//! `{"error": ...}` body; nothing internal leaks out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::config::ConfigError;
use agendas_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the core repositories.
    #[error("{0}")]
    Port(#[from] PortError),

    /// A request that failed input validation before reaching a repository.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Represents a standard Input/Output error (e.g., binding to a socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Port(PortError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Port(PortError::Conflict(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Port(PortError::Storage(cause)) => {
                error!("Storage failure: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur serveur".to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            other => {
                error!("Unhandled API error: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur serveur".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
