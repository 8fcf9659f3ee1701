//! Error types for Chat Assist.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request carried no `message` field. Rejected before reaching the
    /// state machine.
    #[error("Message is required")]
    MissingMessage,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl IntoResponse for Error {
    /// Translate error kinds to the HTTP contract: validation errors are
    /// client errors, everything else surfaces as a server error carrying
    /// the failure description.
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Error::MissingMessage => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
