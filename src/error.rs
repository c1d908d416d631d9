use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Store pool error: {0}")]
    StorePool(#[from] deadpool_redis::PoolError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("URL not found: {0}")]
    NotFound(String),

    #[error("Failed to generate unique short code after {0} attempts")]
    ExhaustedRetries(u32),

    #[error("Upstream request failed: {0}")]
    UpstreamFailure(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Environment variable missing: {0}")]
    MissingEnvVar(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and client-facing message for this error.
    ///
    /// Internal details are logged here and never returned to the caller.
    fn status_and_message(&self) -> (StatusCode, String, &'static str) {
        match self {
            AppError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, message.clone(), "INVALID_INPUT")
            }
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "URL not found".to_string(),
                "NOT_FOUND",
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                self.to_string(),
                "METHOD_NOT_ALLOWED",
            ),
            AppError::ExhaustedRetries(attempts) => {
                tracing::error!(attempts, "Short code space exhausted within retry bound");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate unique short code".to_string(),
                    "EXHAUSTED_RETRIES",
                )
            }
            AppError::UpstreamFailure(e) => {
                tracing::error!("Upstream failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upstream service request failed".to_string(),
                    "UPSTREAM_FAILURE",
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error occurred".to_string(),
                    "STORE_ERROR",
                )
            }
            AppError::StorePool(e) => {
                tracing::error!("Store pool error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error occurred".to_string(),
                    "STORE_ERROR",
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Data serialization error".to_string(),
                    "SERIALIZATION_ERROR",
                )
            }
            _ => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        }
    }

    /// Render the error as a plain-text response, used by the redirect routes.
    pub fn into_text_response(self) -> Response {
        let (status, message, _) = self.status_and_message();
        (status, message).into_response()
    }
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, error_code) = self.status_and_message();

        let body = json!({
            "error": error_message,
            "code": error_code,
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for AppResult
pub type AppResult<T> = Result<T, AppError>;
