use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API Error with rich context and automatic error trait implementations
///
/// Design: Uses thiserror for ergonomic error handling with context.
/// Each variant carries meaningful context to help with debugging.
#[derive(Error, Debug)]
pub enum ApiError {
    // Resolution errors 3xxx
    #[error("Unable to determine the current location or situation")]
    LocationUnresolved,

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    // Upstream provider errors 51xx
    #[error("Upstream call to {provider} failed: {message}")]
    UpstreamTransport { provider: &'static str, message: String },

    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse { provider: &'static str, message: String },

    #[error("The AI service did not generate any sentences")]
    EmptyGeneration,

    // Database errors - auto-convert from sqlx::Error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Helper to create upstream transport error
    pub fn upstream(provider: &'static str, message: impl Into<String>) -> Self {
        Self::UpstreamTransport { provider, message: message.into() }
    }

    /// Helper to create malformed response error
    pub fn malformed(provider: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedResponse { provider, message: message.into() }
    }

    /// Stable numeric error code, exposed in every error response body
    pub fn error_code(&self) -> i32 {
        match self {
            // Resolution errors 3xxx
            Self::LocationUnresolved => 3001,
            Self::NotFound(_) => 3002,

            // Validation errors 4xxx
            Self::ValidationError(_) => 4001,
            Self::InvalidInput(_) => 4002,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::Database(_) => 5002,
            Self::Other(_) => 5001,

            // Upstream provider errors 51xx
            Self::UpstreamTransport { .. } => 5101,
            Self::MalformedResponse { .. } => 5102,
            Self::EmptyGeneration => 5103,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let message = self.to_string();

        let status = match &self {
            Self::LocationUnresolved | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamTransport { .. }
            | Self::MalformedResponse { .. }
            | Self::EmptyGeneration => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = ApiErrorResponse { code, message, details: None };

        (status, Json(response)).into_response()
    }
}

/// Implement From for serde_json::Error
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal_error(format!("JSON serialization error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
