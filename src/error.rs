//! Application error type and its HTTP representation.
//!
//! Every handler returns `Result<_, AppError>`; the error is rendered as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Post not found", "details": { "id": 7 } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced to callers of the post store and the HTTP API.
///
/// Cache failures never appear here: they are recovered inside
/// [`crate::infrastructure::cache::CacheHandle`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or blank required field on a write.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Update or delete referencing an id that does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Durable store connection or query failure.
    #[error("{message}")]
    Database { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn database(message: impl Into<String>, details: Value) -> Self {
        Self::Database {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Status code, error code and payload for this error.
    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Database { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let info = self.to_error_info();

        if status.is_server_error() {
            tracing::error!(code = info.code, details = %info.details, "{}", info.message);
        } else {
            tracing::debug!(code = info.code, details = %info.details, "{}", info.message);
        }

        (status, Json(ErrorBody { error: info })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::database("Database error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(_) => "Invalid field type in request body",
            _ => "Invalid JSON in request body",
        };
        AppError::bad_request(message, json!({ "reason": rejection.body_text() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request("Missing title, content, or author", json!(errors))
    }
}
