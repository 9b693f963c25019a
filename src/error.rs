//! HTTP-facing error type.
//!
//! [`AppError`] is what handlers return. It renders as
//! `{"error": {"code", "message", "details"}}` with a matching status code,
//! and is where failures get logged before the response leaves the service.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::error::UrlStoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal {
        message: String,
        details: Value,
        /// Underlying failure, logged but never sent to clients.
        cause: Option<String>,
    },
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
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
            cause: None,
        }
    }

    fn internal_with_cause(message: impl Into<String>, cause: impl ToString) -> Self {
        Self::Internal {
            message: message.into(),
            details: json!({}),
            cause: Some(cause.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the serializable payload without consuming the error.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal {
                message, details, ..
            } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let info = self.to_error_info();

        if status.is_server_error() {
            let cause = match &self {
                AppError::Internal { cause, .. } => cause.as_deref(),
                _ => None,
            };
            tracing::error!(
                code = info.code,
                details = %info.details,
                cause = cause.unwrap_or("-"),
                "{}",
                info.message
            );
        } else {
            tracing::debug!(code = info.code, details = %info.details, "{}", info.message);
        }

        (status, Json(ErrorBody { error: info })).into_response()
    }
}

impl From<UrlStoreError> for AppError {
    fn from(e: UrlStoreError) -> Self {
        match e {
            UrlStoreError::InvalidUrl(reason) => {
                AppError::bad_request("Invalid URL format", json!({ "reason": reason }))
            }
            UrlStoreError::InvalidCode { code, reason } => AppError::bad_request(
                "Invalid custom code",
                json!({ "code": code, "reason": reason }),
            ),
            UrlStoreError::CodeAlreadyExists(code) => {
                AppError::conflict("Short code already exists", json!({ "code": code }))
            }
            UrlStoreError::CodeNotFound(code) => {
                AppError::not_found("Short link not found", json!({ "code": code }))
            }
            UrlStoreError::GenerationExhausted { attempts } => AppError::internal(
                "Failed to generate unique code",
                json!({ "reason": "Too many collisions", "attempts": attempts }),
            ),
            UrlStoreError::Store(err) => AppError::internal_with_cause("Database error", err),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = e
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}
