//! Application error taxonomy and HTTP response mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. Validation
//! failures carry a descriptive message to the caller; infrastructure errors
//! are logged with full detail server-side and surfaced as a generic failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Service-wide error type.
///
/// Variants map 1:1 to the error taxonomy of the HTTP boundary:
///
/// | Variant | Status | Code |
/// |---|---|---|
/// | `Validation` | 400 | `validation_error` |
/// | `AliasTaken` | 400 | `alias_taken` |
/// | `Unauthorized` | 401 | `unauthorized` |
/// | `Forbidden` | 403 | `forbidden` |
/// | `NotFound` | 404 | `not_found` |
/// | `Expired` | 410 | `expired` |
/// | `ExhaustedRetries` | 500 | `internal_error` |
/// | `StorageTimeout` | 503 | `storage_timeout` |
/// | `Internal` | 500 | `internal_error` |
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    AliasTaken { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    Expired { message: String, details: Value },
    ExhaustedRetries { message: String, details: Value },
    StorageTimeout { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn alias_taken(message: impl Into<String>, details: Value) -> Self {
        Self::AliasTaken {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
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

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted_retries(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedRetries {
            message: message.into(),
            details,
        }
    }

    pub fn storage_timeout(message: impl Into<String>, details: Value) -> Self {
        Self::StorageTimeout {
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

    fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::AliasTaken { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message, .. }
            | Self::Expired { message, .. }
            | Self::ExhaustedRetries { message, .. }
            | Self::StorageTimeout { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::AliasTaken { message, details } => {
                (StatusCode::BAD_REQUEST, "alias_taken", message, details)
            }
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Expired { message, details } => {
                (StatusCode::GONE, "expired", message, details)
            }
            AppError::ExhaustedRetries { message, details } => {
                tracing::error!(%message, ?details, "short code generation exhausted retries");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
            AppError::StorageTimeout { message, details } => {
                tracing::error!(%message, ?details, "storage operation timed out");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage_timeout",
                    "Storage temporarily unavailable".to_string(),
                    json!({}),
                )
            }
            AppError::Internal { message, details } => {
                tracing::error!(%message, ?details, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Returns true if `e` is a unique violation on the given constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        // Unique violations are mapped per constraint at the call sites via
        // `is_unique_violation_on`; anything reaching here is unexpected.
        tracing::error!(error = %e, "database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
