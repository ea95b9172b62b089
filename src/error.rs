//! Application error taxonomy and HTTP mapping.
//!
//! Every user-facing failure is one of the variants below and renders as a
//! structured JSON body with a stable machine-readable `code`. Each kind maps
//! to exactly one HTTP status; the three non-resolvable link states share
//! 410 Gone but keep distinct codes.

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

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    ExpiredByTime { message: String, details: Value },
    #[error("{message}")]
    ExpiredByClickCap { message: String, details: Value },
    #[error("{message}")]
    Inactive { message: String, details: Value },
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

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn expired_by_time(message: impl Into<String>, details: Value) -> Self {
        Self::ExpiredByTime {
            message: message.into(),
            details,
        }
    }

    pub fn expired_by_click_cap(message: impl Into<String>, details: Value) -> Self {
        Self::ExpiredByClickCap {
            message: message.into(),
            details,
        }
    }

    pub fn inactive(message: impl Into<String>, details: Value) -> Self {
        Self::Inactive {
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

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::ExpiredByTime { .. } => "expired_by_time",
            AppError::ExpiredByClickCap { .. } => "expired_by_click_cap",
            AppError::Inactive { .. } => "inactive",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::ExpiredByTime { .. }
            | AppError::ExpiredByClickCap { .. }
            | AppError::Inactive { .. } => StatusCode::GONE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::ExpiredByTime { message, details }
            | AppError::ExpiredByClickCap { message, details }
            | AppError::Inactive { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code, %message, "request failed");
        }

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

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}
