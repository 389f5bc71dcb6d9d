//! Error handling for the Garden Self-Sufficiency Planner
//!
//! Provides consistent error responses in English and Swedish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_sv: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Crop catalog provider error: {0}")]
    CatalogProvider(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Stored plan {0} failed its integrity check")]
    ChecksumMismatch(uuid::Uuid),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the client may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::StorageError(_) | AppError::DatabaseError(_) | AppError::CatalogProvider(_)
        )
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_sv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub retryable: bool,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        let retryable = self.is_retryable();
        match self {
            AppError::Validation { field, message, message_sv } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_sv: message_sv.clone(),
                    field: Some(field.clone()),
                    retryable,
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_sv: format!("Ogiltiga uppgifter: {}", msg),
                    field: None,
                    retryable,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_sv: format!("{} hittades inte", resource),
                    field: None,
                    retryable,
                },
            ),
            AppError::CatalogProvider(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "CATALOG_PROVIDER_ERROR".to_string(),
                    message_en: format!("Crop suggestion service error: {}", msg),
                    message_sv: format!("Fel i tjänsten för grödförslag: {}", msg),
                    field: None,
                    retryable,
                },
            ),
            AppError::StorageError(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "STORAGE_ERROR".to_string(),
                    message_en: format!("The plan could not be stored: {}", msg),
                    message_sv: format!("Planen kunde inte sparas: {}", msg),
                    field: None,
                    retryable,
                },
            ),
            AppError::ChecksumMismatch(_) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CHECKSUM_MISMATCH".to_string(),
                    message_en: "The stored plan has been altered and cannot be loaded".to_string(),
                    message_sv: "Den sparade planen har ändrats och kan inte laddas".to_string(),
                    field: None,
                    retryable,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_sv: format!("Konfigurationsfel: {}", msg),
                    field: None,
                    retryable,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred, please try again".to_string(),
                    message_sv: "Ett databasfel inträffade, försök igen".to_string(),
                    field: None,
                    retryable,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_sv: "Ett internt serverfel inträffade".to_string(),
                    field: None,
                    retryable,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_sv: "Ett internt serverfel inträffade".to_string(),
                    field: None,
                    retryable,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_failures_are_retryable() {
        assert!(AppError::StorageError("disk full".into()).is_retryable());
        assert!(AppError::DatabaseError(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(!AppError::NotFound("Plan".into()).is_retryable());
        assert!(!AppError::ChecksumMismatch(uuid::Uuid::nil()).is_retryable());
    }

    #[test]
    fn test_status_codes() {
        let (status, detail) = AppError::DatabaseError(sqlx::Error::PoolTimedOut).status_and_detail();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(detail.retryable);

        let (status, detail) = AppError::Validation {
            field: "household_size".into(),
            message: "too large".into(),
            message_sv: "för stort".into(),
        }
        .status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("household_size"));
    }
}
