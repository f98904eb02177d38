//! Error taxonomy shared by the store adapters, the dictionary repository and
//! the HTTP layer.
//!
//! Every fallible operation returns [`AppError`]. The HTTP layer renders it
//! through [`IntoResponse`] as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": { ... } } }
//! ```

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

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failure outcomes of dictionary operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is missing or a parameter is malformed. Nothing was persisted.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The referenced definition does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Random selection was attempted on an empty dictionary.
    #[error("The dictionary has no definitions")]
    EmptyCollection,

    /// The backing store failed. Propagated unchanged, never retried here.
    #[error("{message}")]
    Store { message: String, details: Value },
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

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Stable code string used in error payloads and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::EmptyCollection => "empty_collection",
            AppError::Store { .. } => "store_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } | AppError::EmptyCollection => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Store { details, .. } => details.clone(),
            AppError::EmptyCollection => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");

        match e {
            sqlx::Error::PoolTimedOut => {
                AppError::store("Database timed out", json!({ "reason": "pool_timeout" }))
            }
            _ => AppError::store("Database error", json!({})),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "errors": errors }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::EmptyCollection.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::store("boom", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_info_carries_code_and_details() {
        let info = AppError::not_found("Definition not found", json!({ "id": "abc" })).to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Definition not found");
        assert_eq!(info.details["id"], "abc");

        let info = AppError::EmptyCollection.to_error_info();
        assert_eq!(info.code, "empty_collection");
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_sqlx_pool_timeout_maps_to_store_error() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Store { .. }));
        assert_eq!(err.code(), "store_error");
    }
}
