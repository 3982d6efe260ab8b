//! Unified error handling for the HTTP API.
//!
//! ```text
//! ValidationError ──► ApiError::Validation ──► 400 { code: "validation", ... }
//! DbError::NotFound ─► ApiError::NotFound ───► 404 { code: "not_found", ... }
//! DbError (other) ──► ApiError::Database ───► 500 { code: "internal", ... }
//!                                               (details logged, not sent)
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use latte_core::{CoreError, ValidationError};
use latte_db::DbError;

/// Error type returned by every API handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed a validation rule.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Request could not be understood.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Missing or wrong admin token.
    #[error("A valid admin token is required")]
    Unauthorized,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(DbError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Database(_) | ApiError::Internal(_) => "internal",
        }
    }

    /// Whether the error is the server's fault (logged, message hidden).
    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Database(_) | ApiError::Internal(_))
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::NotFound(format!("{entity} not found: {id}")),
            other => ApiError::Database(other),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(err) => ApiError::Validation(err),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!(error = %self, "API request error");
        }

        // Don't expose internal error details to clients
        let message = if self.is_internal() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            code: self.code(),
            message,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let validation = ApiError::from(ValidationError::Required {
            field: "email".to_string(),
        });
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "email is required");

        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_not_found_maps_to_404() {
        let err = ApiError::from(DbError::not_found("Order", "abc"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "not_found");

        let err = ApiError::from(DbError::PoolExhausted);
        assert!(err.is_internal());
    }

    #[test]
    fn test_core_errors() {
        let err = ApiError::from(CoreError::CheckoutEmpty);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Your cart is empty.");
    }

    #[test]
    fn test_internal_details_hidden() {
        let response = ApiError::Database(DbError::QueryFailed("secret sql".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
