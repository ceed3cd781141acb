//! Error types for the Bibliothèque server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// SQLSTATE raised by Postgres on a unique index violation
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised by Postgres on a foreign key violation
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Stable numeric codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    NotFound = 3,
    InvalidState = 4,
    Duplicate = 5,
    HasLoans = 6,
    BadValue = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced book or borrower does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Borrow on an unavailable book, or return on an available one
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Duplicate value on a unique field (borrower email)
    #[error("Unique constraint violated: {0}")]
    UniqueConstraint(String),

    /// Delete blocked by loans still referencing the row
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify a store error by SQLSTATE, keeping anything unrecognised as `Database`.
    ///
    /// `context` names the rejected operation and becomes the user-facing message.
    pub fn from_constraint(err: sqlx::Error, context: &str) -> Self {
        let code = match &err {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        };
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => AppError::UniqueConstraint(context.to_string()),
            Some(FOREIGN_KEY_VIOLATION) => AppError::IntegrityViolation(context.to_string()),
            _ => AppError::Database(err),
        }
    }

    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::InvalidState(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidState),
            AppError::UniqueConstraint(_) => (StatusCode::BAD_REQUEST, ErrorCode::Duplicate),
            AppError::IntegrityViolation(_) => (StatusCode::BAD_REQUEST, ErrorCode::HasLoans),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::NotFound(msg)
            | AppError::InvalidState(msg)
            | AppError::UniqueConstraint(msg)
            | AppError::IntegrityViolation(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
