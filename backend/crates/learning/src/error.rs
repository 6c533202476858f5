//! Learning Error Types
//!
//! Learning-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Learning-specific result type alias
pub type LearningResult<T> = Result<T, LearningError>;

/// Learning-specific error variants
#[derive(Debug, Error)]
pub enum LearningError {
    /// Absent, tombstoned, or owned by someone else
    #[error("Vocabulary entry not found")]
    VocabularyNotFound,

    #[error("Study session not found")]
    SessionNotFound,

    #[error("Study session has already ended")]
    SessionAlreadyEnded,

    #[error("Mistake not found")]
    MistakeNotFound,

    #[error("Mistake category not found")]
    CategoryNotFound,

    #[error("Mistake category name already exists")]
    CategoryNameTaken,

    /// Physical delete refused while any mistake row, deleted or not,
    /// references the category
    #[error("Mistake category is still referenced by mistakes")]
    CategoryInUse,

    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LearningError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LearningError::VocabularyNotFound
            | LearningError::SessionNotFound
            | LearningError::MistakeNotFound
            | LearningError::CategoryNotFound => StatusCode::NOT_FOUND,
            LearningError::SessionAlreadyEnded
            | LearningError::CategoryNameTaken
            | LearningError::CategoryInUse => StatusCode::CONFLICT,
            LearningError::Validation(_) => StatusCode::BAD_REQUEST,
            LearningError::Database(_) | LearningError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LearningError::VocabularyNotFound
            | LearningError::SessionNotFound
            | LearningError::MistakeNotFound
            | LearningError::CategoryNotFound => ErrorKind::NotFound,
            LearningError::SessionAlreadyEnded
            | LearningError::CategoryNameTaken
            | LearningError::CategoryInUse => ErrorKind::Conflict,
            LearningError::Validation(_) => ErrorKind::BadRequest,
            LearningError::Database(_) | LearningError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            LearningError::Database(e) => AppError::from(e),
            LearningError::Internal(_) => AppError::internal("Internal server error"),
            LearningError::CategoryInUse => {
                AppError::conflict("Mistake category is still referenced by mistakes")
                    .with_action(
                        "A category stays in use once a mistake has been recorded under it; \
                         record new mistakes under another category instead",
                    )
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LearningError::Database(e) => {
                tracing::error!(error = %e, "Learning database error");
            }
            LearningError::Internal(msg) => {
                tracing::error!(message = %msg, "Learning internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Learning error");
            }
        }
    }
}

impl IntoResponse for LearningError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for LearningError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                LearningError::Validation(err.message().to_string())
            }
            _ => LearningError::Internal(err.to_string()),
        }
    }
}
