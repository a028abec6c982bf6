//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::auth::commands::LoginError;
use crate::features::files::queries::DownloadFileError;
use crate::features::jobs::queries::ListJobsError;

/// Result type alias for handlers
pub type ApiResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::DataUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATA_UNAVAILABLE")
            },
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::NotFound(message)
            | AppError::Validation(message)
            | AppError::Unauthorized(message)
            | AppError::DataUnavailable(message) => message,
            AppError::Storage(message) => {
                tracing::error!("Storage error: {}", message);
                "A storage error occurred".to_string()
            },
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                "An internal error occurred".to_string()
            },
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<ListJobsError> for AppError {
    fn from(err: ListJobsError) -> Self {
        match err {
            ListJobsError::DataUnavailable => AppError::DataUnavailable(err.to_string()),
        }
    }
}

impl From<DownloadFileError> for AppError {
    fn from(err: DownloadFileError) -> Self {
        match err {
            DownloadFileError::FilenameRequired | DownloadFileError::InvalidFilename(_) => {
                AppError::Validation(err.to_string())
            },
            DownloadFileError::NotFound => AppError::NotFound(err.to_string()),
            DownloadFileError::Storage(_) => AppError::Storage(err.to_string()),
        }
    }
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::EmailRequired | LoginError::PasswordRequired => {
                AppError::Validation(err.to_string())
            },
            LoginError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
        }
    }
}
