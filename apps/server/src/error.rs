//! Domain error types for printdesk.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Every error renders as `{ "success": false, "error": CODE, "message": ... }`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Storage (S3) operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Image decoding, compositing or encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// A remote resource (source image) could not be fetched
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Mail sending is not configured on this server
    #[error("Mail is not configured")]
    MailDisabled,

    /// The mail API rejected or failed the send
    #[error("Mail error: {0}")]
    Mail(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Storage(_) | AppError::Image(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) | AppError::Mail(_) => StatusCode::BAD_GATEWAY,
            AppError::MailDisabled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, response_message) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            AppError::InvalidInput(_) => ("INVALID_INPUT", self.to_string()),
            AppError::Unauthorized(_) => ("UNAUTHORIZED", self.to_string()),
            AppError::Storage(err_str) => {
                tracing::error!("Storage error: {}", err_str);
                ("STORAGE_ERROR", self.to_string())
            }
            AppError::Image(_) => ("IMAGE_ERROR", self.to_string()),
            AppError::Upstream(_) => ("UPSTREAM_ERROR", self.to_string()),
            AppError::MailDisabled => ("MAIL_DISABLED", self.to_string()),
            AppError::Mail(err_str) => {
                tracing::error!("Mail error: {}", err_str);
                ("MAIL_ERROR", self.to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Decoding(_) | image::ImageError::Unsupported(_) => {
                AppError::InvalidInput(format!("Unreadable image: {}", err))
            }
            image::ImageError::Limits(_) => {
                AppError::InvalidInput(format!("Image too large: {}", err))
            }
            other => AppError::Image(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}
