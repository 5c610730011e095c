use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Header or row shape does not match the contact layout
    #[error("{0}")]
    InvalidCsv(String),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("{0}")]
    Multipart(String),

    #[error("{0}")]
    FileTooLarge(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            // Import failures of every kind are reported as 500 to match the
            // upload contract the client widget relies on.
            AppError::Database(_)
            | AppError::InvalidCsv(_)
            | AppError::CsvParse(_)
            | AppError::Multipart(_)
            | AppError::FileTooLarge(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::MethodNotAllowed(_) => tracing::debug!("{}", self),
            _ => tracing::warn!("Request failed: {}", self),
        }

        let body = Json(ApiResponse::error(self.public_message()));

        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
