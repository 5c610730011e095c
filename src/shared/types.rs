use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome marker carried in every API envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Failure,
}

/// JSON envelope shared by every endpoint: `{status, message, data?}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Envelope without `data`, for OpenAPI documentation of message-only responses
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Failure,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(message, None)
    }
}
