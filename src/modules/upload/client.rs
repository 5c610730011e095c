use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::{
    multipart::{Form, Part},
    Body, StatusCode,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::message::{MessageStatus, ResponseMessage};
use crate::features::contacts::dtos::ContactResponseDto;
use crate::shared::constants::{CSV_FIELD_NAME, UPLOAD_PATH};

/// Bytes handed to the transport per progress tick
const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

/// `{status, message}` body returned by the import endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerReply {
    pub status: MessageStatus,
    pub message: String,
}

impl From<ServerReply> for ResponseMessage {
    fn from(reply: ServerReply) -> Self {
        ResponseMessage::new(reply.status, reply.message)
    }
}

#[derive(Debug, Deserialize)]
struct ListReply {
    #[serde(default)]
    data: Vec<ContactResponseDto>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}")]
    Server {
        status: StatusCode,
        reply: Option<ServerReply>,
    },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Message to surface for a failed request. Prefers the server's own
    /// `{status, message}` body when one came back.
    pub fn into_message(self) -> ResponseMessage {
        match self {
            ClientError::Server {
                reply: Some(reply), ..
            } => reply.into(),
            other => ResponseMessage::error(other.to_string()),
        }
    }
}

/// HTTP client for the contact upload endpoints
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }

    /// Upload a CSV as the `csvFile` multipart field
    ///
    /// `on_progress(sent, total)` is called each time a chunk of the file is
    /// handed to the transport, in order.
    pub async fn upload_csv<F>(
        &self,
        file_name: &str,
        contents: Bytes,
        on_progress: F,
    ) -> Result<ServerReply, ClientError>
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        let total = contents.len() as u64;
        let chunks: Vec<Bytes> = (0..contents.len())
            .step_by(UPLOAD_CHUNK_SIZE)
            .map(|start| contents.slice(start..(start + UPLOAD_CHUNK_SIZE).min(contents.len())))
            .collect();

        let mut sent = 0u64;
        let body = stream::iter(chunks).map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(sent, total);
            Ok::<_, std::io::Error>(chunk)
        });

        let part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = Form::new().part(CSV_FIELD_NAME, part);

        debug!("Uploading {} ({} bytes) to {}", file_name, total, self.endpoint());

        let response = self.http.post(self.endpoint()).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let reply = serde_json::from_str::<ServerReply>(&body).ok();

        if !status.is_success() {
            warn!("Upload rejected: status={}, body={}", status, body);
            return Err(ClientError::Server { status, reply });
        }

        reply.ok_or_else(|| ClientError::InvalidResponse(body))
    }

    /// Fetch every stored contact
    pub async fn list_contacts(&self) -> Result<Vec<ContactResponseDto>, ClientError> {
        let response = self.http.get(self.endpoint()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reply = serde_json::from_str::<ServerReply>(&body).ok();
            return Err(ClientError::Server { status, reply });
        }

        serde_json::from_str::<ListReply>(&body)
            .map(|list| list.data)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
