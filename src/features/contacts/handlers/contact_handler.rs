use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::{ContactResponseDto, UploadCsvDto};
use crate::features::contacts::services::ContactService;
use crate::shared::constants::{CSV_FIELD_NAME, MAX_CSV_FILE_SIZE, MAX_CSV_FILE_SIZE_MB};
use crate::shared::types::{ApiResponse, MessageResponse};

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::FileTooLarge(format!(
            "File too large. Maximum size is {} MB",
            MAX_CSV_FILE_SIZE_MB
        ));
    }
    debug!("Failed to read multipart data: {}", e);
    AppError::Multipart(format!("Failed to read multipart data: {}", e))
}

/// Import contacts from a CSV upload
///
/// Accepts multipart/form-data with a `csvFile` part. The first row of the
/// file is the header; every other row becomes one contact. Rows are
/// inserted all-or-nothing.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "contacts",
    request_body(
        content = UploadCsvDto,
        content_type = "multipart/form-data",
        description = "CSV file in the `csvFile` field",
    ),
    responses(
        (status = 200, description = "Contacts imported", body = MessageResponse),
        (status = 500, description = "Invalid upload, invalid CSV or database error", body = MessageResponse)
    )
)]
pub async fn import_contacts(
    State(service): State<Arc<ContactService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<()>>> {
    let mut multipart = multipart.map_err(|e| AppError::Multipart(e.body_text()))?;
    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != CSV_FIELD_NAME {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        debug!(
            "Receiving CSV upload: file_name={:?}, content_type={:?}",
            field.file_name(),
            field.content_type()
        );

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if data.len() + chunk.len() > MAX_CSV_FILE_SIZE {
                return Err(AppError::FileTooLarge(format!(
                    "File too large. Maximum size is {} MB",
                    MAX_CSV_FILE_SIZE_MB
                )));
            }
            data.extend_from_slice(&chunk);
        }
        csv_data = Some(data);
    }

    let csv_data = csv_data
        .ok_or_else(|| AppError::Multipart(format!("{} field is required", CSV_FIELD_NAME)))?;

    let inserted = service.import_csv(&csv_data).await?;

    Ok(Json(ApiResponse::success(
        format!(
            "A total of {} users have been successfully added to the database",
            inserted
        ),
        None,
    )))
}

/// List all stored contacts
#[utoipa::path(
    get,
    path = "/api/upload",
    tag = "contacts",
    responses(
        (status = 200, description = "All stored contacts", body = ApiResponse<Vec<ContactResponseDto>>),
        (status = 500, description = "Database error, `data` is empty", body = ApiResponse<Vec<ContactResponseDto>>)
    )
)]
pub async fn list_contacts(
    State(service): State<Arc<ContactService>>,
) -> (StatusCode, Json<ApiResponse<Vec<ContactResponseDto>>>) {
    match service.list_contacts().await {
        Ok(contacts) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                "Users retrieved successfully",
                Some(contacts),
            )),
        ),
        Err(e) => {
            error!("Failed to list contacts: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure("Error retrieving users", Some(Vec::new()))),
            )
        }
    }
}

/// Answers any method other than GET and POST on the upload route
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        [(header::ALLOW, "GET, POST")],
        AppError::MethodNotAllowed(method.to_string()),
    )
}
