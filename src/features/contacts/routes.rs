use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::contacts::handlers::{import_contacts, list_contacts, method_not_allowed};
use crate::features::contacts::services::ContactService;
use crate::shared::constants::{MAX_CSV_FILE_SIZE, MULTIPART_OVERHEAD, UPLOAD_PATH};

/// Create routes for the contacts feature
///
/// `GET` lists contacts, `POST` imports a CSV upload, every other method
/// gets a 405.
pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route(
            UPLOAD_PATH,
            get(list_contacts)
                .post(import_contacts)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(MAX_CSV_FILE_SIZE + MULTIPART_OVERHEAD)),
        )
        .with_state(service)
}
