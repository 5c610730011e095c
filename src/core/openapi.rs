use utoipa::{Modify, OpenApi};

use crate::features::contacts::{dtos as contacts_dtos, handlers as contacts_handlers};
use crate::shared::types::{ApiResponse, MessageResponse, ResponseStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        contacts_handlers::import_contacts,
        contacts_handlers::list_contacts,
    ),
    components(
        schemas(
            // Shared
            ResponseStatus,
            MessageResponse,
            // Contacts
            contacts_dtos::UploadCsvDto,
            contacts_dtos::ContactResponseDto,
            ApiResponse<Vec<contacts_dtos::ContactResponseDto>>,
        )
    ),
    tags(
        (name = "contacts", description = "CSV contact import and listing"),
    ),
    info(
        title = "Contact Importer API",
        version = "0.1.0",
        description = "CSV contact upload and listing",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
