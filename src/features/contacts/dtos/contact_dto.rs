use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::contacts::models::Contact;

/// Upload form for Swagger UI documentation only.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadCsvDto {
    /// CSV file with header `First_Name,Last_Name,Country_Code,Whatsapp_Number,Email,Tags`
    #[schema(
        rename = "csvFile",
        format = Binary,
        content_media_type = "text/csv"
    )]
    pub csv_file: String,
}

/// Stored contact as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactResponseDto {
    pub id: Uuid,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "+1")]
    pub country_code: String,
    #[schema(example = "5551234")]
    pub whatsapp_number: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "vip")]
    pub tags: String,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponseDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            country_code: contact.country_code,
            whatsapp_number: contact.whatsapp_number,
            email: contact.email,
            tags: contact.tags,
            created_at: contact.created_at,
        }
    }
}
