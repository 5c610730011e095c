use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::ContactResponseDto;
use crate::features::contacts::services::csv_parser;
use crate::features::contacts::store::ContactStore;

pub const NO_CONTACTS_MESSAGE: &str = "CSV file contains no contacts";

/// Service for importing and listing contacts
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Parse an uploaded CSV and insert all of its rows in one operation
    ///
    /// # Returns
    /// The number of contacts inserted. Nothing is inserted when any row
    /// fails to parse or the insert fails. A file with no data rows is an
    /// error.
    pub async fn import_csv(&self, content: &[u8]) -> Result<u64> {
        let contacts = csv_parser::parse_contacts(content)?;
        debug!(
            "Parsed contact CSV: bytes={}, rows={}",
            content.len(),
            contacts.len()
        );

        if contacts.is_empty() {
            return Err(AppError::InvalidCsv(NO_CONTACTS_MESSAGE.to_string()));
        }

        let inserted = self.store.insert_many(&contacts).await?;
        info!("Contacts imported: inserted={}", inserted);

        Ok(inserted)
    }

    /// Return every stored contact in insertion order
    pub async fn list_contacts(&self) -> Result<Vec<ContactResponseDto>> {
        let contacts = self.store.find_all().await?;
        debug!("Contacts listed: count={}", contacts.len());

        Ok(contacts.into_iter().map(Into::into).collect())
    }
}
