//! Parsing of uploaded contact CSV files.
//!
//! Row 0 is the header. It must have exactly as many fields as
//! [`CONTACT_COLUMNS`]; the names themselves are checked by the client
//! before upload. Every following row maps positionally onto a
//! [`NewContact`]. Blank lines are skipped by the reader.

use csv::ReaderBuilder;

use crate::core::error::{AppError, Result};
use crate::features::contacts::models::NewContact;
use crate::shared::constants::CONTACT_COLUMNS;

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid CSV format";

pub fn parse_contacts(content: &[u8]) -> Result<Vec<NewContact>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        // Field counts are checked below so the error can name the row
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records();

    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| AppError::InvalidCsv(INVALID_FORMAT_MESSAGE.to_string()))?;

    if header.len() != CONTACT_COLUMNS.len() {
        return Err(AppError::InvalidCsv(INVALID_FORMAT_MESSAGE.to_string()));
    }

    let mut contacts = Vec::new();
    for record in records {
        let record = record?;
        let contact = NewContact::from_record(&record).ok_or_else(|| {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            AppError::InvalidCsv(format!(
                "{}: line {} has {} fields, expected {}",
                INVALID_FORMAT_MESSAGE,
                line,
                record.len(),
                CONTACT_COLUMNS.len()
            ))
        })?;
        contacts.push(contact);
    }

    Ok(contacts)
}
