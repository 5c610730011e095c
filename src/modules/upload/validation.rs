use thiserror::Error;

use crate::shared::constants::{CONTACT_COLUMNS, MAX_CSV_FILE_SIZE, MAX_CSV_FILE_SIZE_MB};

const ALLOWED_EXTENSIONS: &[&str] = &["csv"];

/// Reasons a file is refused before any upload is attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a valid CSV file.")]
    InvalidExtension,

    #[error("Please upload a file smaller than {} MB.", MAX_CSV_FILE_SIZE_MB)]
    TooLarge,

    #[error(
        "The CSV file should have the columns in the following order:\n{}",
        CONTACT_COLUMNS.join(", ")
    )]
    InvalidHeader,
}

/// Header line every upload must start with
pub fn expected_header() -> String {
    CONTACT_COLUMNS.join(",")
}

/// Lower-cased text after the last `.`, if any
fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn check_extension(file_name: &str) -> Result<(), ValidationError> {
    match file_extension(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::InvalidExtension),
    }
}

pub fn check_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_CSV_FILE_SIZE as u64 {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}

/// Compares the first line against the expected header, ignoring case,
/// surrounding whitespace and a leading byte order mark.
pub fn check_header(contents: &[u8]) -> Result<(), ValidationError> {
    let text = String::from_utf8_lossy(contents);
    let first_line = text.split('\n').next().unwrap_or_default();
    let header = first_line
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase();

    if header != expected_header().to_lowercase() {
        return Err(ValidationError::InvalidHeader);
    }
    Ok(())
}

/// Runs every check in the order the widget applies them
pub fn validate_file(file_name: &str, contents: &[u8]) -> Result<(), ValidationError> {
    check_extension(file_name)?;
    check_size(contents.len() as u64)?;
    check_header(contents)
}
