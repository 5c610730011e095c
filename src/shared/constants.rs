/// Route serving both the import (POST) and the listing (GET)
pub const UPLOAD_PATH: &str = "/api/upload";

/// Multipart field that carries the CSV file
pub const CSV_FIELD_NAME: &str = "csvFile";

/// Largest CSV accepted, in megabytes
pub const MAX_CSV_FILE_SIZE_MB: usize = 2;

/// Largest CSV accepted, in bytes (2 MiB)
pub const MAX_CSV_FILE_SIZE: usize = MAX_CSV_FILE_SIZE_MB * 1024 * 1024;

/// Slack on top of the file size for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Column order every contact CSV must follow
pub const CONTACT_COLUMNS: [&str; 6] = [
    "First_Name",
    "Last_Name",
    "Country_Code",
    "Whatsapp_Number",
    "Email",
    "Tags",
];
