//! Upload widget for contact CSV files
//!
//! Validates a file locally, uploads it as multipart form data with
//! progress reporting, and reports the outcome through a status callback.

mod client;
mod message;
mod validation;
mod widget;

pub use client::{ClientError, ServerReply, UploadClient};
pub use message::{MessageStatus, Notification, ResponseMessage};
pub use validation::{expected_header, validate_file, ValidationError};
pub use widget::{UploadCandidate, UploadProgress, UploadWidget, NO_FILE_SELECTED_MESSAGE};
