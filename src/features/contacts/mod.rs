//! Contact CSV import and listing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/upload` | Import contacts from a multipart `csvFile` upload |
//! | GET | `/api/upload` | List all stored contacts |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use routes::routes;
pub use services::ContactService;
pub use store::{ContactStore, PgContactStore};
