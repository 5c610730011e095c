//! Contact importer: CSV contact upload, import and listing.
//!
//! - [`features::contacts`] is the server side (`/api/upload`).
//! - [`modules::upload`] is the client side upload widget.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
