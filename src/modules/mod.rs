//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client side of the contact upload: local file validation,
//! the HTTP upload client and the widget state machine built on them.

pub mod upload;
