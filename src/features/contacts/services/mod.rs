mod contact_service;
pub mod csv_parser;

pub use contact_service::ContactService;
