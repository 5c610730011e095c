mod contact;

pub use contact::{Contact, NewContact};
