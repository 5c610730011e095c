//! Persistence seam for contacts.
//!
//! The service talks to a [`ContactStore`] so the import pipeline does not
//! depend on a particular database. [`PgContactStore`] is the production
//! implementation; tests use an in-memory store.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::contacts::models::{Contact, NewContact};

pub use postgres::PgContactStore;

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Inserts every contact or none of them. Returns the inserted count.
    async fn insert_many(&self, contacts: &[NewContact]) -> Result<u64>;

    /// All stored contacts in insertion order.
    async fn find_all(&self) -> Result<Vec<Contact>>;
}
