use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::ContactStore;
use crate::core::error::Result;
use crate::features::contacts::models::{Contact, NewContact};

/// Rows per INSERT statement. Seven binds per row keeps each statement far
/// below the Postgres limit of 65535 bind parameters.
const INSERT_CHUNK_SIZE: usize = 1000;

/// Postgres-backed contact store
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert_many(&self, contacts: &[NewContact]) -> Result<u64> {
        if contacts.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for chunk in contacts.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO contacts (id, first_name, last_name, country_code, whatsapp_number, email, tags) ",
            );
            builder.push_values(chunk, |mut row, contact| {
                row.push_bind(Uuid::now_v7())
                    .push_bind(contact.first_name.as_str())
                    .push_bind(contact.last_name.as_str())
                    .push_bind(contact.country_code.as_str())
                    .push_bind(contact.whatsapp_number.as_str())
                    .push_bind(contact.email.as_str())
                    .push_bind(contact.tags.as_str());
            });

            let result = builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected();
            debug!("Inserted contact chunk: rows={}", result.rows_affected());
        }

        // Dropping the transaction without commit rolls back every chunk
        tx.commit().await?;

        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, first_name, last_name, country_code, whatsapp_number, email, tags, created_at
            FROM contacts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }
}
