use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::number::en::NumberWithFormat;
use fake::Fake;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::contacts::models::{Contact, NewContact};
use crate::features::contacts::{routes, ContactService, ContactStore};
use crate::shared::constants::CONTACT_COLUMNS;

const TAGS: [&str; 4] = ["vip", "lead", "customer", ""];

/// Contact store kept in memory, optionally failing every call
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
    fail: bool,
}

impl InMemoryContactStore {
    pub fn failing() -> Self {
        Self {
            contacts: RwLock::default(),
            fail: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert_many(&self, contacts: &[NewContact]) -> Result<u64> {
        self.check()?;
        let mut stored = self.contacts.write().await;
        let now = Utc::now();
        stored.extend(contacts.iter().cloned().map(|c| Contact {
            id: Uuid::now_v7(),
            first_name: c.first_name,
            last_name: c.last_name,
            country_code: c.country_code,
            whatsapp_number: c.whatsapp_number,
            email: c.email,
            tags: c.tags,
            created_at: now,
        }));
        Ok(contacts.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        self.check()?;
        Ok(self.contacts.read().await.clone())
    }
}

pub fn fake_contacts(count: usize) -> Vec<NewContact> {
    (0..count)
        .map(|i| NewContact {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            country_code: format!("+{}", (1..999u16).fake::<u16>()),
            whatsapp_number: NumberWithFormat("##########").fake(),
            email: SafeEmail().fake(),
            tags: TAGS[i % TAGS.len()].to_string(),
        })
        .collect()
}

/// Renders contacts as an upload-ready CSV with the expected header
pub fn contacts_csv(contacts: &[NewContact]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CONTACT_COLUMNS).unwrap();
    for c in contacts {
        writer
            .write_record([
                &c.first_name,
                &c.last_name,
                &c.country_code,
                &c.whatsapp_number,
                &c.email,
                &c.tags,
            ])
            .unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

pub fn test_server(store: Arc<dyn ContactStore>) -> TestServer {
    let service = Arc::new(ContactService::new(store));
    TestServer::new(routes(service)).unwrap()
}

/// Serves the contact routes on an ephemeral local port and returns the base URL
pub async fn spawn_app(store: Arc<dyn ContactStore>) -> String {
    let service = Arc::new(ContactService::new(store));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, routes(service)).await.unwrap();
    });

    format!("http://{}", addr)
}
