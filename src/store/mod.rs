//! Document persistence layer
//!
//! Every record lives under its owner's username: one user document with
//! `cards` and `history` sub-collections. In-memory for development and
//! tests; Postgres when a database URL is configured.

use crate::config::AppConfig;
use crate::error::AdvisoryError;
use crate::models::{ConsultationRecord, CreditCard, NewCard, NewConsultation, User};
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

pub mod postgres;
pub use postgres::PgDocumentStore;

/// Trait for the per-user document store
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<Option<User>>;
    async fn user_exists(&self, username: &str) -> Result<bool>;
    /// Atomically create the user document; `AlreadyExists` if taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;
    async fn insert_card(&self, username: &str, card: NewCard) -> Result<CreditCard>;
    async fn list_cards(&self, username: &str) -> Result<Vec<CreditCard>>;
    async fn append_history(&self, username: &str, entry: NewConsultation) -> Result<ConsultationRecord>;
    /// Newest first.
    async fn list_history(&self, username: &str) -> Result<Vec<ConsultationRecord>>;
}

/// Server timestamp for the next history entry, strictly after `previous`.
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}

struct UserDocument {
    user: User,
    cards: Vec<CreditCard>,
    history: Vec<ConsultationRecord>,
}

/// In-memory document store for development
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, UserDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {

    async fn get_user(&self, username: &str) -> Result<Option<User>> {
        let documents = self.documents.read().await;
        Ok(documents.get(username).map(|doc| doc.user.clone()))
    }

    async fn user_exists(&self, username: &str) -> Result<bool> {
        let documents = self.documents.read().await;
        Ok(documents.contains_key(username))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut documents = self.documents.write().await;

        if documents.contains_key(username) {
            return Err(AdvisoryError::AlreadyExists(username.to_string()));
        }

        let user = User {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        documents.insert(
            username.to_string(),
            UserDocument {
                user: user.clone(),
                cards: Vec::new(),
                history: Vec::new(),
            },
        );

        Ok(user)
    }

    async fn insert_card(&self, username: &str, card: NewCard) -> Result<CreditCard> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .get_mut(username)
            .ok_or_else(|| AdvisoryError::UserNotFound(username.to_string()))?;

        let card = CreditCard {
            id: Uuid::new_v4(),
            name: card.name,
            limit: card.limit,
            features: card.features,
            transactions: card.transactions,
            current_spend: card.current_spend,
            added_at: Utc::now(),
        };

        doc.cards.push(card.clone());
        Ok(card)
    }

    async fn list_cards(&self, username: &str) -> Result<Vec<CreditCard>> {
        let documents = self.documents.read().await;
        Ok(documents
            .get(username)
            .map(|doc| doc.cards.clone())
            .unwrap_or_default())
    }

    async fn append_history(&self, username: &str, entry: NewConsultation) -> Result<ConsultationRecord> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .get_mut(username)
            .ok_or_else(|| AdvisoryError::UserNotFound(username.to_string()))?;

        let previous = doc.history.iter().map(|r| r.timestamp).max();

        let record = ConsultationRecord {
            id: Uuid::new_v4(),
            query: entry.query,
            snapshot: entry.snapshot,
            response: entry.response,
            timestamp: next_timestamp(previous),
        };

        doc.history.push(record.clone());
        Ok(record)
    }

    async fn list_history(&self, username: &str) -> Result<Vec<ConsultationRecord>> {
        let documents = self.documents.read().await;

        let mut records = documents
            .get(username)
            .map(|doc| doc.history.clone())
            .unwrap_or_default();

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

/// Pick the backend from configuration.
///
/// Postgres when a database URL is set, in-memory otherwise or when the pool
/// cannot be constructed.
pub fn build_store(config: &AppConfig) -> Arc<dyn DocumentStore> {
    if let Some(url) = config.database_url.as_deref() {
        match PgDocumentStore::connect_lazy(url) {
            Ok(store) => {
                info!("Document store backend: postgres");
                return Arc::new(store);
            }
            Err(error) => {
                warn!(
                    "Failed to initialize postgres document store, falling back to in-memory: {}",
                    error
                );
            }
        }
    }

    info!("Document store backend: in-memory");
    Arc::new(InMemoryDocumentStore::new())
}
