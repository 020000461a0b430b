//! Consultation history ledger
//!
//! Append-only, per-user record of advisory questions and answers.

use crate::models::{ConsultationRecord, FinancialSnapshot, NewConsultation};
use crate::store::DocumentStore;
use crate::Result;
use std::sync::Arc;
use tracing::debug;

pub struct ConsultationLedger {
    store: Arc<dyn DocumentStore>,
}

impl ConsultationLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn append(&self, username: &str, query: &str, response: &str) -> Result<ConsultationRecord> {
        self.append_entry(username, query, None, response).await
    }

    pub async fn append_with_snapshot(
        &self,
        username: &str,
        query: &str,
        snapshot: &FinancialSnapshot,
        response: &str,
    ) -> Result<ConsultationRecord> {
        self.append_entry(username, query, Some(snapshot.clone()), response)
            .await
    }

    async fn append_entry(
        &self,
        username: &str,
        query: &str,
        snapshot: Option<FinancialSnapshot>,
        response: &str,
    ) -> Result<ConsultationRecord> {
        let record = self
            .store
            .append_history(
                username,
                NewConsultation {
                    query: query.to_string(),
                    snapshot,
                    response: response.to_string(),
                },
            )
            .await?;

        debug!(username = %username, record_id = %record.id, "consultation recorded");
        Ok(record)
    }

    /// All records for the user, newest first.
    pub async fn list(&self, username: &str) -> Result<Vec<ConsultationRecord>> {
        self.store.list_history(username).await
    }
}
