//! Advisor facade - wires the components into request flows
//!
//! INPUT → BUILD PROMPT → GENERATE → RECORD → RESPOND

use crate::analyzer::CardInsight;
use crate::client::AdvisoryClient;
use crate::credentials::CredentialStore;
use crate::history::ConsultationLedger;
use crate::models::{
    AdvisoryProfile, ConsultationRecord, CreditCard, FinancialSnapshot, RequestContext,
};
use crate::portfolio::{PortfolioStore, SpendAnalysis};
use crate::prompt::{build_advisor_prompt, build_literacy_prompt, LearningScenario};
use crate::store::DocumentStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A completed advisor consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub response: String,
    pub record: ConsultationRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub card: CreditCard,
    pub insight: CardInsight,
}

pub struct Advisor {
    credentials: CredentialStore,
    portfolio: PortfolioStore,
    ledger: ConsultationLedger,
    client: Arc<dyn AdvisoryClient>,
}

impl Advisor {
    pub fn new(store: Arc<dyn DocumentStore>, client: Arc<dyn AdvisoryClient>) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            portfolio: PortfolioStore::new(store.clone()),
            ledger: ConsultationLedger::new(store),
            client,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn portfolio(&self) -> &PortfolioStore {
        &self.portfolio
    }

    pub fn ledger(&self) -> &ConsultationLedger {
        &self.ledger
    }

    /// Ask the advisor; the answer is recorded in the caller's history.
    ///
    /// A generation failure propagates and leaves history untouched.
    pub async fn consult(
        &self,
        ctx: &RequestContext,
        snapshot: FinancialSnapshot,
        query: &str,
    ) -> Result<Consultation> {
        let start = Instant::now();
        let profile = AdvisoryProfile::new(ctx, snapshot);
        let prompt = build_advisor_prompt(&profile, query)?;

        let response = self.client.generate(&prompt).await.map_err(|e| {
            warn!(username = %ctx.username, error = %e, "advisor generation failed");
            e
        })?;

        let record = self
            .ledger
            .append_with_snapshot(&ctx.username, query, &profile.snapshot, &response)
            .await?;

        info!(
            username = %ctx.username,
            record_id = %record.id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "consultation completed"
        );

        Ok(Consultation { response, record })
    }

    /// Campus Sense lesson for a free-text question. Not recorded.
    pub async fn coach(&self, question: &str) -> Result<String> {
        let prompt = build_literacy_prompt(question)?;
        let lesson = self.client.generate(&prompt).await?;
        info!(chars = lesson.len(), "lesson generated");
        Ok(lesson)
    }

    pub async fn coach_scenario(&self, scenario: LearningScenario) -> Result<String> {
        self.coach(scenario.question()).await
    }

    pub async fn card_views(&self, ctx: &RequestContext) -> Result<Vec<CardView>> {
        let cards = self.portfolio.list_cards(ctx).await?;
        Ok(cards
            .into_iter()
            .map(|card| CardView {
                insight: CardInsight::for_card(&card),
                card,
            })
            .collect())
    }

    pub async fn spend_analysis(&self, ctx: &RequestContext) -> Result<SpendAnalysis> {
        self.portfolio.spend_analysis(ctx).await
    }

    pub async fn history(&self, ctx: &RequestContext) -> Result<Vec<ConsultationRecord>> {
        self.ledger.list(&ctx.username).await
    }
}
