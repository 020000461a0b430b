//! Portfolio store
//!
//! Owns each user's credit cards and their synthetic transaction ledgers.
//! Real transaction ingestion does not exist; new cards are seeded from
//! [`SyntheticLedgerPolicy`].

use crate::analyzer::risk_band;
use crate::error::AdvisoryError;
use crate::models::{CardId, CreditCard, NewCard, RequestContext, RiskBand, Transaction};
use crate::store::DocumentStore;
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Percentage of the limit currently spent; `0` when the limit is not positive.
pub fn utilization(card: &CreditCard) -> f64 {
    utilization_of(card.current_spend, card.limit)
}

fn utilization_of(current_spend: i64, limit: i64) -> f64 {
    if limit <= 0 {
        return 0.0;
    }
    current_spend as f64 / limit as f64 * 100.0
}

/// One seeded demo transaction, dated relative to card creation.
#[derive(Debug, Clone, Copy)]
pub struct SeedTransaction {
    pub days_before: i64,
    pub amount: i64,
    pub category: &'static str,
}

/// Default-data policy applied by `add_card`.
#[derive(Debug, Clone)]
pub struct SyntheticLedgerPolicy {
    pub transactions: &'static [SeedTransaction],
    pub current_spend: i64,
}

/// Largest limit accepted for a single card (₹100 crore).
pub const MAX_CARD_LIMIT: i64 = 1_000_000_000;

pub const DEMO_LEDGER: SyntheticLedgerPolicy = SyntheticLedgerPolicy {
    transactions: &[
        SeedTransaction {
            days_before: 0,
            amount: 2500,
            category: "Dining",
        },
        SeedTransaction {
            days_before: 5,
            amount: 7500,
            category: "Online Shopping",
        },
    ],
    current_spend: 10_000,
};

impl SyntheticLedgerPolicy {
    pub fn seed(&self, now: DateTime<Utc>) -> Vec<Transaction> {
        self.transactions
            .iter()
            .map(|t| Transaction {
                date: now - Duration::days(t.days_before),
                amount: t.amount,
                category: t.category.to_string(),
            })
            .collect()
    }
}

impl Default for SyntheticLedgerPolicy {
    fn default() -> Self {
        DEMO_LEDGER
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: i64,
    pub share_pct: f64,
}

/// Single-snapshot view over all of a user's cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendAnalysis {
    pub card_count: usize,
    pub total_limit: i64,
    pub total_spend: i64,
    pub utilization: f64,
    pub band: RiskBand,
    pub categories: Vec<CategorySpend>,
}

/// Aggregate limits, spend and the per-category ledger breakdown.
///
/// Totals that do not fit in an `i64` are a `ValidationError`.
pub fn analyze_spend(cards: &[CreditCard]) -> Result<SpendAnalysis> {
    let total_limit = checked_total(cards.iter().map(|c| c.limit), "card limits")?;
    let total_spend = checked_total(cards.iter().map(|c| c.current_spend), "current spend")?;
    let utilization = utilization_of(total_spend, total_limit);

    let mut by_category: HashMap<&str, i64> = HashMap::new();
    for tx in cards.iter().flat_map(|c| c.transactions.iter()) {
        let entry = by_category.entry(tx.category.as_str()).or_insert(0);
        *entry = entry
            .checked_add(tx.amount)
            .ok_or_else(|| overflow("category spend"))?;
    }

    let ledger_total = checked_total(by_category.values().copied(), "ledger spend")?;

    let mut categories: Vec<CategorySpend> = by_category
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category: category.to_string(),
            amount,
            share_pct: if ledger_total > 0 {
                amount as f64 / ledger_total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    categories.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));

    Ok(SpendAnalysis {
        card_count: cards.len(),
        total_limit,
        total_spend,
        utilization,
        band: risk_band(utilization),
        categories,
    })
}

fn checked_total(mut values: impl Iterator<Item = i64>, what: &str) -> Result<i64> {
    values.try_fold(0i64, |acc, v| acc.checked_add(v).ok_or_else(|| overflow(what)))
}

fn overflow(what: &str) -> AdvisoryError {
    AdvisoryError::ValidationError(format!("{} total is out of range", what))
}

pub struct PortfolioStore {
    store: Arc<dyn DocumentStore>,
    policy: SyntheticLedgerPolicy,
}

impl PortfolioStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_policy(store, SyntheticLedgerPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn DocumentStore>, policy: SyntheticLedgerPolicy) -> Self {
        Self { store, policy }
    }

    /// Validate, seed and persist a new card for the caller.
    pub async fn add_card(
        &self,
        ctx: &RequestContext,
        name: &str,
        limit: i64,
        features: &str,
    ) -> Result<CardId> {
        Ok(self.create_card(ctx, name, limit, features).await?.id)
    }

    /// Like `add_card`, returning the stored record.
    pub async fn create_card(
        &self,
        ctx: &RequestContext,
        name: &str,
        limit: i64,
        features: &str,
    ) -> Result<CreditCard> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdvisoryError::ValidationError(
                "card name must not be empty".to_string(),
            ));
        }
        if limit <= 0 {
            return Err(AdvisoryError::ValidationError(format!(
                "card limit must be positive, got {}",
                limit
            )));
        }
        if limit > MAX_CARD_LIMIT {
            return Err(AdvisoryError::ValidationError(format!(
                "card limit must not exceed {}, got {}",
                MAX_CARD_LIMIT, limit
            )));
        }

        let new_card = NewCard {
            name: name.to_string(),
            limit,
            features: features.to_string(),
            transactions: self.policy.seed(Utc::now()),
            current_spend: self.policy.current_spend,
        };

        let card = self.store.insert_card(&ctx.username, new_card).await?;

        info!(
            username = %ctx.username,
            card_id = %card.id,
            limit = card.limit,
            "card added"
        );

        Ok(card)
    }

    pub async fn list_cards(&self, ctx: &RequestContext) -> Result<Vec<CreditCard>> {
        self.store.list_cards(&ctx.username).await
    }

    pub async fn spend_analysis(&self, ctx: &RequestContext) -> Result<SpendAnalysis> {
        let cards = self.list_cards(ctx).await?;
        analyze_spend(&cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryDocumentStore;
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    fn card(limit: i64, current_spend: i64) -> CreditCard {
        CreditCard {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            limit,
            features: String::new(),
            transactions: vec![],
            current_spend,
            added_at: Utc::now(),
        }
    }

    async fn portfolio_with_user(username: &str) -> (PortfolioStore, RequestContext) {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.create_user(username, "hash").await.unwrap();
        (PortfolioStore::new(store), RequestContext::new(username))
    }

    #[test]
    fn test_utilization_formula_and_zero_limit() {
        assert_eq!(utilization(&card(20_000, 10_000)), 50.0);
        assert_eq!(utilization(&card(0, 10_000)), 0.0);
        assert_eq!(utilization(&card(-5, 10_000)), 0.0);
    }

    #[test]
    fn test_utilization_monotonicity() {
        let spends = [0, 1_000, 5_000, 10_000, 40_000];
        for pair in spends.windows(2) {
            assert!(utilization(&card(20_000, pair[0])) < utilization(&card(20_000, pair[1])));
        }

        let limits = [10_000, 20_000, 50_000, 100_000];
        for pair in limits.windows(2) {
            assert!(utilization(&card(pair[0], 10_000)) > utilization(&card(pair[1], 10_000)));
        }
    }

    #[test]
    fn test_demo_ledger_seed_is_deterministic() {
        let now = Utc::now();
        let seeded = DEMO_LEDGER.seed(now);

        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded[0].amount, 2500);
        assert_eq!(seeded[0].category, "Dining");
        assert_eq!(seeded[0].date, now);
        assert_eq!(seeded[1].amount, 7500);
        assert_eq!(seeded[1].category, "Online Shopping");
        assert_eq!(seeded[1].date, now - Duration::days(5));
        assert_eq!(seeded, DEMO_LEDGER.seed(now));
    }

    #[tokio::test]
    async fn test_add_card_seeds_synthetic_ledger() {
        let (portfolio, ctx) = portfolio_with_user("asha").await;

        let id = portfolio
            .add_card(&ctx, "SBI Cashback", 20_000, "5% cashback online")
            .await
            .unwrap();

        let cards = portfolio.list_cards(&ctx).await.unwrap();
        assert_eq!(cards.len(), 1);

        let stored = &cards[0];
        assert_eq!(stored.id, id);
        assert_eq!(stored.current_spend, 10_000);
        assert_eq!(stored.transactions.len(), 2);
        assert_eq!(utilization(stored), 50.0);
    }

    #[tokio::test]
    async fn test_add_card_validation() {
        let (portfolio, ctx) = portfolio_with_user("asha").await;

        let err = assert_err!(portfolio.add_card(&ctx, "   ", 20_000, "").await);
        assert!(matches!(err, AdvisoryError::ValidationError(_)));

        let err = assert_err!(portfolio.add_card(&ctx, "Axis Ace", 0, "").await);
        assert!(matches!(err, AdvisoryError::ValidationError(_)));

        let err = assert_err!(portfolio.add_card(&ctx, "Axis Ace", i64::MAX, "").await);
        assert!(matches!(err, AdvisoryError::ValidationError(_)));

        assert_ok!(portfolio.add_card(&ctx, "Axis Ace", MAX_CARD_LIMIT, "").await);
        assert_eq!(portfolio.list_cards(&ctx).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_cards_are_not_stored() {
        let (portfolio, ctx) = portfolio_with_user("asha").await;
        assert_err!(portfolio.add_card(&ctx, "   ", 20_000, "").await);
        assert_err!(portfolio.add_card(&ctx, "Axis Ace", -1, "").await);

        assert!(portfolio.list_cards(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_cards_empty_is_ok() {
        let (portfolio, ctx) = portfolio_with_user("ravi").await;
        assert!(portfolio.list_cards(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spend_analysis_aggregates_cards() {
        let (portfolio, ctx) = portfolio_with_user("meera").await;
        portfolio.add_card(&ctx, "SBI Cashback", 20_000, "").await.unwrap();
        portfolio.add_card(&ctx, "Axis Atlas", 80_000, "").await.unwrap();

        let analysis = portfolio.spend_analysis(&ctx).await.unwrap();

        assert_eq!(analysis.card_count, 2);
        assert_eq!(analysis.total_limit, 100_000);
        assert_eq!(analysis.total_spend, 20_000);
        assert_eq!(analysis.utilization, 20.0);
        assert_eq!(analysis.band, RiskBand::Healthy);

        assert_eq!(analysis.categories.len(), 2);
        assert_eq!(analysis.categories[0].category, "Online Shopping");
        assert_eq!(analysis.categories[0].amount, 15_000);
        assert_eq!(analysis.categories[0].share_pct, 75.0);
        assert_eq!(analysis.categories[1].category, "Dining");
        assert_eq!(analysis.categories[1].share_pct, 25.0);
    }

    #[test]
    fn test_spend_analysis_rejects_overflowing_totals() {
        let cards = [card(i64::MAX, 10), card(i64::MAX, 10)];
        let err = analyze_spend(&cards).unwrap_err();
        assert!(matches!(err, AdvisoryError::ValidationError(_)));

        let cards = [card(100, i64::MAX), card(100, 1)];
        assert!(matches!(analyze_spend(&cards), Err(AdvisoryError::ValidationError(_))));
    }

    #[test]
    fn test_spend_analysis_at_largest_limits() {
        let cards = [card(MAX_CARD_LIMIT, 0), card(MAX_CARD_LIMIT, MAX_CARD_LIMIT)];
        let analysis = analyze_spend(&cards).unwrap();
        assert_eq!(analysis.total_limit, 2 * MAX_CARD_LIMIT);
        assert_eq!(analysis.utilization, 50.0);
    }

    #[test]
    fn test_spend_analysis_of_no_cards() {
        let analysis = analyze_spend(&[]).unwrap();
        assert_eq!(analysis.card_count, 0);
        assert_eq!(analysis.utilization, 0.0);
        assert!(analysis.categories.is_empty());
    }
}
