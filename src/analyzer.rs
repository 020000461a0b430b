//! Utilization and risk analyzer
//!
//! Rules-based presentation signals derived from a card snapshot.
//! Deterministic; recomputed on every call.

use crate::models::{CreditCard, RiskBand};
use crate::portfolio::utilization;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Utilization (percent) at and above which a card is `Elevated`.
pub const ELEVATED_THRESHOLD: f64 = 30.0;

/// Card-name fragments that route to the cashback suggestion.
const CASHBACK_TRIGGERS: &[&str] = &["cashback", "millennia"];

pub fn risk_band(utilization: f64) -> RiskBand {
    if utilization < ELEVATED_THRESHOLD {
        RiskBand::Healthy
    } else {
        RiskBand::Elevated
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfferHint {
    CashbackMaximization,
    TravelRewards,
}

impl OfferHint {
    pub fn message(&self) -> &'static str {
        match self {
            OfferHint::CashbackMaximization => {
                "Use this card for all major online spending this month to trigger the bonus cashback tier."
            }
            OfferHint::TravelRewards => {
                "Look for Travel partners to maximize the value of this card's points system."
            }
        }
    }
}

impl fmt::Display for OfferHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Route a card to its offer suggestion by case-insensitive name match.
pub fn offer_hint(card_name: &str) -> OfferHint {
    let name = card_name.to_lowercase();

    if CASHBACK_TRIGGERS.iter().any(|t| name.contains(t)) {
        OfferHint::CashbackMaximization
    } else {
        OfferHint::TravelRewards
    }
}

/// Everything the card view needs to render one card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardInsight {
    pub utilization: f64,
    pub band: RiskBand,
    pub offer_hint: OfferHint,
    pub offer_message: String,
    pub health_message: String,
}

impl CardInsight {
    pub fn for_card(card: &CreditCard) -> Self {
        let utilization = utilization(card);
        let band = risk_band(utilization);
        let hint = offer_hint(&card.name);

        Self {
            utilization,
            band,
            offer_hint: hint,
            offer_message: hint.message().to_string(),
            health_message: health_message(utilization),
        }
    }
}

/// Credit-health meter text, one decimal place.
pub fn health_message(utilization: f64) -> String {
    match risk_band(utilization) {
        RiskBand::Healthy => format!("Low Utilization: {:.1}%", utilization),
        RiskBand::Elevated => format!("High Utilization: {:.1}% (Pay down now!)", utilization),
    }
}
