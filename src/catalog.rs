//! Static catalog data: curated offers and the demo spend breakdown.

use crate::portfolio::CategorySpend;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub card: String,
    #[serde(rename = "type")]
    pub offer_type: String,
    pub benefit: String,
    pub url: String,
}

fn offer(card: &str, offer_type: &str, benefit: &str, url: &str) -> Offer {
    Offer {
        card: card.to_string(),
        offer_type: offer_type.to_string(),
        benefit: benefit.to_string(),
        url: url.to_string(),
    }
}

lazy_static! {
    pub static ref OFFER_CATALOG: Vec<Offer> = vec![
        offer(
            "IDFC First WOW",
            "Secured (FD)",
            "No CIBIL Required. 6.5% Interest on FD.",
            "https://www.idfcfirstbank.com/credit-card/first-wow",
        ),
        offer(
            "SBI Cashback",
            "Shopping",
            "5% Flat Cashback on Online Spends.",
            "https://www.sbicard.com/en/personal/credit-cards/cashback-credit-card.page",
        ),
        offer(
            "HDFC Millennia",
            "All Rounder",
            "5% Cashback on Amazon/Flipkart + Free Lounge.",
            "https://www.hdfcbank.com/personal/pay/cards/credit-cards/millennia-credit-card",
        ),
        offer(
            "Axis Ace",
            "Utility Bills",
            "5% Cashback on GPay Bill Payments.",
            "https://www.axisbank.com/retail/cards/credit-card/axis-ace-credit-card",
        ),
    ];
}

/// Monthly category totals shown on the analysis view before real data exists.
pub const DEMO_SPEND_BREAKDOWN: &[(&str, i64)] = &[
    ("Dining", 4500),
    ("Travel", 2000),
    ("UPI (Small Merchant)", 1500),
    ("Shopping", 8000),
    ("Fuel", 3000),
];

pub const SHOPPING_INSIGHT: &str = "**CrediVue Insight:** Your 'Shopping' spend is 42% of your total. Utilize the **SBI Cashback Card** for online purchases to maximize rewards and save roughly ₹400/month.";

pub const UTILIZATION_ALERT: &str = "**Utilization Alert:** You have used 45% of your limit. Paying down ₹5,000 immediately is crucial to improve your CIBIL score quickly.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Tip,
    Alert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoInsight {
    pub level: InsightLevel,
    pub text: String,
}

/// Sample month for the analysis view, with its canned insights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoSpendBreakdown {
    pub title: String,
    pub total: i64,
    pub categories: Vec<CategorySpend>,
    pub insights: Vec<DemoInsight>,
}

pub fn offers() -> &'static [Offer] {
    &OFFER_CATALOG
}

/// Demo breakdown in display order; shares are percentages of the month's total.
pub fn demo_spend_breakdown() -> DemoSpendBreakdown {
    let total: i64 = DEMO_SPEND_BREAKDOWN.iter().map(|(_, amount)| amount).sum();

    let categories = DEMO_SPEND_BREAKDOWN
        .iter()
        .map(|&(category, amount)| CategorySpend {
            category: category.to_string(),
            amount,
            share_pct: amount as f64 / total as f64 * 100.0,
        })
        .collect();

    DemoSpendBreakdown {
        title: "Spending Breakdown (This Month)".to_string(),
        total,
        categories,
        insights: vec![
            DemoInsight {
                level: InsightLevel::Tip,
                text: SHOPPING_INSIGHT.to_string(),
            },
            DemoInsight {
                level: InsightLevel::Alert,
                text: UTILIZATION_ALERT.to_string(),
            },
        ],
    }
}
