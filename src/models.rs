//! Core data models for the advisory engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type CardId = Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinancialGoal {
    IncreaseScore,
    PremiumCard,
    ClearDebt,
    StudentLoan,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Healthy,
    Elevated,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Advisor,
    Literacy,
}

//
// ================= Session =================
//

/// Request-scoped identity. Every per-user operation takes one explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub username: String,
}

impl RequestContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

//
// ================= User =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

//
// ================= Cards =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: DateTime<Utc>,
    pub amount: i64,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CardId,
    pub name: String,
    pub limit: i64,
    pub features: String,
    pub transactions: Vec<Transaction>,
    pub current_spend: i64,
    pub added_at: DateTime<Utc>,
}

/// A validated card awaiting persistence; the store assigns id and `added_at`.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub limit: i64,
    pub features: String,
    pub transactions: Vec<Transaction>,
    pub current_spend: i64,
}

//
// ================= Advisory =================
//

/// Income, score, debt and goal a question is asked against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialSnapshot {
    pub income: i64,
    pub cibil_score: i32,
    pub debt: i64,
    pub goal: FinancialGoal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryProfile {
    pub username: String,
    #[serde(flatten)]
    pub snapshot: FinancialSnapshot,
}

impl AdvisoryProfile {
    pub fn new(ctx: &RequestContext, snapshot: FinancialSnapshot) -> Self {
        Self {
            username: ctx.username.clone(),
            snapshot,
        }
    }
}

/// Fully assembled payload for the generative service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuredPrompt {
    pub kind: PromptKind,
    pub text: String,
}

//
// ================= History =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: Uuid,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<FinancialSnapshot>,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// A consultation awaiting persistence; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewConsultation {
    pub query: String,
    pub snapshot: Option<FinancialSnapshot>,
    pub response: String,
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinancialGoal::IncreaseScore => "Increase Score",
            FinancialGoal::PremiumCard => "Get Premium Card",
            FinancialGoal::ClearDebt => "Clear Debt",
            FinancialGoal::StudentLoan => "Student Loan",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskBand::Healthy => "healthy",
            RiskBand::Elevated => "elevated",
        };
        write!(f, "{}", s)
    }
}
