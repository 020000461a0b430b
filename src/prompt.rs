//! Advisory request builder
//!
//! Turns a financial snapshot or a student question into the text payload
//! sent to the generative service. Pure: nothing here touches the network.

use crate::error::AdvisoryError;
use crate::models::{AdvisoryProfile, PromptKind, StructuredPrompt};
use crate::Result;
use serde::{Deserialize, Serialize};

pub const MAX_CIBIL_SCORE: i32 = 900;

/// Text the Campus Sense input box shows before the student types.
pub const LITERACY_PLACEHOLDER: &str = "Ask a question about student finances...";

/// Build the advisor prompt for a profile and free-text question.
pub fn build_advisor_prompt(profile: &AdvisoryProfile, query: &str) -> Result<StructuredPrompt> {
    let snapshot = &profile.snapshot;

    if snapshot.income < 0 {
        return Err(AdvisoryError::ValidationError(format!(
            "income must not be negative, got {}",
            snapshot.income
        )));
    }
    if !(0..=MAX_CIBIL_SCORE).contains(&snapshot.cibil_score) {
        return Err(AdvisoryError::ValidationError(format!(
            "CIBIL score must be between 0 and {}, got {}",
            MAX_CIBIL_SCORE, snapshot.cibil_score
        )));
    }
    if snapshot.debt < 0 {
        return Err(AdvisoryError::ValidationError(format!(
            "debt must not be negative, got {}",
            snapshot.debt
        )));
    }

    let text = format!(
        r#"Act as CrediVue AI, a specialized financial advisor for the Indian market focused on foresight.
User: {username}, Income: ₹{income}, CIBIL: {score}, Debt: ₹{debt}, Goal: {goal}.
Question: {query}

Output format:
1. **Vue Verdict**: Safe to proceed or Risky? (The 'Vue' is your forward-looking assessment).
2. **Strategy**: 3 clear steps to reach the goal.
3. **Context**: Mention specific Indian banks/rules (RBI, CIBIL)."#,
        username = profile.username,
        income = snapshot.income,
        score = snapshot.cibil_score,
        debt = snapshot.debt,
        goal = snapshot.goal,
        query = query,
    );

    Ok(StructuredPrompt {
        kind: PromptKind::Advisor,
        text,
    })
}

/// Build the Campus Sense lesson prompt for a student question.
pub fn build_literacy_prompt(question: &str) -> Result<StructuredPrompt> {
    let trimmed = question.trim();
    if trimmed.is_empty() || trimmed == LITERACY_PLACEHOLDER {
        return Err(AdvisoryError::EmptyInput(
            "Please enter a valid question.".to_string(),
        ));
    }

    let text = format!(
        r#"Act as a highly engaging and non-judgemental financial tutor named 'CrediTutor' specifically for Indian university students.
Your goal is to be educational and practical.

Student Question: "{question}"

Provide a structured, easy-to-read answer focusing on:
1. **Lesson Goal:** What is the main principle being taught?
2. **The CrediTutor Solution:** A step-by-step practical guide.
3. **Indian Reality Check:** Mention relevant Indian terms like CIBIL, SIP, or specific banking habits."#,
        question = question,
    );

    Ok(StructuredPrompt {
        kind: PromptKind::Literacy,
        text,
    })
}

/// Ready-made Campus Sense scenarios.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LearningScenario {
    BudgetingBasics,
    BuildingCibilScore,
    LoanVsEmi,
}

impl LearningScenario {
    pub const ALL: [LearningScenario; 3] = [
        LearningScenario::BudgetingBasics,
        LearningScenario::BuildingCibilScore,
        LearningScenario::LoanVsEmi,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            LearningScenario::BudgetingBasics => "Budgeting Basics Challenge",
            LearningScenario::BuildingCibilScore => "Building CIBIL Score Challenge",
            LearningScenario::LoanVsEmi => "Loan vs. EMI Challenge",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            LearningScenario::BudgetingBasics => {
                "I have ₹12,000 pocket money for the month. How should I allocate it among food, transport, books, and entertainment to save 20%?"
            }
            LearningScenario::BuildingCibilScore => {
                "I am 18 and want a good credit score before I graduate. What is the single best action I should take now?"
            }
            LearningScenario::LoanVsEmi => {
                "I need to buy a new laptop costing ₹80,000. Should I use a BNPL (Buy Now Pay Later) option or ask my parents for a small personal loan? Compare the risks."
            }
        }
    }

    pub fn prompt(&self) -> Result<StructuredPrompt> {
        build_literacy_prompt(self.question())
    }
}
