//! CrediVue Advisory Engine
//!
//! The core behind a personal credit-card advisory dashboard:
//! - Registers users and checks their credentials
//! - Keeps each user's credit cards and their (synthetic) ledgers
//! - Derives utilization, risk bands and card-specific offer hints
//! - Builds advisor and literacy prompts for a generative model
//! - Records every advisor consultation in a per-user history
//!
//! REQUEST FLOW:
//! INPUT → BUILD PROMPT → GENERATE → RECORD → RESPOND

pub mod advisor;
pub mod analyzer;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod history;
pub mod models;
pub mod portfolio;
pub mod prompt;
pub mod store;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use advisor::Advisor;
pub use analyzer::{offer_hint, risk_band, CardInsight, OfferHint};
pub use portfolio::utilization;
pub use prompt::{build_advisor_prompt, build_literacy_prompt};
