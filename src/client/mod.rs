//! Generative advisory client trait and implementations
//!
//! The advisory text comes from an external model; the engine only relies on
//! the boundary `StructuredPrompt -> String`. One call per request, with no
//! caching, retries or fallback text.

use crate::error::AdvisoryError;
use crate::models::StructuredPrompt;
use crate::Result;
use async_trait::async_trait;
use std::sync::Mutex;

pub mod gemini;
pub use gemini::GeminiClient;

/// Trait for the external text-generation service
#[async_trait]
pub trait AdvisoryClient: Send + Sync {
    /// Send the prompt and return the raw response text.
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<String>;
}

/// Mock client for development & testing
/// Keeps the engine usable without network access
pub struct MockAdvisoryClient {
    outcome: std::result::Result<String, String>,
    seen: Mutex<Vec<StructuredPrompt>>,
}

impl MockAdvisoryClient {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with a `ServiceError` carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<StructuredPrompt> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl AdvisoryClient for MockAdvisoryClient {
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<String> {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(prompt.clone()),
            Err(poisoned) => poisoned.into_inner().push(prompt.clone()),
        }

        self.outcome
            .clone()
            .map_err(AdvisoryError::ServiceError)
    }
}
