//! Credential store
//!
//! Usernames are unique; passwords are kept only as a lowercase hex SHA-256
//! digest. Hashes are unsalted so that digests already on record keep
//! validating.

use crate::error::AdvisoryError;
use crate::models::{RequestContext, User};
use crate::store::DocumentStore;
use crate::Result;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};

/// Deterministic one-way digest of a plaintext password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub struct CredentialStore {
    store: Arc<dyn DocumentStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a user; `AlreadyExists` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AdvisoryError::ValidationError(
                "Please enter both username and password".to_string(),
            ));
        }

        match self.store.create_user(username, &hash_password(password)).await {
            Ok(user) => {
                info!(username = %username, "user registered");
                Ok(user)
            }
            Err(AdvisoryError::AlreadyExists(name)) => {
                warn!(username = %name, "registration rejected: username taken");
                Err(AdvisoryError::AlreadyExists(name))
            }
            Err(e) => Err(e),
        }
    }

    /// True iff the user exists and the password digest matches.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let Some(user) = self.store.get_user(username).await? else {
            return Ok(false);
        };

        Ok(user.password_hash == hash_password(password))
    }

    pub async fn exists(&self, username: &str) -> Result<bool> {
        self.store.user_exists(username).await
    }

    /// Authenticate and mint the request context for subsequent calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<RequestContext> {
        if self.authenticate(username, password).await? {
            info!(username = %username, "login succeeded");
            Ok(RequestContext::new(username))
        } else {
            warn!(username = %username, "login failed");
            Err(AdvisoryError::InvalidCredentials)
        }
    }
}
