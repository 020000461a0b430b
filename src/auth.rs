//! Session tokens
//!
//! `login` proves a password once; the HTTP layer then carries the caller's
//! identity as a signed HS256 token whose subject is the username.

use crate::config::AuthConfig;
use crate::error::AdvisoryError;
use crate::models::RequestContext;
use crate::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// What `login` hands back to an HTTP caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub username: String,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenKeys {
    /// Without a configured secret, a random per-process one is used and
    /// tokens do not survive a restart.
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = match &config.secret {
            Some(secret) => secret.clone(),
            None => {
                warn!("JWT_SECRET not set; using an ephemeral signing secret");
                format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
            }
        };

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::minutes(config.ttl_minutes),
        }
    }

    pub fn issue(&self, ctx: &RequestContext) -> Result<IssuedToken> {
        let now = Utc::now();
        let claims = Claims {
            sub: ctx.username.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AdvisoryError::TokenError(e.to_string()))?;
        debug!(username = %ctx.username, "token issued");

        Ok(IssuedToken {
            username: ctx.username.clone(),
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Check signature, expiry, issuer and audience; yields the token's owner.
    pub fn verify(&self, token: &str) -> Result<RequestContext> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AdvisoryError::Unauthorized("invalid or expired token".to_string())
        })?;

        Ok(RequestContext::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, issuer: &str, ttl_minutes: i64) -> AuthConfig {
        AuthConfig {
            secret: Some(secret.to_string()),
            issuer: issuer.to_string(),
            audience: "credivue-users".to_string(),
            ttl_minutes,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = TokenKeys::from_config(&config("dev-secret", "credivue", 60));
        let issued = keys.issue(&RequestContext::new("asha")).unwrap();

        assert_eq!(issued.username, "asha");
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 3600);

        let ctx = keys.verify(&issued.token).unwrap();
        assert_eq!(ctx.username, "asha");
    }

    #[test]
    fn test_verify_rejects_other_secret_and_issuer() {
        let keys = TokenKeys::from_config(&config("dev-secret", "credivue", 60));
        let token = keys.issue(&RequestContext::new("asha")).unwrap().token;

        let other_secret = TokenKeys::from_config(&config("other-secret", "credivue", 60));
        assert!(matches!(other_secret.verify(&token), Err(AdvisoryError::Unauthorized(_))));

        let other_issuer = TokenKeys::from_config(&config("dev-secret", "elsewhere", 60));
        assert!(matches!(other_issuer.verify(&token), Err(AdvisoryError::Unauthorized(_))));
    }

    #[test]
    fn test_verify_rejects_expired_and_garbage() {
        let keys = TokenKeys::from_config(&config("dev-secret", "credivue", -10));
        let token = keys.issue(&RequestContext::new("asha")).unwrap().token;
        assert!(matches!(keys.verify(&token), Err(AdvisoryError::Unauthorized(_))));

        assert!(matches!(keys.verify("not-a-token"), Err(AdvisoryError::Unauthorized(_))));
    }

    #[test]
    fn test_ephemeral_secrets_differ() {
        let mut unset = config("x", "credivue", 60);
        unset.secret = None;

        let first = TokenKeys::from_config(&unset);
        let second = TokenKeys::from_config(&unset);
        let token = first.issue(&RequestContext::new("asha")).unwrap().token;

        assert!(first.verify(&token).is_ok());
        assert!(second.verify(&token).is_err());
    }
}
