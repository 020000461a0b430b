//! Environment-driven configuration

use crate::error::AdvisoryError;
use crate::Result;
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_JWT_ISSUER: &str = "credivue";
pub const DEFAULT_JWT_AUDIENCE: &str = "credivue-users";
pub const DEFAULT_JWT_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Left unset, the service default applies.
    pub temperature: Option<f32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret; unset means an ephemeral one per process.
    pub secret: Option<String>,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: DEFAULT_JWT_ISSUER.to_string(),
            audience: DEFAULT_JWT_AUDIENCE.to_string(),
            ttl_minutes: DEFAULT_JWT_TTL_MINUTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub auth: AuthConfig,
    pub database_url: Option<String>,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let temperature = match non_empty("GEMINI_TEMPERATURE") {
            Some(raw) => Some(raw.trim().parse::<f32>().map_err(|_| {
                AdvisoryError::ConfigError(format!("GEMINI_TEMPERATURE is not a number: {}", raw))
            })?),
            None => None,
        };

        let gemini = GeminiConfig {
            api_key: non_empty("GEMINI_API_KEY").unwrap_or_default(),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            temperature,
        };

        let ttl_minutes = match non_empty("JWT_TTL_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(AdvisoryError::ConfigError(format!(
                        "JWT_TTL_MINUTES must be a positive number: {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_JWT_TTL_MINUTES,
        };

        let auth = AuthConfig {
            secret: non_empty("JWT_SECRET"),
            issuer: non_empty("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
            audience: non_empty("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_JWT_AUDIENCE.to_string()),
            ttl_minutes,
        };

        let database_url = non_empty("DATABASE_URL").or_else(|| non_empty("POSTGRES_URL"));

        let port = match non_empty("PORT").or_else(|| non_empty("API_PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AdvisoryError::ConfigError(format!("PORT is not a valid port: {}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gemini,
            auth,
            database_url,
            port,
        })
    }
}
