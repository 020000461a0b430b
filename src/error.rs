//! Error types for the advisory engine

use thiserror::Error;

/// Result type alias for advisory engine operations
pub type Result<T> = std::result::Result<T, AdvisoryError>;

#[derive(Error, Debug)]
pub enum AdvisoryError {

    // =============================
    // Domain Errors
    // =============================

    #[error("Username already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Advisory service error: {0}")]
    ServiceError(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // =============================
    // Infrastructure Errors
    // =============================

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Token error: {0}")]
    TokenError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdvisoryError {
    /// True for failures the caller caused and can fix by changing input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AdvisoryError::AlreadyExists(_)
                | AdvisoryError::InvalidCredentials
                | AdvisoryError::ValidationError(_)
                | AdvisoryError::EmptyInput(_)
                | AdvisoryError::UserNotFound(_)
                | AdvisoryError::Unauthorized(_)
                | AdvisoryError::Forbidden(_)
        )
    }
}
