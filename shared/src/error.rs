//! Error types for the appointment booking service.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving appointment requests.
///
/// A missing appointment is not an error: lookups return `Option` or `bool`.
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential did not match the configured secret
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Unauthorized(_) => 401,
            _ => 500,
        }
    }

    /// Message safe to return to a caller.
    ///
    /// Server-side failures collapse to a generic message; the detail goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Unauthorized(_) => "Unauthorized".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("bad".into()).status_code(), 400);
        assert_eq!(Error::Unauthorized("nope".into()).status_code(), 401);
        assert_eq!(Error::Database(sqlx::Error::PoolTimedOut).status_code(), 500);
        assert_eq!(Error::Config("missing".into()).status_code(), 500);
    }

    #[test]
    fn test_storage_fault_message_is_generic() {
        let err = Error::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.public_message(), "Internal server error");
    }
}
