//! Configuration management for the appointments Lambda.

use std::env;

use crate::{Error, Result};

/// Secret used when neither `SECRET_TOKEN` nor `SECRET_TOKEN_ARN` is set.
pub const DEFAULT_SECRET_TOKEN: &str = "secret_key";

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://appointments.db?mode=rwc";

/// `DATABASE_URL` value selecting the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer secret every request must present
    pub secret_token: String,
    /// ARN of a Secrets Manager secret that overrides `secret_token`
    pub secret_token_arn: Option<String>,
    /// sqlite connection URL, or `memory`
    pub database_url: String,
    /// Pool size for the sqlite store
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                Error::Config(format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}"))
            })?,
            None => 5,
        };

        Ok(Self {
            secret_token: lookup("SECRET_TOKEN").unwrap_or_else(|| DEFAULT_SECRET_TOKEN.to_string()),
            secret_token_arn: lookup("SECRET_TOKEN_ARN").filter(|arn| !arn.is_empty()),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections,
        })
    }

    /// Whether the in-process store was requested.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.secret_token, "secret_key");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert!(config.secret_token_arn.is_none());
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SECRET_TOKEN", "s3cret"),
            ("SECRET_TOKEN_ARN", "arn:aws:secretsmanager:us-east-1:1:secret:token"),
            ("DATABASE_URL", "memory"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();
        assert_eq!(config.secret_token, "s3cret");
        assert!(config.secret_token_arn.is_some());
        assert!(config.uses_memory_store());
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_invalid_pool_size() {
        let err = config_from(&[("DATABASE_MAX_CONNECTIONS", "zero")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
