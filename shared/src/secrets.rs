//! AWS Secrets Manager integration for the bearer secret.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;

use crate::{Config, Error, Result};

/// JSON shape accepted for the bearer secret.
#[derive(Debug, Deserialize)]
struct TokenSecret {
    token: String,
}

/// Get a secret string from Secrets Manager.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    response
        .secret_string()
        .map(str::to_string)
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))
}

/// Extract the bearer secret from a stored secret string.
///
/// Accepts either `{"token": "..."}` or the raw token text.
pub fn parse_token_secret(secret_string: &str) -> Result<String> {
    let trimmed = secret_string.trim();
    let token = if trimmed.starts_with('{') {
        serde_json::from_str::<TokenSecret>(trimmed)?.token
    } else {
        trimmed.to_string()
    };

    if token.is_empty() {
        return Err(Error::Config("Bearer secret is empty".to_string()));
    }
    Ok(token)
}

/// Replace `config.secret_token` with the Secrets Manager value when an ARN is configured.
pub async fn resolve_secret_token(client: &SecretsClient, config: &mut Config) -> Result<()> {
    if let Some(arn) = config.secret_token_arn.as_deref() {
        let secret_string = get_secret(client, arn).await?;
        config.secret_token = parse_token_secret(&secret_string)?;
    }
    Ok(())
}
