//! Appointments API Lambda - book, list, check, cancel and reschedule appointments.
//!
//! Routing lives in `shared::api`; this binary loads configuration and runs the handler.

use lambda_http::{run, service_fn, Error};
use shared::{resolve_secret_token, AppState, Config};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let mut config = Config::from_env()?;

    if config.secret_token_arn.is_some() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);
        resolve_secret_token(&secrets_client, &mut config).await?;
        info!("Bearer secret loaded from Secrets Manager");
    }

    let state = Arc::new(AppState::new(&config).await?);
    info!("Appointments API ready");

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { shared::handler(state, event).await }
    }))
    .await
}
