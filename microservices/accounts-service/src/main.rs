//! Accounts Service binary

use accounts_service::{AccountsConfig, AccountsMicroservice};
use bankline_core::{MicroserviceRuntime, ServiceDiscovery};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bankline_telemetry::init("accounts-service")?;

    info!("Starting Accounts Service");

    let config = AccountsConfig::from_env()?;
    let discovery = ServiceDiscovery::from_env();

    let service = Arc::new(AccountsMicroservice::new(config, discovery).await?);
    MicroserviceRuntime::run(service).await?;

    Ok(())
}
