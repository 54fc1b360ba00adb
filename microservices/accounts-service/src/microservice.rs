//! Composition root: store wiring, registry registration and server lifecycle

use async_trait::async_trait;
use bankline_core::{
    BanklineError, BanklineService, HealthStatus, ReadinessStatus, Result, ServiceDiscovery,
};
use bankline_store::{
    InMemoryAccountStore, PgAccountStore, PoolConfig, SharedAccountStore, StoreError, StorePool,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::rest::{self, AppState, SERVICE_ID};
use crate::{AccountsConfig, AccountsService, StoreBackend};

/// Build the record store selected by the configuration
pub async fn build_store(config: &AccountsConfig) -> std::result::Result<SharedAccountStore, StoreError> {
    match config.store_backend {
        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => InMemoryAccountStore::from_seed_file(path)?,
                None => {
                    warn!("No ACCOUNTS_SEED_PATH set, starting with an empty in-memory store");
                    InMemoryAccountStore::default()
                }
            };
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let pool = StorePool::new(&PoolConfig::from_env()?)?;
            let store = PgAccountStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}

pub struct AccountsMicroservice {
    config: AccountsConfig,
    state: AppState,
    discovery: ServiceDiscovery,
    registration: Mutex<Option<String>>,
}

impl AccountsMicroservice {
    pub async fn new(config: AccountsConfig, discovery: ServiceDiscovery) -> Result<Self> {
        let store = build_store(&config).await?;
        Ok(Self::with_store(config, discovery, store).await)
    }

    /// Wire the service around an already-built store
    pub async fn with_store(
        config: AccountsConfig,
        discovery: ServiceDiscovery,
        store: SharedAccountStore,
    ) -> Self {
        match store.count().await {
            Ok(count) => info!(
                backend = store.backend(),
                accounts = count,
                "Account store ready"
            ),
            Err(e) => warn!(backend = store.backend(), "Could not count accounts: {}", e),
        }

        Self {
            config,
            state: AppState::new(AccountsService::new(store)),
            discovery,
            registration: Mutex::new(None),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    async fn register(&self) -> Result<()> {
        let service = &self.config.service;
        let id = self
            .discovery
            .register_service(
                &service.service_name,
                &service.advertise_host,
                service.http_port,
                &self.config.health_path,
            )
            .await
            .map_err(|e| BanklineError::Registry(e.to_string()))?;

        *self.registration.lock() = id;
        Ok(())
    }
}

#[async_trait]
impl BanklineService for AccountsMicroservice {
    fn service_id(&self) -> &'static str {
        SERVICE_ID
    }

    async fn health(&self) -> HealthStatus {
        self.state.health()
    }

    async fn ready(&self) -> ReadinessStatus {
        self.state.readiness().await
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Accounts Service");

        let registration = self.registration.lock().take();
        if let Some(id) = registration {
            self.discovery
                .deregister_service(&id)
                .await
                .map_err(|e| BanklineError::Registry(e.to_string()))?;
        }
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        let bind = self.config.service.bind_address();
        info!(
            http = %bind,
            name = %self.config.service.service_name,
            "Starting Accounts Service server"
        );

        let router = rest::create_router(self.state.clone());
        let listener = tokio::net::TcpListener::bind(&bind).await?;

        self.register().await?;

        axum::serve(listener, router).await?;

        Ok(())
    }
}
