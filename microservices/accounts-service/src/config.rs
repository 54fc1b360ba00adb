//! Configuration for the Accounts Service

use bankline_core::{BanklineError, Result, ServiceConfig};
use std::path::PathBuf;
use std::str::FromStr;

/// Which record store backs the lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = BanklineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(BanklineError::Config(format!("Unknown STORE_BACKEND: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountsConfig {
    pub service: ServiceConfig,
    pub store_backend: StoreBackend,
    /// JSON array of accounts loaded into the memory backend
    pub seed_path: Option<PathBuf>,
    /// Path the registry health check polls
    pub health_path: String,
}

impl AccountsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            service: ServiceConfig::from_env()?,
            store_backend: std::env::var("STORE_BACKEND")
                .unwrap_or_else(|_| "memory".to_string())
                .parse()?,
            seed_path: std::env::var("ACCOUNTS_SEED_PATH").ok().map(PathBuf::from),
            health_path: "/health".to_string(),
        })
    }
}
