//! Accounts Service
//!
//! Read-only account lookups over a record store:
//! - Exact lookup by account number
//! - Case-insensitive partial lookup by owner name
//! - Registration with the service registry so peers can resolve it by name
//! - A discovery-aware client for calling the service from other services

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod microservice;
pub mod service;

#[cfg(test)]
mod tests;

pub use api::rest::{create_router, AppState, ReadyReport};
pub use client::{AccountsClient, ClientError};
pub use config::{AccountsConfig, StoreBackend};
pub use error::{Error, Result};
pub use metrics::{LookupMetrics, MetricsSnapshot};
pub use microservice::{build_store, AccountsMicroservice};
pub use service::AccountsService;
