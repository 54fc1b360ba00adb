//! Bankline Core - Shared domain types and service infrastructure
//!
//! This crate provides:
//! - Standard service trait all microservices must implement
//! - The account domain model shared by the store and the services
//! - Error handling utilities
//! - Configuration management
//! - Service registry client

pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use discovery::{DiscoveryMode, ServiceDiscovery};
pub use domain::*;
pub use error::{BanklineError, Result};
pub use service::{BanklineService, DependencyStatus, HealthStatus, MicroserviceRuntime, ReadinessStatus};
