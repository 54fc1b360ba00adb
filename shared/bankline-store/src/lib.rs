//! Bankline Account Store
//!
//! Read-side record store for accounts: the `AccountStore` trait the services
//! depend on, a PostgreSQL implementation over a pooled connection, and an
//! ordered in-memory implementation for seed data and tests.

mod accounts;
mod error;
mod memory;
mod pool;
mod postgres;

pub use accounts::{AccountStore, SharedAccountStore};
pub use error::{Result, StoreError};
pub use memory::InMemoryAccountStore;
pub use pool::{PoolConfig, StorePool};
pub use postgres::{PgAccountStore, SCHEMA};
