//! The record store contract the query layer depends on

use async_trait::async_trait;
use bankline_core::Account;
use std::sync::Arc;

use crate::Result;

/// Read access to account records.
///
/// Absence is never an error at this layer: `find_exact` yields `None` and
/// `find_by_owner_contains` yields an empty `Vec`. Turning either into a
/// not-found outcome is the caller's job.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Exact match on the account number. At most one record.
    async fn find_exact(&self, number: &str) -> Result<Option<Account>>;

    /// Case-insensitive containment match on the owner name, in store order.
    async fn find_by_owner_contains(&self, fragment: &str) -> Result<Vec<Account>>;

    /// Number of stored accounts
    async fn count(&self) -> Result<u64>;

    /// Whether the backing store is reachable
    async fn is_healthy(&self) -> bool {
        self.count().await.is_ok()
    }

    /// Short backend name for logs and probes
    fn backend(&self) -> &'static str;
}

pub type SharedAccountStore = Arc<dyn AccountStore>;
