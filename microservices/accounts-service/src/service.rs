//! Account query service
//!
//! Turns the two lookup shapes into store queries and converts absence into
//! `Error::AccountNotFound`. Holds no per-request state.

use bankline_core::{is_well_formed_number, Account};
use bankline_store::SharedAccountStore;
use std::time::Instant;
use tracing::{debug, info};

use crate::{Error, LookupMetrics, Result};

#[derive(Clone)]
pub struct AccountsService {
    store: SharedAccountStore,
    metrics: LookupMetrics,
}

impl AccountsService {
    pub fn new(store: SharedAccountStore) -> Self {
        Self::with_metrics(store, LookupMetrics::new())
    }

    pub fn with_metrics(store: SharedAccountStore, metrics: LookupMetrics) -> Self {
        Self { store, metrics }
    }

    /// Fetch the account with the given number.
    ///
    /// The number is not validated; anything the store cannot match is
    /// reported as not found.
    pub async fn by_number(&self, number: &str) -> Result<Account> {
        info!(number, "accounts-service by_number() invoked");
        if !is_well_formed_number(number) {
            debug!(number, "Account number is not nine digits");
        }

        self.metrics.by_number();
        let started = Instant::now();
        let found = self.store.find_exact(number).await;
        self.metrics.observe(started);

        match found {
            Ok(Some(account)) => {
                info!(number, owner = %account.owner, "accounts-service by_number() found");
                Ok(account)
            }
            Ok(None) => {
                info!(number, "accounts-service by_number() found nothing");
                self.metrics.not_found();
                Err(Error::AccountNotFound(number.to_string()))
            }
            Err(e) => {
                self.metrics.store_error();
                Err(e.into())
            }
        }
    }

    /// Fetch every account whose owner name contains `fragment`, ignoring case.
    ///
    /// Results keep the store's order. Never returns an empty list: no match
    /// is `Error::AccountNotFound(fragment)`.
    pub async fn by_owner(&self, fragment: &str) -> Result<Vec<Account>> {
        info!(
            fragment,
            backend = self.store.backend(),
            "accounts-service by_owner() invoked"
        );

        self.metrics.by_owner();
        if fragment.is_empty() {
            self.metrics.not_found();
            return Err(Error::AccountNotFound(String::new()));
        }

        let started = Instant::now();
        let found = self.store.find_by_owner_contains(fragment).await;
        self.metrics.observe(started);

        let accounts = match found {
            Ok(accounts) => accounts,
            Err(e) => {
                self.metrics.store_error();
                return Err(e.into());
            }
        };

        info!(fragment, matches = accounts.len(), "accounts-service by_owner() found");

        if accounts.is_empty() {
            self.metrics.not_found();
            return Err(Error::AccountNotFound(fragment.to_string()));
        }
        Ok(accounts)
    }

    /// Number of accounts in the store, for diagnostics
    pub async fn account_count(&self) -> Result<u64> {
        Ok(self.store.count().await?)
    }

    pub async fn store_healthy(&self) -> bool {
        self.store.is_healthy().await
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }
}
