//! In-memory account store
//!
//! Records keep the order they were loaded in, which is the order
//! containment queries return them in.

use async_trait::async_trait;
use bankline_core::Account;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::{AccountStore, Result, StoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Vec<Account>,
    by_number: HashMap<String, usize>,
}

impl InMemoryAccountStore {
    /// Build a store from records in their natural order.
    ///
    /// Fails if two records share an account number.
    pub fn new(accounts: Vec<Account>) -> Result<Self> {
        let mut by_number = HashMap::with_capacity(accounts.len());
        for (idx, account) in accounts.iter().enumerate() {
            if by_number.insert(account.number.clone(), idx).is_some() {
                return Err(StoreError::DuplicateNumber(account.number.clone()));
            }
        }
        Ok(Self { accounts, by_number })
    }

    /// Load a JSON array of accounts
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let accounts: Vec<Account> = serde_json::from_str(&raw)?;
        info!(path = %path.display(), accounts = accounts.len(), "Loaded account seed file");
        Self::new(accounts)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_exact(&self, number: &str) -> Result<Option<Account>> {
        Ok(self
            .by_number
            .get(number)
            .map(|&idx| self.accounts[idx].clone()))
    }

    async fn find_by_owner_contains(&self, fragment: &str) -> Result<Vec<Account>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.owner.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.accounts.len() as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
