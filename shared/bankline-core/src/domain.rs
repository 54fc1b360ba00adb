//! Core domain types used across all microservices

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an account number in the reference domain
pub const ACCOUNT_NUMBER_LEN: usize = 9;

/// A bank account record.
///
/// `number` is the business key and is unique across the store. `owner` is
/// free text and may repeat. `balance` and `branch` are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub number: String,
    pub owner: String,
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Account {
    pub fn new(id: i64, number: impl Into<String>, owner: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id,
            number: number.into(),
            owner: owner.into(),
            balance,
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Case-insensitive substring match against the owner name
    pub fn owner_contains(&self, fragment: &str) -> bool {
        self.owner.to_lowercase().contains(&fragment.to_lowercase())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.number, self.owner, self.balance)
    }
}

/// Whether `number` has the reference shape of nine ASCII digits.
///
/// Lookups never reject on this; it only feeds diagnostics.
pub fn is_well_formed_number(number: &str) -> bool {
    number.len() == ACCOUNT_NUMBER_LEN && number.bytes().all(|b| b.is_ascii_digit())
}
