//! Account Store Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Seed file error: {0}")]
    Seed(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate account number: {0}")]
    DuplicateNumber(String),
}

impl From<StoreError> for bankline_core::BanklineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Configuration(msg) => Self::Config(msg),
            StoreError::Pool(msg) => Self::Unavailable(msg),
            other => Self::Database(other.to_string()),
        }
    }
}
