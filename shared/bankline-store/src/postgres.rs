//! PostgreSQL-backed account store

use async_trait::async_trait;
use bankline_core::Account;
use tokio_postgres::Row;
use tracing::{debug, instrument};

use crate::{AccountStore, Result, StorePool};

/// Table layout the store reads from. `id` order is the natural record order.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id      BIGSERIAL PRIMARY KEY,
    number  TEXT NOT NULL UNIQUE,
    owner   TEXT NOT NULL,
    balance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    branch  TEXT
);
"#;

const SELECT_BY_NUMBER: &str =
    "SELECT id, number, owner, balance, branch FROM accounts WHERE number = $1";

// strpos keeps '%' and '_' in the fragment literal, unlike ILIKE.
// lower() folds per the database LC_CTYPE; under the C locale only ASCII letters fold.
const SELECT_BY_OWNER: &str = "SELECT id, number, owner, balance, branch FROM accounts \
     WHERE strpos(lower(owner), lower($1)) > 0 ORDER BY id";

const COUNT: &str = "SELECT COUNT(*) FROM accounts";

/// Account store over a pooled Postgres connection
#[derive(Clone)]
pub struct PgAccountStore {
    pool: StorePool,
}

impl PgAccountStore {
    pub fn new(pool: StorePool) -> Self {
        Self { pool }
    }

    /// Create the accounts table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        debug!("Account schema ensured");
        Ok(())
    }

    fn row_to_account(row: &Row) -> Result<Account> {
        Ok(Account {
            id: row.try_get("id")?,
            number: row.try_get("number")?,
            owner: row.try_get("owner")?,
            balance: row.try_get("balance")?,
            branch: row.try_get("branch")?,
        })
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    #[instrument(skip(self))]
    async fn find_exact(&self, number: &str) -> Result<Option<Account>> {
        let client = self.pool.get().await?;
        let row = client.query_opt(SELECT_BY_NUMBER, &[&number]).await?;
        row.as_ref().map(Self::row_to_account).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_owner_contains(&self, fragment: &str) -> Result<Vec<Account>> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT_BY_OWNER, &[&fragment]).await?;
        rows.iter().map(Self::row_to_account).collect()
    }

    async fn count(&self) -> Result<u64> {
        let client = self.pool.get().await?;
        let row = client.query_one(COUNT, &[]).await?;
        let count: i64 = row.try_get(0)?;
        Ok(count.max(0) as u64)
    }

    async fn is_healthy(&self) -> bool {
        self.pool.is_healthy().await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
