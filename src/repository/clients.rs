//! Clients store
//!
//! Client rows are written by sync jobs outside this server; the only
//! operation the dashboard needs is the active head count.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Persistence operations for the local client book
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Number of clients currently marked active
    async fn count_active(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct PgClientStore {
    pool: Pool<Postgres>,
}

impl PgClientStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE active = TRUE")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
