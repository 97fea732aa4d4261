use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Pool, Postgres, Transaction, postgres::PgPoolOptions};

use crate::conf::Settings;
use crate::pkg::internal::store::{JobStore, PgStore};
use crate::prelude::Result;

/// Request-scoped transactions on the pool.
#[async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;

    /// Read-only transaction with one snapshot for every statement in it.
    async fn begin_read_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait]
impl GetTxn for PgPool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }

    async fn begin_read_txn(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

pub fn db_pool(conf: &Settings) -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(conf.database_pool_max_connections)
        .acquire_timeout(Duration::from_secs(conf.database_acquire_timeout_secs))
        .connect_lazy(&conf.database_url)?;
    Ok(pool)
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
}

impl AppState {
    pub fn new(conf: &Settings) -> Result<AppState> {
        let pool = Arc::new(db_pool(conf)?);
        Ok(AppState {
            store: Arc::new(PgStore::new(pool)),
        })
    }

    pub fn with_store(store: Arc<dyn JobStore>) -> AppState {
        AppState { store }
    }
}
