use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use crate::{
    errors::AppError,
    repositories::store::{Store, Transaction},
};

#[derive(Clone)]
pub struct SqlxStore {
    pub pool: PgPool,
}

/// One PostgreSQL transaction. sqlx rolls it back when dropped uncommitted.
pub struct SqlxTx {
    pub(crate) tx: sqlx::Transaction<'static, Postgres>,
}

impl SqlxStore {
    pub fn new(pool: PgPool) -> Self {
        SqlxStore { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for SqlxStore {
    type Tx = SqlxTx;

    async fn begin(&self) -> Result<SqlxTx, AppError> {
        let tx = self.pool.begin().await?;
        Ok(SqlxTx { tx })
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}

#[async_trait]
impl Transaction for SqlxTx {
    async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::from)
    }
}
