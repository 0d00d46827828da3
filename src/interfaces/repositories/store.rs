use async_trait::async_trait;

use crate::{
    errors::AppError,
    repositories::{skill::SkillRepository, user::UserRepository},
};

/// A storage backend that hands out units of work.
///
/// Every repository call happens inside a transaction obtained from
/// [`Store::begin`]. Nothing a transaction wrote is visible to others until
/// [`Transaction::commit`] succeeds; dropping it uncommitted discards all of
/// its writes.
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    type Tx: UserRepository + SkillRepository + Transaction;

    async fn begin(&self) -> Result<Self::Tx, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait Transaction: Send {
    async fn commit(self) -> Result<(), AppError>;
}
