//! Store adapters behind the user repository.
//!
//! Adapters are the only place where driver-specific failures are inspected.
//! Everything they return is already classified into [`StoreError`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::users::model::{NewUserRow, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Classified store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("no rows returned")]
    NoRows,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the mandatory columns of a user row.
    async fn insert(&self, row: &NewUserRow<'_>) -> Result<(), StoreError>;
    /// Fetch one row by primary key, `NoRows` when absent.
    async fn fetch_by_id(&self, id: Uuid) -> Result<User, StoreError>;
    async fn fetch_all(&self) -> Result<Vec<User>, StoreError>;
}
