use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::users::model::{NewUserRow, User};

/// Postgres-backed user store over a shared pool.
///
/// The pool is owned by the caller; this adapter only borrows connections
/// from it per statement.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx failure onto the closed set of store failures.
pub(crate) fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NoRows,
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            debug!(
                code = ?db_err.code(),
                constraint = ?db_err.constraint(),
                "unique violation"
            );
            StoreError::UniqueViolation
        }
        other => StoreError::Other(other.into()),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, row: &NewUserRow<'_>) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO persons (id, email, login, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(row.id)
        .bind(row.email)
        .bind(row.login)
        .bind(row.password_hash)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, login, password_hash, about_me, image
            FROM persons
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn fetch_all(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, login, password_hash, about_me, image
            FROM persons
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }
}
