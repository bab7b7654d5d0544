use std::sync::Arc;

use sqlx::PgPool;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::store::{PgUserStore, StoreError, UserStore};
use crate::users::error::RepoError;
use crate::users::model::{NewUserRow, User};

/// Data access for user accounts.
///
/// Holds no state of its own; the store handle is shared and owned by the
/// caller.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Repository over the `persons` table reachable through `pool`.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgUserStore::new(pool)))
    }

    /// Insert a new user. Only the mandatory columns are written.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn save(&self, user: &User) -> Result<(), RepoError> {
        const OP: &str = "UserRepository::save";
        self.store
            .insert(&NewUserRow::from(user))
            .await
            .map_err(|e| log_failure(RepoError::from_store(OP, e)))?;
        debug!("user saved");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError> {
        const OP: &str = "UserRepository::get_by_id";
        self.store
            .fetch_by_id(id)
            .await
            .map_err(|e| log_failure(RepoError::from_store(OP, e)))
    }

    /// All users in store order.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        const OP: &str = "UserRepository::get_all";
        let users = self.store.fetch_all().await.map_err(|e| {
            // a listing never reports NoRows as absence
            let err = match RepoError::from_store(OP, e) {
                RepoError::NotFound { op } => RepoError::Unknown {
                    op,
                    source: StoreError::NoRows,
                },
                other => other,
            };
            log_failure(err)
        })?;
        debug!(count = users.len(), "users fetched");
        Ok(users)
    }
}

fn log_failure(err: RepoError) -> RepoError {
    match &err {
        RepoError::Unknown { source, .. } => {
            error!(error = %err, cause = %source, "repository failure")
        }
        _ => warn!(error = %err, "repository lookup"),
    }
    err
}
