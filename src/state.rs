use std::sync::Arc;

use sqlx::PgPool;

use crate::store::MemoryUserStore;
use crate::users::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
}

impl AppState {
    pub fn from_parts(db: PgPool) -> Self {
        Self {
            users: UserRepository::postgres(db),
        }
    }

    /// State backed by an in-memory store, for tests and local poking.
    pub fn fake() -> Self {
        Self {
            users: UserRepository::new(Arc::new(MemoryUserStore::new())),
        }
    }
}
