use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::users::model::{NewUserRow, User};

/// In-process user store with the same uniqueness rules as the `persons`
/// table: `id`, `email` and `login` are each unique. Rows come back in
/// insertion order.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, row: &NewUserRow<'_>) -> Result<(), StoreError> {
        // Check and push under one write guard so racing inserts see each other.
        let mut rows = self.rows.write().await;
        let clash = rows
            .iter()
            .any(|u| u.id == row.id || u.email == row.email || u.login == row.login);
        if clash {
            return Err(StoreError::UniqueViolation);
        }
        rows.push(User::from(row));
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    async fn fetch_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.rows.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn concurrent_inserts_with_same_login_admit_one() {
        let store = Arc::new(MemoryUserStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let email = format!("user{i}@x.com");
                store
                    .insert(&NewUserRow {
                        id: Uuid::new_v4(),
                        email: &email,
                        login: "shared",
                        password_hash: "h",
                    })
                    .await
                    .is_ok()
            }));
        }

        let mut accepted = 0;
        for h in handles {
            if h.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(store.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fetch_all_keeps_insertion_order() {
        let store = MemoryUserStore::new();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for (i, id) in ids.iter().enumerate() {
            let email = format!("{i}@x.com");
            let login = format!("user{i}");
            store
                .insert(&NewUserRow {
                    id: *id,
                    email: &email,
                    login: &login,
                    password_hash: "h",
                })
                .await
                .unwrap();
        }

        let fetched: Vec<Uuid> = store
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(fetched, ids);
    }
}
