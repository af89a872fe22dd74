//! In-process [`UserStore`] used by router tests and local runs without a database.

use async_trait::async_trait;
use models::user::User;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::store::UserStore;
use crate::errors::StoreError;

/// Keeps users in insertion order, mirroring a table without an `ORDER BY`.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users: RwLock::new(users) }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::Db(DbErr::Custom(format!(
                "duplicate key value violates primary key: id={}",
                user.id
            ))));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.users.write().await.retain(|u| u.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn behaves_like_the_table() {
        let store = InMemoryUserStore::default();
        assert!(store.is_empty().await);

        store.create(&User::new(2, "Jai", 47)).await.unwrap();
        store.create(&User::new(1, "David", 37)).await.unwrap();
        let dup = store.create(&User::new(1, "Again", 1)).await.unwrap_err();
        assert!(matches!(dup, StoreError::Db(_)));

        let all = store.get_all().await.unwrap();
        assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2, 1]);

        store.update(&User::new(1, "Dave", 38)).await.unwrap();
        assert_eq!(store.get_by_id(1).await.unwrap(), User::new(1, "Dave", 38));

        store.delete(1).await.unwrap();
        assert!(store.get_by_id(1).await.unwrap_err().is_not_found());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn mutations_on_missing_rows_are_silent() {
        let store = InMemoryUserStore::with_users(vec![User::new(1, "David", 37)]);
        store.update(&User::new(9, "ghost", 1)).await.unwrap();
        store.delete(9).await.unwrap();
        assert_eq!(store.get_all().await.unwrap(), vec![User::new(1, "David", 37)]);
    }
}
