use async_trait::async_trait;
use models::user::User;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement, Value};
use tracing::debug;

use super::queries::{self, Queries};
use crate::errors::StoreError;

/// Persistence port for users.
///
/// `get_by_id` is the only lookup that can report a missing row; mutating
/// statements never inspect the affected-row count.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), StoreError>;
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;
    async fn get_by_id(&self, id: i64) -> Result<User, StoreError>;
    async fn update(&self, user: &User) -> Result<(), StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// SeaORM-backed store issuing the fixed statements in [`queries`].
pub struct SqlUserStore {
    db: DatabaseConnection,
    queries: &'static Queries,
}

impl SqlUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        let queries = queries::for_backend(db.get_database_backend());
        Self { db, queries }
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let stmt = self.statement(
            self.queries.insert_user,
            [Value::from(user.id), Value::from(user.name.clone()), Value::from(user.age)],
        );
        self.db.execute(stmt).await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let stmt = self.statement(self.queries.get_users, Vec::<Value>::new());
        let rows = self.db.query_all(stmt).await?;
        let users = rows
            .iter()
            .map(|row| User::from_query_result(row, "").map_err(StoreError::Scan))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        let stmt = self.statement(self.queries.get_user_by_id, [Value::from(id)]);
        let row = self.db.query_one(stmt).await?.ok_or(StoreError::NotFound)?;
        let user = User::from_query_result(&row, "")?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let stmt = self.statement(
            self.queries.update_user,
            [Value::from(user.name.clone()), Value::from(user.age), Value::from(user.id)],
        );
        self.db.execute(stmt).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let stmt = self.statement(self.queries.delete_user, [Value::from(id)]);
        self.db.execute(stmt).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::user;
    use sea_orm::EntityTrait;

    async fn store() -> Result<(SqlUserStore, DatabaseConnection), anyhow::Error> {
        let db = get_db().await?;
        Ok((SqlUserStore::new(db.clone()), db))
    }

    #[tokio::test]
    async fn create_then_get_by_id_returns_same_user() -> Result<(), anyhow::Error> {
        let (store, db) = store().await?;
        let david = User::new(1, "David", 37);
        store.create(&david).await?;

        assert_eq!(store.get_by_id(1).await?, david);
        // the row is visible through the entity as well
        assert_eq!(user::Entity::find_by_id(1).one(&db).await?, Some(david));
        Ok(())
    }

    #[tokio::test]
    async fn get_all_on_empty_table_is_empty() -> Result<(), anyhow::Error> {
        let (store, _db) = store().await?;
        assert!(store.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_all_returns_every_row() -> Result<(), anyhow::Error> {
        let (store, _db) = store().await?;
        let users = vec![User::new(1, "David", 37), User::new(2, "Jai", 47)];
        for u in &users {
            store.create(u).await?;
        }
        let mut got = store.get_all().await?;
        got.sort_by_key(|u| u.id);
        assert_eq!(got, users);
        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_without_row_is_not_found() -> Result<(), anyhow::Error> {
        let (store, _db) = store().await?;
        let err = store.get_by_id(99).await.unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_create_surfaces_db_error() -> Result<(), anyhow::Error> {
        let (store, _db) = store().await?;
        store.create(&User::new(5, "Asha", 29)).await?;
        let err = store.create(&User::new(5, "Other", 30)).await.unwrap_err();
        assert!(matches!(err, StoreError::Db(_)));
        assert_eq!(err.to_string(), "DB Error");
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_change_the_row() -> Result<(), anyhow::Error> {
        let (store, _db) = store().await?;
        store.create(&User::new(2, "jai", 40)).await?;

        store.update(&User::new(2, "Jai", 41)).await?;
        assert_eq!(store.get_by_id(2).await?, User::new(2, "Jai", 41));

        store.delete(2).await?;
        assert!(store.get_by_id(2).await.unwrap_err().is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn mutations_do_not_check_affected_rows() -> Result<(), anyhow::Error> {
        let (store, _db) = store().await?;
        store.update(&User::new(404, "ghost", 1)).await?;
        store.delete(404).await?;
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_row_fails_whole_listing() -> Result<(), anyhow::Error> {
        let (store, db) = store().await?;
        store.create(&User::new(1, "David", 37)).await?;
        // SQLite keeps non-numeric text as TEXT even in an INTEGER column
        let broken = "INSERT INTO users (id, name, age) VALUES (2, 'broken', 'not-a-number')";
        db.execute_unprepared(broken).await?;

        let err = store.get_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Scan(_)));
        assert_eq!(err.to_string(), "Scan error");
        Ok(())
    }
}
