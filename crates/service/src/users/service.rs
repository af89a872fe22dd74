use std::sync::Arc;

use async_trait::async_trait;
use models::user::User;
use tracing::{info, instrument, warn};

use super::store::UserStore;
use crate::errors::ServiceError;

pub const USER_ENTITY: &str = "user";

/// Business operations the HTTP layer depends on.
#[async_trait]
pub trait UserOperations: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), ServiceError>;
    async fn get_all(&self) -> Result<Vec<User>, ServiceError>;
    async fn get_by_id(&self, id: i64) -> Result<User, ServiceError>;
    async fn update(&self, user: &User) -> Result<(), ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

/// Application service enforcing id positivity and existence before mutation.
pub struct UserService<S: UserStore> {
    store: Arc<S>,
}

fn validate_id(id: i64) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::invalid("id"));
    }
    Ok(())
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Existence probe ahead of update/delete.
    ///
    /// Any probe failure, including an unrelated storage error, is reported as
    /// `EntityNotFound`; the original cause only reaches the log.
    async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError> {
        if let Err(e) = self.store.get_by_id(id).await {
            warn!(user_id = id, error = %e, not_found = e.is_not_found(), "existence probe failed");
            return Err(ServiceError::not_found(USER_ENTITY, id));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: UserStore> UserOperations for UserService<S> {
    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn create(&self, user: &User) -> Result<(), ServiceError> {
        self.store.create(user).await?;
        info!(user_id = user.id, "user_created");
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.get_all().await?)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<User, ServiceError> {
        validate_id(id)?;
        Ok(self.store.get_by_id(id).await?)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update(&self, user: &User) -> Result<(), ServiceError> {
        validate_id(user.id)?;
        self.ensure_exists(user.id).await?;
        self.store.update(user).await?;
        info!(user_id = user.id, "user_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        validate_id(id)?;
        self.ensure_exists(id).await?;
        self.store.delete(id).await?;
        info!(user_id = id, "user_deleted");
        Ok(())
    }
}
