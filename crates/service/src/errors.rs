use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by a [`UserStore`](crate::users::UserStore).
///
/// Every variant belongs to the `DB` family; callers that care about a missing
/// row check [`StoreError::is_not_found`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("DB Error")]
    Db(#[from] DbErr),
    #[error("DB Error: no rows in result set")]
    NotFound,
    #[error("Scan error")]
    Scan(#[source] DbErr),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Parameter {} is required for this request", .0.join(", "))]
    MissingParam(Vec<String>),
    #[error("Incorrect value for parameter: {}", .0.join(", "))]
    InvalidParam(Vec<String>),
    #[error("No '{entity}' found for Id: '{id}'")]
    EntityNotFound { entity: String, id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn missing(param: &str) -> Self {
        Self::MissingParam(vec![param.to_string()])
    }

    pub fn invalid(param: &str) -> Self {
        Self::InvalidParam(vec![param.to_string()])
    }

    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::EntityNotFound { entity: entity.to_string(), id: id.to_string() }
    }
}
