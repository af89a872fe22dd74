use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Row of the `users` table. `id` is chosen by the caller.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type User = Model;

impl Model {
    pub fn new(id: i64, name: impl Into<String>, age: i32) -> Self {
        Self { id, name: name.into(), age }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_requires_every_field() {
        let ok: Result<User, _> = serde_json::from_str(r#"{"id":1,"name":"David","age":37}"#);
        assert_eq!(ok.unwrap(), User::new(1, "David", 37));

        let missing_id: Result<User, _> = serde_json::from_str(r#"{"name":"David","age":37}"#);
        assert!(missing_id.is_err());

        let wrong_type: Result<User, _> =
            serde_json::from_str(r#"{"id":"one","name":"David","age":37}"#);
        assert!(wrong_type.is_err());
    }
}
