//! Service layer for the user resource.
//! - Separates business validation from data access.
//! - Reuses the entity definition in the `models` crate.
//! - Store access sits behind the `UserStore` port so it can be swapped or mocked.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod users;

pub use errors::{ServiceError, StoreError};
