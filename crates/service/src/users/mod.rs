//! User pipeline below the HTTP layer: store port, SQL and in-memory stores, service.

pub mod memory;
pub mod queries;
pub mod service;
pub mod store;

pub use memory::InMemoryUserStore;
pub use service::{UserOperations, UserService, USER_ENTITY};
pub use store::{SqlUserStore, UserStore};
