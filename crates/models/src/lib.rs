//! Entity definitions, the success envelope, and connection helpers.

pub mod db;
pub mod response;
pub mod user;

pub use response::{Payload, Response};
pub use user::User;
