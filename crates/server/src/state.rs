use std::sync::Arc;

use service::users::{UserOperations, UserService, UserStore};

/// Shared handler state. Cloned per request, so it only holds `Arc`s.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<dyn UserOperations>,
}

impl ServerState {
    pub fn new(users: Arc<dyn UserOperations>) -> Self {
        Self { users }
    }

    /// Wire a store into a `UserService` and wrap it as handler state.
    pub fn from_store<S>(store: S) -> Self
    where
        S: UserStore + 'static,
    {
        Self::new(Arc::new(UserService::new(Arc::new(store))))
    }
}
