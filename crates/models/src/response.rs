//! Uniform success envelope returned by every user route.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// What the envelope carries. Serialized untagged, so `None` renders as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    User(User),
    Users(Vec<User>),
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "product")]
    pub payload: Payload,
    pub message: String,
    /// Advisory only; failures never produce an envelope.
    #[serde(rename = "status-code")]
    pub status_code: u16,
}

impl Response {
    pub fn ok(payload: Payload, message: impl Into<String>) -> Self {
        Self { payload, message: message.into(), status_code: 200 }
    }
}
