//! Request context carrying the authenticated owner.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the HTTP extractor once the identity token is verified and the
/// user row exists. Every service call scopes its lookups to `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The materialized user's ID; owner of everything the request touches.
    pub user_id: Uuid,
    /// The verified email the user was resolved from.
    pub email: String,
}

impl RequestContext {
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
