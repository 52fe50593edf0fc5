//! Lazy user materialization from verified identities.

use std::sync::Arc;

use tracing::{debug, info};

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::UserStore;
use docvault_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Resolves verified identities to user rows.
#[derive(Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Return the user for a verified identity, creating it on first sight.
    pub async fn materialize(
        &self,
        email: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> AppResult<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::authentication("Identity carries no email"));
        }

        if let Some(user) = self.users.find_by_email(email).await? {
            debug!(user_id = %user.id, "Resolved existing user");
            return Ok(user);
        }

        let user = self
            .users
            .upsert_by_email(&CreateUser {
                email: email.to_string(),
                name: name.map(str::to_string),
                image: image.map(str::to_string),
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "User materialized");
        Ok(user)
    }

    /// Gets the current user's profile.
    pub async fn current(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
