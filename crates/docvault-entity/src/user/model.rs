//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The owner of every folder and file, keyed by the external identity email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address, unique and case-insensitive.
    pub email: String,
    /// Display name from the identity provider.
    pub name: Option<String>,
    /// Avatar image URL from the identity provider.
    pub image: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to materialize a user on first sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Verified email address.
    pub email: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Avatar image URL (optional).
    pub image: Option<String>,
}
