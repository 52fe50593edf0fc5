//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod query;

pub use auth::AuthUser;
pub use json::ValidJson;
pub use query::ApiQuery;
