//! User materialization and profile lookup.

pub mod service;

pub use service::UserService;
