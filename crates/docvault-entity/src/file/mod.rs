//! File domain entities.

pub mod conflict;
pub mod model;

pub use conflict::ConflictStrategy;
pub use model::{CreateFile, File};
