//! PostgreSQL implementations of the record store traits.

pub mod file;
pub mod folder;
pub mod user;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use user::UserRepository;

use docvault_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning a violation of the named unique index into a
/// Conflict error and anything else into a Database error.
pub(crate) fn map_unique_violation(
    err: sqlx::Error,
    index: &str,
    conflict_message: impl FnOnce() -> String,
    context: &'static str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err)
            if db_err.is_unique_violation() && db_err.constraint() == Some(index) =>
        {
            AppError::conflict(conflict_message())
        }
        _ => AppError::with_source(ErrorKind::Database, context, err),
    }
}
