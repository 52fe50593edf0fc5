//! Upload name-conflict strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use docvault_core::error::AppError;

/// How to land an upload whose name is already taken in its folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictStrategy {
    /// Replace the existing file.
    Overwrite,
    /// Keep the existing file and store the upload as `name (n).ext`.
    KeepBoth,
    /// Abandon the upload.
    Cancel,
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::KeepBoth => write!(f, "keep-both"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

impl FromStr for ConflictStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "overwrite" => Ok(Self::Overwrite),
            "keep-both" | "keep_both" | "rename" => Ok(Self::KeepBoth),
            "cancel" => Ok(Self::Cancel),
            other => Err(AppError::validation(format!(
                "Unknown conflict resolution '{other}'"
            ))),
        }
    }
}
