//! Upload name conflict resolution.

use std::sync::Arc;

use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_database::FileStore;
use docvault_entity::file::{ConflictStrategy, File};

use crate::context::RequestContext;
use crate::naming::numbered_name;

/// Result of probing an upload name against its sibling scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Store the upload under `final_name`.
    Proceed { final_name: String },
    /// Store the upload under `final_name` in place of `existing`.
    Replace { final_name: String, existing: File },
    /// The name is taken and no strategy was given; nothing was changed.
    Conflict { name: String },
    /// The caller chose to cancel.
    Cancelled,
}

/// Decides the display name an upload lands under.
#[derive(Clone)]
pub struct ConflictResolver {
    files: Arc<dyn FileStore>,
}

impl std::fmt::Debug for ConflictResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictResolver").finish()
    }
}

impl ConflictResolver {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    /// Resolve `candidate` within `folder_id` for the caller.
    ///
    /// Nothing is modified here. `Overwrite` hands back the file to replace.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        candidate: &str,
        strategy: Option<ConflictStrategy>,
    ) -> AppResult<Resolution> {
        let Some(existing) = self
            .files
            .find_by_name(ctx.user_id, folder_id, candidate)
            .await?
        else {
            return Ok(Resolution::Proceed {
                final_name: candidate.to_string(),
            });
        };

        let Some(strategy) = strategy else {
            return Ok(Resolution::Conflict {
                name: candidate.to_string(),
            });
        };

        match strategy {
            ConflictStrategy::Cancel => Ok(Resolution::Cancelled),
            ConflictStrategy::Overwrite => Ok(Resolution::Replace {
                final_name: candidate.to_string(),
                existing,
            }),
            ConflictStrategy::KeepBoth => {
                let final_name = self.next_free_name(ctx, folder_id, candidate).await?;
                Ok(Resolution::Proceed { final_name })
            }
        }
    }

    /// First `name (n).ext` with n = 1, 2, ... that no sibling uses.
    async fn next_free_name(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<String> {
        let mut n = 1;
        loop {
            let candidate = numbered_name(name, n);
            if self
                .files
                .find_by_name(ctx.user_id, folder_id, &candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}
