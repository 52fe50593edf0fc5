//! Root-first breadcrumb trails built by walking parent links.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::FolderStore;
use docvault_entity::folder::Breadcrumb;

use crate::context::RequestContext;

/// Builds navigation trails for folders.
#[derive(Clone)]
pub struct BreadcrumbService {
    folders: Arc<dyn FolderStore>,
}

impl std::fmt::Debug for BreadcrumbService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreadcrumbService").finish()
    }
}

impl BreadcrumbService {
    pub fn new(folders: Arc<dyn FolderStore>) -> Self {
        Self { folders }
    }

    /// The trail from the top-level ancestor down to `folder_id`.
    ///
    /// The root itself has no trail. A parent link that does not resolve
    /// under the caller, or that loops back onto the trail, ends the walk
    /// there and the partial trail is returned.
    pub async fn trail(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<Breadcrumb>> {
        let Some(folder_id) = folder_id else {
            return Ok(Vec::new());
        };

        let target = self
            .folders
            .find_by_id(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        let mut visited = HashSet::from([target.id]);
        let mut trail = vec![Breadcrumb::from(&target)];
        let mut next = target.parent_id;

        while let Some(parent_id) = next {
            if !visited.insert(parent_id) {
                warn!(folder_id = %folder_id, %parent_id, "Folder ancestry loops; trail truncated");
                break;
            }
            let Some(parent) = self.folders.find_by_id(ctx.user_id, parent_id).await? else {
                warn!(folder_id = %folder_id, %parent_id, "Folder ancestry broken; trail truncated");
                break;
            };
            trail.push(Breadcrumb::from(&parent));
            next = parent.parent_id;
        }

        trail.reverse();
        Ok(trail)
    }
}
