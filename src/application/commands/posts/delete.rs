// src/application/commands/posts/delete.rs
use super::PostCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::post::PostId,
};

pub struct DeletePostCommand {
    pub id: i64,
}

impl PostCommandService {
    /// Soft delete. Deleting an already deleted post is a no-op.
    pub async fn delete_post(&self, command: DeletePostCommand) -> ApplicationResult<()> {
        let id = PostId::new(command.id)?;
        let post = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        if post.is_deleted() {
            return Ok(());
        }

        self.write_repo.soft_delete(id, self.clock.now()).await?;
        tracing::info!(%id, "soft-deleted post");
        Ok(())
    }
}
