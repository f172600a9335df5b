use super::{PostCommandService, service::log_uniqueness_violation};
use crate::{
    application::{
        dto::{PostDto, PostWriteDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        permalink::PersistEvent,
        post::{PostId, PostUpdate},
    },
};

pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub other_title: Option<String>,
}

impl PostCommandService {
    /// Apply the changes, rerun the permalink hook and write only the
    /// columns that actually changed.
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostWriteDto> {
        let id = PostId::new(command.id)?;
        let current = self
            .read_repo
            .find_by_id(id)
            .await?
            .filter(|post| !post.is_deleted())
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let UpdatePostCommand {
            id: _,
            title,
            other_title,
        } = command;

        let now = self.clock.now();
        let mut post = current.clone();
        if let Some(title) = title {
            post.set_title(title, now);
        }
        if let Some(other_title) = other_title {
            post.set_other_title(other_title, now);
        }

        let change = self
            .permalinks
            .before_persist(&mut post, PersistEvent::Update)
            .await?;

        let update = PostUpdate::diff(id, &current, &post);
        if update.is_empty() {
            tracing::debug!(%id, "post unchanged, skipping write");
            return Ok(PostWriteDto {
                permalink: (&change).into(),
                post: PostDto::from(current),
            });
        }

        let updated = self
            .write_repo
            .update(update)
            .await
            .map_err(log_uniqueness_violation)?;

        Ok(PostWriteDto {
            permalink: (&change).into(),
            post: PostDto::from(updated),
        })
    }
}
