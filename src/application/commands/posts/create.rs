use super::{PostCommandService, service::log_uniqueness_violation};
use crate::{
    application::{
        dto::{PostDto, PostWriteDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        permalink::{PersistEvent, RecordTypeName},
        post::{POST_TYPE, Post},
    },
};

pub struct CreatePostCommand {
    /// Defaults to `Post`.
    pub kind: Option<String>,
    pub title: String,
    pub other_title: Option<String>,
}

impl CreatePostCommand {
    pub fn builder() -> CreatePostCommandBuilder {
        CreatePostCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreatePostCommandBuilder {
    kind: Option<String>,
    title: Option<String>,
    other_title: Option<String>,
}

impl CreatePostCommandBuilder {
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn other_title(mut self, other_title: impl Into<String>) -> Self {
        self.other_title = Some(other_title.into());
        self
    }

    pub fn build(self) -> Result<CreatePostCommand, &'static str> {
        Ok(CreatePostCommand {
            kind: self.kind,
            title: self.title.ok_or("title is required")?,
            other_title: self.other_title,
        })
    }
}

impl PostCommandService {
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostWriteDto> {
        let kind = RecordTypeName::new(command.kind.unwrap_or_else(|| POST_TYPE.to_string()))?;
        if self.permalinks.registry().policy_for(kind.as_str()).is_none() {
            return Err(ApplicationError::validation(format!(
                "unknown post kind {kind}"
            )));
        }

        let mut post = Post::new(kind, command.title, self.clock.now());
        if let Some(other_title) = command.other_title {
            post = post.with_other_title(other_title);
        }

        let change = self
            .permalinks
            .before_persist(&mut post, PersistEvent::Create)
            .await?;

        let created = self
            .write_repo
            .insert(post)
            .await
            .map_err(log_uniqueness_violation)?;

        tracing::info!(id = ?created.id, kind = %created.kind, "created post");
        Ok(PostWriteDto {
            permalink: (&change).into(),
            post: PostDto::from(created),
        })
    }
}
