use crate::domain::permalink::PermalinkChange;
use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub permalink: Option<String>,
    pub other_title: Option<String>,
    pub other_permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.map(i64::from).unwrap_or_default(),
            kind: post.kind.into(),
            title: post.title,
            permalink: post.permalink,
            other_title: post.other_title,
            other_permalink: post.other_permalink,
            deleted_at: post.deleted_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// What the permalink hook did during a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermalinkChangeDto {
    Skipped,
    Unchanged,
    Updated,
}

impl From<&PermalinkChange> for PermalinkChangeDto {
    fn from(change: &PermalinkChange) -> Self {
        match change {
            PermalinkChange::Skipped => Self::Skipped,
            PermalinkChange::Unchanged(_) => Self::Unchanged,
            PermalinkChange::Updated { .. } => Self::Updated,
        }
    }
}

/// Result of a create or update: the stored post and what the permalink
/// hook did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWriteDto {
    pub post: PostDto,
    pub permalink: PermalinkChangeDto,
}
