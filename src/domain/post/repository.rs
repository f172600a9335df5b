use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{Post, PostUpdate};
use crate::domain::post::value_objects::PostId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    /// Persist a new post and return it with its assigned id.
    async fn insert(&self, post: Post) -> DomainResult<Post>;
    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;
    async fn soft_delete(&self, id: PostId, deleted_at: DateTime<Utc>) -> DomainResult<()>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    /// Includes soft-deleted posts.
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
}
