use super::PostQueryService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::POST_TYPE,
};

/// Resolve an inbound slug, e.g. from a URL path, to its post. The text is
/// scrubbed first, so `"Hello World"` finds the post stored as `hello-world`.
pub struct GetPostByPermalinkQuery {
    /// Defaults to `Post`.
    pub kind: Option<String>,
    pub text: String,
}

pub struct ListPostsByPermalinkQuery {
    pub kind: Option<String>,
    pub text: String,
}

impl PostQueryService {
    pub async fn get_post_by_permalink(
        &self,
        query: GetPostByPermalinkQuery,
    ) -> ApplicationResult<PostDto> {
        let kind = query.kind.as_deref().unwrap_or(POST_TYPE);
        self.permalinks
            .find_by_permalink_text(kind, &query.text)
            .await?
            .filter(|post| !post.is_deleted())
            .map(PostDto::from)
            .ok_or_else(|| ApplicationError::not_found("post not found"))
    }

    /// All posts sharing the permalink, across scopes.
    pub async fn list_posts_by_permalink(
        &self,
        query: ListPostsByPermalinkQuery,
    ) -> ApplicationResult<Vec<PostDto>> {
        let kind = query.kind.as_deref().unwrap_or(POST_TYPE);
        let posts = self
            .permalinks
            .find_all_by_permalink_text(kind, &query.text)
            .await?;
        Ok(posts
            .into_iter()
            .filter(|post| !post.is_deleted())
            .map(PostDto::from)
            .collect())
    }
}
