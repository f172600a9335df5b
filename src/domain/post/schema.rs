use crate::domain::errors::DomainResult;
use crate::domain::permalink::RecordSchema;
use crate::domain::post::entity::Post;

pub const POST_TYPE: &str = "Post";
pub const FEATURED_POST_TYPE: &str = "FeaturedPost";
pub const OTHER_POST_TYPE: &str = "OtherPost";

/// Soft-delete marker column of the `posts` table.
pub const DELETED_AT: &str = "deleted_at";

/// `Post` and its `FeaturedPost` subtype.
pub fn post_schema() -> DomainResult<RecordSchema<Post>> {
    posts_table(POST_TYPE, &[FEATURED_POST_TYPE])
}

/// `OtherPost` shares the `posts` table but is its own root type, so it can
/// carry a separate policy (typically `other_title` → `other_permalink`).
pub fn other_post_schema() -> DomainResult<RecordSchema<Post>> {
    posts_table(OTHER_POST_TYPE, &[])
}

fn posts_table(root: &str, subtypes: &[&str]) -> DomainResult<RecordSchema<Post>> {
    subtypes
        .iter()
        .fold(RecordSchema::<Post>::builder(root), |builder, subtype| {
            builder.subtype(*subtype)
        })
        .field("kind", |post: &Post| Some(post.kind.to_string()))
        .field("title", |post: &Post| Some(post.title.clone()))
        .writable_field(
            "permalink",
            |post: &Post| post.permalink.clone(),
            |post, value| post.permalink = Some(value),
        )
        .field("other_title", |post: &Post| post.other_title.clone())
        .writable_field(
            "other_permalink",
            |post: &Post| post.other_permalink.clone(),
            |post, value| post.other_permalink = Some(value),
        )
        .soft_delete_marker(DELETED_AT)
        .build()
}
