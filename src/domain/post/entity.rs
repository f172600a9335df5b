// src/domain/post/entity.rs
use crate::domain::permalink::{PermalinkRecord, RecordTypeName};
use crate::domain::post::value_objects::PostId;
use chrono::{DateTime, Utc};

/// A row of the `posts` table. `kind` is the single-table-inheritance
/// discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Option<PostId>,
    pub kind: RecordTypeName,
    pub title: String,
    pub permalink: Option<String>,
    pub other_title: Option<String>,
    pub other_permalink: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(kind: RecordTypeName, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            kind,
            title: title.into(),
            permalink: None,
            other_title: None,
            other_permalink: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_other_title(mut self, other_title: impl Into<String>) -> Self {
        self.other_title = Some(other_title.into());
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.updated_at = now;
    }

    pub fn set_other_title(&mut self, other_title: impl Into<String>, now: DateTime<Utc>) {
        self.other_title = Some(other_title.into());
        self.updated_at = now;
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl PermalinkRecord for Post {
    type Id = PostId;

    fn record_id(&self) -> Option<PostId> {
        self.id
    }

    fn type_name(&self) -> &str {
        self.kind.as_str()
    }
}

/// Column changes for an existing post. `None` leaves a column as it is.
#[derive(Debug, Clone, PartialEq)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: Option<String>,
    pub permalink: Option<String>,
    pub other_title: Option<String>,
    pub other_permalink: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: PostId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            permalink: None,
            other_title: None,
            other_permalink: None,
            updated_at,
        }
    }

    /// Columns that differ between `before` and `after`.
    pub fn diff(id: PostId, before: &Post, after: &Post) -> Self {
        fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }

        Self {
            id,
            title: changed(&before.title, &after.title),
            permalink: changed(&before.permalink, &after.permalink).flatten(),
            other_title: changed(&before.other_title, &after.other_title).flatten(),
            other_permalink: changed(&before.other_permalink, &after.other_permalink).flatten(),
            updated_at: after.updated_at,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.permalink.is_none()
            && self.other_title.is_none()
            && self.other_permalink.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_post() -> Post {
        let mut post = Post::new(RecordTypeName::new("Post").unwrap(), "title", Utc::now());
        post.id = Some(PostId::new(1).unwrap());
        post.permalink = Some("title".into());
        post
    }

    #[test]
    fn new_posts_are_new_records() {
        let post = Post::new(RecordTypeName::new("FeaturedPost").unwrap(), "x", Utc::now());
        assert!(post.is_new_record());
        assert_eq!(post.type_name(), "FeaturedPost");
        assert!(!sample_post().is_new_record());
    }

    #[test]
    fn identity_compares_ids() {
        let a = sample_post();
        let mut b = sample_post();
        assert!(a.is_same_record(&b));
        b.id = Some(PostId::new(2).unwrap());
        assert!(!a.is_same_record(&b));
        b.id = None;
        assert!(!b.is_same_record(&b.clone()));
    }

    #[test]
    fn diff_lists_only_changed_columns() {
        let before = sample_post();
        let mut after = before.clone();
        let later = before.updated_at + Duration::seconds(5);
        after.set_title("new title", later);
        after.permalink = Some("new-title".into());

        let update = PostUpdate::diff(PostId::new(1).unwrap(), &before, &after);
        assert_eq!(update.title.as_deref(), Some("new title"));
        assert_eq!(update.permalink.as_deref(), Some("new-title"));
        assert!(update.other_title.is_none());
        assert!(update.other_permalink.is_none());
        assert_eq!(update.updated_at, later);
    }

    #[test]
    fn soft_delete_marks_post() {
        let mut post = sample_post();
        let now = Utc::now();
        post.soft_delete(now);
        assert!(post.is_deleted());
        assert_eq!(post.deleted_at, Some(now));
    }
}
