// tests/support/mocks/post_repo.rs
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use permalink_core::domain::errors::{DomainError, DomainResult};
use permalink_core::domain::permalink::{FieldLookup, PermalinkLookupRepository};
use permalink_core::domain::post::{
    Post, PostId, PostReadRepository, PostUpdate, PostWriteRepository,
};

/// In-memory `posts` table. Lookups filter the way the SQLite repository
/// does, rows come back in id order.
#[derive(Default)]
pub struct InMemoryPostRepo {
    rows: Mutex<Vec<Post>>,
    lookups: Mutex<Vec<FieldLookup>>,
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Post> {
        self.rows.lock().unwrap().clone()
    }

    /// Every lookup issued so far, oldest first.
    pub fn lookups(&self) -> Vec<FieldLookup> {
        self.lookups.lock().unwrap().clone()
    }

    fn column(post: &Post, name: &str) -> Option<String> {
        match name {
            "kind" => Some(post.kind.to_string()),
            "title" => Some(post.title.clone()),
            "permalink" => post.permalink.clone(),
            "other_title" => post.other_title.clone(),
            "other_permalink" => post.other_permalink.clone(),
            "deleted_at" => post.deleted_at.map(|at| at.to_rfc3339()),
            other => panic!("posts has no column {other}"),
        }
    }

    fn matches(post: &Post, lookup: &FieldLookup) -> bool {
        if Self::column(post, lookup.field.as_str()).as_deref() != Some(lookup.value.as_str()) {
            return false;
        }
        if !lookup.family.is_empty() && !lookup.family.contains(&post.kind) {
            return false;
        }
        if lookup
            .scope
            .iter()
            .any(|filter| Self::column(post, filter.field.as_str()) != filter.value)
        {
            return false;
        }
        match &lookup.exclude_soft_deleted {
            Some(marker) => Self::column(post, marker.as_str()).is_none(),
            None => true,
        }
    }

    fn select(&self, lookup: &FieldLookup) -> Vec<Post> {
        self.lookups.lock().unwrap().push(lookup.clone());
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|post| Self::matches(post, lookup))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostWriteRepository for InMemoryPostRepo {
    async fn insert(&self, mut post: Post) -> DomainResult<Post> {
        let mut rows = self.rows.lock().unwrap();
        post.id = Some(PostId::new(rows.len() as i64 + 1)?);
        rows.push(post.clone());
        Ok(post)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let mut rows = self.rows.lock().unwrap();
        let post = rows
            .iter_mut()
            .find(|post| post.id == Some(update.id))
            .ok_or_else(|| DomainError::NotFound(format!("post {}", update.id)))?;

        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(permalink) = update.permalink {
            post.permalink = Some(permalink);
        }
        if let Some(other_title) = update.other_title {
            post.other_title = Some(other_title);
        }
        if let Some(other_permalink) = update.other_permalink {
            post.other_permalink = Some(other_permalink);
        }
        post.updated_at = update.updated_at;
        Ok(post.clone())
    }

    async fn soft_delete(&self, id: PostId, deleted_at: DateTime<Utc>) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let post = rows
            .iter_mut()
            .find(|post| post.id == Some(id))
            .ok_or_else(|| DomainError::NotFound(format!("post {id}")))?;
        post.soft_delete(deleted_at);
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for InMemoryPostRepo {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|post| post.id == Some(id)).cloned())
    }
}

#[async_trait]
impl PermalinkLookupRepository<Post> for InMemoryPostRepo {
    async fn find_one(&self, lookup: &FieldLookup) -> DomainResult<Option<Post>> {
        Ok(self.select(lookup).into_iter().next())
    }

    async fn find_all(&self, lookup: &FieldLookup) -> DomainResult<Vec<Post>> {
        Ok(self.select(lookup))
    }
}
