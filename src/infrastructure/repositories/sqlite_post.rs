use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::permalink::{FieldLookup, FieldName, PermalinkLookupRepository, RecordTypeName};
use crate::domain::post::{Post, PostId, PostReadRepository, PostUpdate, PostWriteRepository};
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

const POST_COLUMNS: &str = "id, kind, title, permalink, other_title, other_permalink, deleted_at, created_at, updated_at";

/// Columns a `FieldLookup` may filter on. Lookups name fields at runtime, so
/// only these literals ever reach the SQL text.
const LOOKUP_COLUMNS: [&str; 6] = [
    "kind",
    "title",
    "permalink",
    "other_title",
    "other_permalink",
    "deleted_at",
];

fn column(field: &FieldName) -> DomainResult<&'static str> {
    LOOKUP_COLUMNS
        .iter()
        .copied()
        .find(|column| *column == field.as_str())
        .ok_or_else(|| DomainError::Validation(format!("posts has no column {field}")))
}

#[derive(Clone)]
pub struct SqlitePostWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePostWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqlitePostReadRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePostReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn lookup_query(lookup: &FieldLookup) -> DomainResult<QueryBuilder<'_, Sqlite>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts WHERE "));
        builder
            .push(column(&lookup.field)?)
            .push(" = ")
            .push_bind(lookup.value.as_str());

        if !lookup.family.is_empty() {
            builder.push(" AND kind IN (");
            let mut kinds = builder.separated(", ");
            for kind in &lookup.family {
                kinds.push_bind(kind.as_str());
            }
            kinds.push_unseparated(")");
        }

        for filter in &lookup.scope {
            builder.push(" AND ").push(column(&filter.field)?);
            match &filter.value {
                Some(value) => {
                    builder.push(" = ").push_bind(value.as_str());
                }
                None => {
                    builder.push(" IS NULL");
                }
            }
        }

        if let Some(marker) = &lookup.exclude_soft_deleted {
            builder.push(" AND ").push(column(marker)?).push(" IS NULL");
        }

        builder.push(" ORDER BY id");
        Ok(builder)
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    kind: String,
    title: String,
    permalink: Option<String>,
    other_title: Option<String>,
    other_permalink: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: Some(PostId::new(row.id)?),
            kind: RecordTypeName::new(row.kind)?,
            title: row.title,
            permalink: row.permalink,
            other_title: row.other_title,
            other_permalink: row.other_permalink,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Fill in the value a unique index rejected; the error mapper only knows
/// the column.
fn with_rejected_value(
    err: DomainError,
    permalink: Option<&str>,
    other_permalink: Option<&str>,
) -> DomainError {
    match err {
        DomainError::UniquenessViolation { field, value } if value.is_empty() => {
            let value = match field.as_str() {
                "permalink" => permalink,
                "other_permalink" => other_permalink,
                _ => None,
            };
            DomainError::uniqueness(field, value.unwrap_or_default())
        }
        other => other,
    }
}

#[async_trait]
impl PostWriteRepository for SqlitePostWriteRepository {
    async fn insert(&self, post: Post) -> DomainResult<Post> {
        if post.id.is_some() {
            return Err(DomainError::Validation(
                "cannot insert a post that already has an id".into(),
            ));
        }

        let Post {
            id: _,
            kind,
            title,
            permalink,
            other_title,
            other_permalink,
            deleted_at,
            created_at,
            updated_at,
        } = post;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (kind, title, permalink, other_title, other_permalink, deleted_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {POST_COLUMNS}"
        ))
        .bind(kind.as_str())
        .bind(title.as_str())
        .bind(permalink.as_deref())
        .bind(other_title.as_deref())
        .bind(other_permalink.as_deref())
        .bind(deleted_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|err| {
            with_rejected_value(
                map_sqlx(err),
                permalink.as_deref(),
                other_permalink.as_deref(),
            )
        })?;

        Post::try_from(row)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            permalink,
            other_title,
            other_permalink,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET title = COALESCE(?, title), permalink = COALESCE(?, permalink), \
             other_title = COALESCE(?, other_title), other_permalink = COALESCE(?, other_permalink), \
             updated_at = ? WHERE id = ? RETURNING {POST_COLUMNS}"
        ))
        .bind(title.as_deref())
        .bind(permalink.as_deref())
        .bind(other_title.as_deref())
        .bind(other_permalink.as_deref())
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(|err| {
            with_rejected_value(
                map_sqlx(err),
                permalink.as_deref(),
                other_permalink.as_deref(),
            )
        })?
        .ok_or_else(|| DomainError::NotFound(format!("post {id}")))?;

        Post::try_from(row)
    }

    async fn soft_delete(&self, id: PostId, deleted_at: DateTime<Utc>) -> DomainResult<()> {
        let result = sqlx::query("UPDATE posts SET deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(deleted_at)
            .bind(deleted_at)
            .bind(i64::from(id))
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("post {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for SqlitePostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }
}

#[async_trait]
impl PermalinkLookupRepository<Post> for SqlitePostReadRepository {
    async fn find_one(&self, lookup: &FieldLookup) -> DomainResult<Option<Post>> {
        let mut builder = Self::lookup_query(lookup)?;
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_all(&self, lookup: &FieldLookup) -> DomainResult<Vec<Post>> {
        let mut builder = Self::lookup_query(lookup)?;

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Post::try_from).collect()
    }
}
