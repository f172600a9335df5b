use crate::domain::errors::DomainResult;
use crate::domain::permalink::{UniquenessConstraint, UniquenessConstraintRegistrar};
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Turns uniqueness constraints into partial unique indexes on one table.
///
/// With a discriminator column the index only covers the constraint's record
/// family, so types sharing the table keep separate namespaces.
#[derive(Clone)]
pub struct SqliteConstraintRegistrar {
    pool: Arc<SqlitePool>,
    table: &'static str,
    discriminator: Option<&'static str>,
}

impl SqliteConstraintRegistrar {
    pub fn new(pool: Arc<SqlitePool>, table: &'static str) -> Self {
        Self {
            pool,
            table,
            discriminator: None,
        }
    }

    pub fn with_discriminator(mut self, column: &'static str) -> Self {
        self.discriminator = Some(column);
        self
    }

    pub fn index_ddl(&self, constraint: &UniquenessConstraint) -> String {
        index_ddl(self.table, self.discriminator, constraint)
    }
}

fn index_ddl(
    table: &str,
    discriminator: Option<&str>,
    constraint: &UniquenessConstraint,
) -> String {
    let columns = std::iter::once(&constraint.field)
        .chain(constraint.scope.iter())
        .map(|field| quote_ident(field.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut conditions = Vec::new();
    if let Some(discriminator) = discriminator {
        let kinds = constraint
            .family
            .iter()
            .map(|kind| quote_literal(kind.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        conditions.push(format!("{} IN ({kinds})", quote_ident(discriminator)));
    }
    if let Some(marker) = &constraint.soft_delete_field {
        conditions.push(format!("{} IS NULL", quote_ident(marker.as_str())));
    }

    let mut ddl = format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({columns})",
        quote_ident(&constraint.index_name()),
        quote_ident(table),
    );
    if !conditions.is_empty() {
        ddl.push_str(" WHERE ");
        ddl.push_str(&conditions.join(" AND "));
    }
    ddl
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[async_trait]
impl UniquenessConstraintRegistrar for SqliteConstraintRegistrar {
    async fn register_uniqueness_constraint(
        &self,
        constraint: &UniquenessConstraint,
    ) -> DomainResult<()> {
        let ddl = self.index_ddl(constraint);
        tracing::debug!(%ddl, "creating unique index");
        sqlx::query(&ddl)
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permalink::{FieldName, RecordTypeName};

    fn constraint() -> UniquenessConstraint {
        UniquenessConstraint {
            record_type: RecordTypeName::new("Post").unwrap(),
            family: vec![
                RecordTypeName::new("Post").unwrap(),
                RecordTypeName::new("FeaturedPost").unwrap(),
            ],
            field: FieldName::new("permalink").unwrap(),
            scope: vec![FieldName::new("title").unwrap()],
            soft_delete_field: Some(FieldName::new("deleted_at").unwrap()),
        }
    }

    #[test]
    fn ddl_without_discriminator_or_soft_delete_is_plain() {
        let mut constraint = constraint();
        constraint.scope.clear();
        constraint.soft_delete_field = None;
        assert_eq!(
            index_ddl("posts", None, &constraint),
            "CREATE UNIQUE INDEX IF NOT EXISTS \"post_permalink_unique\" ON \"posts\" (\"permalink\")"
        );
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("O'Post"), "'O''Post'");
    }

    #[test]
    fn ddl_is_partial_over_family_and_live_rows() {
        assert_eq!(
            index_ddl("posts", Some("kind"), &constraint()),
            "CREATE UNIQUE INDEX IF NOT EXISTS \"post_permalink_unique\" ON \"posts\" \
             (\"permalink\", \"title\") WHERE \"kind\" IN ('Post', 'FeaturedPost') \
             AND \"deleted_at\" IS NULL"
        );
    }
}
