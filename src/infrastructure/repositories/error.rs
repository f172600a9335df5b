use crate::domain::errors::DomainError;

const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const UNIQUE_FAILED_PREFIX: &str = "UNIQUE constraint failed: ";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                let field = violated_column(db_err.message())
                    .or_else(|| db_err.constraint().map(str::to_string))
                    .unwrap_or_else(|| "unknown".into());
                return DomainError::uniqueness(field, String::new());
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => {
                        return DomainError::uniqueness("unknown", String::new());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// First column named in SQLite's `UNIQUE constraint failed: posts.permalink,
/// posts.kind` message.
fn violated_column(message: &str) -> Option<String> {
    let columns = message.strip_prefix(UNIQUE_FAILED_PREFIX)?;
    let first = columns.split(',').next()?.trim();
    let column = first.rsplit('.').next()?;
    (!column.is_empty()).then(|| column.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_column_from_sqlite_message() {
        assert_eq!(
            violated_column("UNIQUE constraint failed: posts.permalink").as_deref(),
            Some("permalink")
        );
        assert_eq!(
            violated_column("UNIQUE constraint failed: posts.other_permalink, posts.title")
                .as_deref(),
            Some("other_permalink")
        );
        assert_eq!(violated_column("NOT NULL constraint failed: posts.title"), None);
    }

    #[test]
    fn non_database_errors_are_persistence_errors() {
        let err = map_sqlx(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
