// src/infrastructure/repositories/mod.rs
mod error;
mod sqlite_constraints;
mod sqlite_post;

pub use error::map_sqlx;
pub use sqlite_constraints::SqliteConstraintRegistrar;
pub use sqlite_post::{SqlitePostReadRepository, SqlitePostWriteRepository};
