// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{
        errors::DomainError,
        permalink::PermalinkGenerator,
        post::{Post, PostReadRepository, PostWriteRepository},
    },
};

pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) permalinks: Arc<PermalinkGenerator<Post>>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        permalinks: Arc<PermalinkGenerator<Post>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            permalinks,
            clock,
        }
    }
}

/// Passes the error through, logging duplicates the store rejected.
pub(super) fn log_uniqueness_violation(err: DomainError) -> DomainError {
    if let DomainError::UniquenessViolation { field, value } = &err {
        tracing::warn!(%field, %value, "store rejected duplicate permalink");
    }
    err
}
