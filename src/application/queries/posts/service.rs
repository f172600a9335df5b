use std::sync::Arc;

use crate::domain::{
    permalink::PermalinkGenerator,
    post::{Post, PostReadRepository},
};

pub struct PostQueryService {
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) permalinks: Arc<PermalinkGenerator<Post>>,
}

impl PostQueryService {
    pub fn new(
        read_repo: Arc<dyn PostReadRepository>,
        permalinks: Arc<PermalinkGenerator<Post>>,
    ) -> Self {
        Self {
            read_repo,
            permalinks,
        }
    }
}
