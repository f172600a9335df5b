// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::posts::PostCommandService,
        error::ApplicationResult,
        ports::{ClockPort, RandomSourcePort},
        queries::posts::PostQueryService,
    },
    domain::{
        permalink::{
            PermalinkGenerator, PermalinkLookupRepository, PolicyRegistry,
            UniquenessConstraintRegistrar,
        },
        post::{Post, PostReadRepository, PostWriteRepository},
    },
};

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    permalinks: Arc<PermalinkGenerator<Post>>,
}

impl ApplicationServices {
    pub fn new(
        registry: Arc<PolicyRegistry<Post>>,
        post_write_repo: Arc<dyn PostWriteRepository>,
        post_read_repo: Arc<dyn PostReadRepository>,
        permalink_lookup_repo: Arc<dyn PermalinkLookupRepository<Post>>,
        clock: Arc<ClockPort>,
        random: Arc<RandomSourcePort>,
    ) -> Self {
        let permalinks = Arc::new(PermalinkGenerator::new(
            Arc::clone(&registry),
            Arc::clone(&permalink_lookup_repo),
            Arc::clone(&random),
        ));

        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&post_write_repo),
            Arc::clone(&post_read_repo),
            Arc::clone(&permalinks),
            Arc::clone(&clock),
        ));

        let post_queries = Arc::new(PostQueryService::new(
            Arc::clone(&post_read_repo),
            Arc::clone(&permalinks),
        ));

        Self {
            post_commands,
            post_queries,
            permalinks,
        }
    }

    pub fn permalinks(&self) -> Arc<PermalinkGenerator<Post>> {
        Arc::clone(&self.permalinks)
    }

    /// Hand every registered uniqueness constraint to the store. Run once at
    /// startup, after migrations.
    pub async fn register_constraints(
        &self,
        registrar: &dyn UniquenessConstraintRegistrar,
    ) -> ApplicationResult<()> {
        for constraint in self.permalinks.registry().uniqueness_constraints() {
            registrar.register_uniqueness_constraint(&constraint).await?;
            tracing::info!(
                index = %constraint.index_name(),
                record_type = %constraint.record_type,
                "registered uniqueness constraint"
            );
        }
        Ok(())
    }
}
