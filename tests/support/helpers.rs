// tests/support/helpers.rs
use std::sync::Arc;

use permalink_core::application::commands::posts::CreatePostCommand;
use permalink_core::application::dto::PostWriteDto;
use permalink_core::application::services::ApplicationServices;
use permalink_core::domain::permalink::{PermalinkOptions, PolicyRegistry};
use permalink_core::domain::post::{Post, other_post_schema, post_schema};

use super::mocks::{DummyClock, FixedRandom, InMemoryPostRepo};

/// Number `FixedRandom` hands out in these harnesses.
pub const FALLBACK_DRAW: u32 = 42;

pub struct Harness {
    pub services: ApplicationServices,
    pub repo: Arc<InMemoryPostRepo>,
}

/// `OtherPost` options: `other_title` → `other_permalink`.
pub fn other_post_options() -> PermalinkOptions {
    PermalinkOptions::default()
        .with_target_field("other_permalink")
        .with_source_field("other_title")
}

pub fn registry(post: &PermalinkOptions, other: &PermalinkOptions) -> Arc<PolicyRegistry<Post>> {
    let mut builder = PolicyRegistry::builder();
    builder
        .configure(post_schema().unwrap(), post)
        .unwrap()
        .configure(other_post_schema().unwrap(), other)
        .unwrap();
    Arc::new(builder.build())
}

pub fn harness_with(post: PermalinkOptions) -> Harness {
    let repo = Arc::new(InMemoryPostRepo::new());
    let services = ApplicationServices::new(
        registry(&post, &other_post_options()),
        repo.clone(),
        repo.clone(),
        repo.clone(),
        Arc::new(DummyClock),
        Arc::new(FixedRandom(FALLBACK_DRAW)),
    );
    Harness { services, repo }
}

pub fn harness() -> Harness {
    harness_with(PermalinkOptions::default())
}

impl Harness {
    pub async fn create(&self, kind: &str, title: &str) -> PostWriteDto {
        let command = CreatePostCommand::builder()
            .kind(kind)
            .title(title)
            .build()
            .unwrap();
        self.services.post_commands.create_post(command).await.unwrap()
    }

    /// Permalink of a freshly created `Post`.
    pub async fn permalink_for(&self, title: &str) -> String {
        self.create("Post", title).await.post.permalink.unwrap()
    }
}
