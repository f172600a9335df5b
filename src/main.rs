use anyhow::Result;
use permalink_core::application::{
    commands::posts::CreatePostCommand,
    ports::{random::RandomSource, time::Clock},
    services::ApplicationServices,
};
use permalink_core::config::AppConfig;
use permalink_core::domain::{
    permalink::{PermalinkLookupRepository, PolicyRegistry},
    post::{Post, PostReadRepository, PostWriteRepository, other_post_schema, post_schema},
};
use permalink_core::infrastructure::{
    database,
    random::ThreadRandom,
    repositories::{SqliteConstraintRegistrar, SqlitePostReadRepository, SqlitePostWriteRepository},
    time::SystemClock,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let defaults = config.permalink_defaults();
    let mut registry = PolicyRegistry::<Post>::builder();
    registry.configure(post_schema()?, &defaults)?;
    registry.configure(
        other_post_schema()?,
        &defaults
            .clone()
            .with_target_field("other_permalink")
            .with_source_field("other_title"),
    )?;
    let registry = Arc::new(registry.build());

    let post_write_repo: Arc<dyn PostWriteRepository> =
        Arc::new(SqlitePostWriteRepository::new(Arc::clone(&pool)));
    let read_repo = Arc::new(SqlitePostReadRepository::new(Arc::clone(&pool)));
    let post_read_repo: Arc<dyn PostReadRepository> = read_repo.clone();
    let lookup_repo: Arc<dyn PermalinkLookupRepository<Post>> = read_repo;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);

    let services = ApplicationServices::new(
        registry,
        post_write_repo,
        post_read_repo,
        lookup_repo,
        clock,
        random,
    );

    let registrar = SqliteConstraintRegistrar::new(Arc::clone(&pool), "posts")
        .with_discriminator("kind");
    services.register_constraints(&registrar).await?;

    for title in std::env::args().skip(1) {
        let command = CreatePostCommand::builder()
            .title(title)
            .build()
            .map_err(anyhow::Error::msg)?;
        let written = services.post_commands.create_post(command).await?;
        println!(
            "{}\t{}",
            written.post.id,
            written.post.permalink.unwrap_or_default()
        );
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
