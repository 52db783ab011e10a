use anyhow::Context;
use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

use backend::cli::{Cli, Commands};
use backend::pipeline::Outcome;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().contains("backend") || meta.target().contains("stats")
        }));
    tracing::subscriber::set_global_default(registry)?;

    let pool = backend::connect(&cli.database_url)
        .await
        .context("Connecting to database")?;

    tracing::info!("Applying Migrations");
    backend::run_migrations(&pool).await?;
    tracing::info!("Completed Migrations");

    match cli.command {
        Commands::Migrate => {}
        Commands::Work(args) => {
            let pipeline = args.pipeline();

            if args.watch {
                tracing::info!("Watching for pending demos");
                pipeline.watch(&pool, args.interval()).await;
            } else {
                match pipeline.run_once(&pool).await? {
                    Outcome::Idle => tracing::info!("No pending demo"),
                    outcome => tracing::info!("{:?}", outcome),
                };
            }
        }
        Commands::Serve { bind } => {
            let router = axum::Router::new().nest("/api", backend::api::router(pool));

            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Binding {}", bind))?;
            tracing::info!("Listening on {}", bind);

            axum::serve(listener, router).await?;
        }
        Commands::Enqueue { path } => {
            let path = tokio::fs::canonicalize(&path)
                .await
                .with_context(|| format!("Resolving {:?}", path))?;

            let mut conn = pool.get().await.context("Getting DB connection")?;
            let demo = backend::queries::enqueue_demo(&mut conn, &path.to_string_lossy()).await?;

            tracing::info!("Enqueued demo {} for {:?}", demo.id, demo.file_path);
        }
    }

    Ok(())
}
