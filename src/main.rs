use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use notes_api::config::AppConfig;
use notes_api::database::{DatabaseManager, PgStore};
use notes_api::AppState;

#[derive(Debug, Parser)]
#[command(name = "notes-api", version, about = "Note-taking API with user and drawer namespaces")]
struct Args {
    /// Listen port; overrides PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notes_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting notes-api in {:?} mode", config.environment);

    // No retry: an unreachable store at boot is fatal.
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to prepare database schema")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config, Arc::new(PgStore::new(pool)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, notes_api::app(state))
        .await
        .context("server error")?;
    Ok(())
}
