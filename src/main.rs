use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom::config::Config;
use stockroom::AppState;

#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version, about = "A lightweight supplier and inventory management server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "stockroom.toml")]
    config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Seed the database with demo data before serving
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stockroom v{}", env!("CARGO_PKG_VERSION"));

    // Ensure data directory exists
    stockroom::utils::ensure_dir(&config.server.data_dir)?;

    // Initialize database
    let db = stockroom::db::init(&config.server.data_dir).await?;

    if cli.seed {
        stockroom::db::seed_demo_data(&db).await?;
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), db));

    // Periodically drop stale rate-limit windows
    stockroom::api::rate_limit::spawn_cleanup_task(state.rate_limiter.clone(), 300);

    let app = stockroom::api::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
