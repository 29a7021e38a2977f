//! Smoothie order service.
//!
//! Serves the smoothie order form over HTTP. Every page load acquires its own
//! database session through an ordered chain of strategies (connection
//! profile, active session, secrets), reads the fruit catalog, and writes
//! submitted orders. A separate page looks fruit up in an external nutrition API.

mod config;
mod error;
mod form;
mod metrics;
mod migration;
mod models;
mod page;
mod routes;
mod schema;
mod seeder;
mod services;
mod session;
mod store;
mod views;

use std::net::SocketAddr;

use clap::Parser;

use crate::session::{Acquired, SessionAcquirer, SessionHandle};

#[derive(Parser)]
#[command(name = "smoothie-orders", about = "Smoothie order form service")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "SMOOTHIE_PORT", default_value = "9090")]
    port: u16,

    /// PostgreSQL connection URL for the active-session strategy
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Create the smoothie tables, seed the fruit catalog, and exit
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    let cli = Cli::parse();
    let config = config::OrderConfig::from_env();
    let acquirer = session::default_acquirer(&config, cli.database_url);

    if cli.migrate {
        return migrate(&acquirer).await;
    }

    tracing::info!(
        strategies = ?acquirer.strategy_names(),
        nutrition = config.nutrition_enabled,
        join = %config.ingredient_join,
        "Starting smoothie order service..."
    );

    let state = routes::AppState::new(config, acquirer);
    let app = routes::app_router(state);

    // Initialize metrics
    metrics::init_metrics();

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("Smoothie order service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Run the schema migration and catalog seed over the first session the chain yields.
async fn migrate(acquirer: &SessionAcquirer<SessionHandle>) -> anyhow::Result<()> {
    let Acquired {
        mut handle, source, ..
    } = acquirer.acquire().await.map_err(|e| {
        for diagnostic in &e.diagnostics {
            tracing::error!("{diagnostic}");
        }
        anyhow::anyhow!("{e}")
    })?;

    tracing::info!(source, "Running smoothie migration...");
    migration::run_migration(handle.connection_mut()).await?;
    let seeded = seeder::seed_catalog(handle.connection_mut()).await?;

    let catalog = services::catalog_service::load_catalog(&mut handle).await?;
    tracing::info!(seeded, fruits = catalog.len(), "Smoothie migration completed.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
