//! Clinic server - HTTP entry point

use anyhow::Context;
use clap::Parser;
use clinic_server::{
    api::create_router,
    config::{Config, StorageBackend},
    logging, startup,
    state::AppState,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "clinic-server", version, about = "Clinic records REST server")]
struct Args {
    /// Configuration file (defaults to ./config.{yaml,toml,json} when present)
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Apply database migrations and exit
    #[clap(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_from(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _telemetry_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging/telemetry")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.logging.deployment_environment,
        backend = config.database.backend.as_str(),
        "Starting clinic server"
    );

    if args.migrate_only {
        return migrate(&config).await;
    }

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    tracing::info!("Clinic server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server terminated unexpectedly");
        return Err(e.into());
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn migrate(config: &Config) -> anyhow::Result<()> {
    if config.database.backend == StorageBackend::Memory {
        tracing::info!("In-memory backend selected, nothing to migrate");
        return Ok(());
    }

    let pool = startup::create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;
    startup::run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;
    pool.close().await;
    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, starting graceful shutdown..."),
        _ = terminate => tracing::info!("SIGTERM received, starting graceful shutdown..."),
    }
}
