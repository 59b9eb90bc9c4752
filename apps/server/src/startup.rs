//! Database bootstrap: connection pool and schema migrations

use crate::{config::DatabaseConfig, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Create the PostgreSQL pool, applying per-session timeouts to every connection.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let statement_timeout = format!("{}s", config.statement_timeout_seconds);
    let lock_timeout = format!("{}s", config.lock_timeout_seconds);

    let connect_options = PgConnectOptions::from_str(&config.url)?.options([
        ("statement_timeout", statement_timeout.as_str()),
        ("lock_timeout", lock_timeout.as_str()),
    ]);

    tracing::info!(
        database_url = %redact_database_url(&config.url),
        pool_min_size = config.pool_min_size,
        pool_max_size = config.pool_max_size,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .connect_with(connect_options)
        .await?;

    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations complete");
    Ok(())
}

/// Strip the password from a connection URL before it is logged.
pub fn redact_database_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                // set_password only fails for URLs that cannot carry credentials
                let _ = url.set_password(Some("****"));
            }
            url.to_string()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
