use anyhow::Context as _;
use clinic_server::Config;
use std::sync::Arc;
use tokio::sync::OnceCell;

static SHARED: OnceCell<Arc<SharedTestResources>> = OnceCell::const_new();

pub struct SharedTestResources {
    pub base_config: Config,
    /// Admin URL of the PostgreSQL test database, if one is configured
    pub test_database_url: Option<String>,
}

pub async fn shared() -> anyhow::Result<Arc<SharedTestResources>> {
    SHARED
        .get_or_try_init(|| async {
            init_tracing();

            let mut config = Config::load().context("load Config for tests")?;

            let test_database_url = std::env::var("CLINIC_TEST_DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .or_else(|| config.database.test_database_url.clone());

            // Migrations are requested explicitly by the PostgreSQL harness.
            config.database.run_migrations = false;
            config.logging.opentelemetry_enabled = false;
            config.logging.file_enabled = false;

            Ok(Arc::new(SharedTestResources {
                base_config: config,
                test_database_url,
            }))
        })
        .await
        .cloned()
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "clinic_server=info,sqlx=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
