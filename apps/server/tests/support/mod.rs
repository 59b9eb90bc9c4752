pub mod assertions;
pub mod fixtures;
pub mod shared;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use clinic_server::{
    api::create_router,
    config::StorageBackend,
    state::AppStateOptions,
    AppState, Config,
};
use futures::FutureExt as _;
use sqlx::Connection as _;
use tower::ServiceExt as _;
use url::Url;
use uuid::Uuid;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;

/// Per-schema PostgreSQL resources owned by a test app.
struct PostgresSchema {
    name: String,
    admin_database_url: String,
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    schema: Option<PostgresSchema>,
}

impl TestApp {
    /// App backed by a fresh in-memory store.
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let shared = shared::shared().await?;
        let mut config = shared.base_config.clone();
        configure(&mut config);

        let state = AppState::in_memory(config);
        let router = create_router(state.clone());

        Ok(Self {
            router,
            state,
            schema: None,
        })
    }

    /// App backed by PostgreSQL in a throwaway schema.
    ///
    /// Returns `Ok(None)` when no test database is configured.
    pub async fn postgres() -> anyhow::Result<Option<Self>> {
        let shared = shared::shared().await?;
        let Some(admin_database_url) = shared.test_database_url.clone() else {
            return Ok(None);
        };

        let schema = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = sqlx::PgConnection::connect(&admin_database_url)
            .await
            .context("connect admin db for schema create")?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;

        let mut config = shared.base_config.clone();
        config.database.backend = StorageBackend::Postgres;
        config.database.url = with_search_path(&admin_database_url, &schema)?;
        // Each test owns a pool; keep them small so parallel tests do not
        // exhaust the server's connection limit.
        config.database.pool_min_size = 0;
        config.database.pool_max_size = 2;
        config.database.pool_timeout_seconds = 30;

        let state = AppState::new_with_options(
            config,
            AppStateOptions {
                run_migrations: true,
            },
        )
        .await
        .context("initialize AppState")?;

        let router = create_router(state.clone());

        Ok(Some(Self {
            router,
            state,
            schema: Some(PostgresSchema {
                name: schema,
                admin_database_url,
            }),
        }))
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        let Some(schema) = self.schema else {
            return Ok(());
        };

        if let Some(pool) = &self.state.db_pool {
            pool.close().await;
        }

        let mut admin_conn = sqlx::PgConnection::connect(&schema.admin_database_url)
            .await
            .context("connect admin db for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, schema.name))
            .execute(&mut admin_conn)
            .await
            .context("drop test schema")?;

        Ok(())
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "clinic.test")
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// Send a JSON body and parse the JSON response.
    pub async fn json(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let body = body.map(to_json_body).transpose()?;
        let (status, _headers, bytes) = self.request(method, path, body).await?;
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parse JSON response of {path}"))?
        };
        Ok((status, value))
    }
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    with_test_app_with_config(|_| {}, f).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, f: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let app = TestApp::new_with_config(configure).await?;
    run_and_cleanup(app, f).await
}

/// Run `f` against a PostgreSQL-backed app; skipped when
/// `CLINIC_TEST_DATABASE_URL` is not set.
pub async fn with_postgres_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let Some(app) = TestApp::postgres().await? else {
        eprintln!("CLINIC_TEST_DATABASE_URL not set, skipping PostgreSQL test");
        return Ok(());
    };
    run_and_cleanup(app, f).await
}

async fn run_and_cleanup<F>(app: TestApp, f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let result = std::panic::AssertUnwindSafe(f(&app)).catch_unwind().await;
    let cleanup_result = app.cleanup().await;

    if let Err(e) = cleanup_result {
        eprintln!("test schema cleanup failed: {e:?}");
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn with_search_path(database_url: &str, schema: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(database_url).context("parse database URL")?;
    url.query_pairs_mut()
        .append_pair("options", &format!("-c search_path={}", schema));
    Ok(url.to_string())
}
