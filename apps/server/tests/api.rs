#[allow(unused)]
mod support;

use axum::http::{Method, StatusCode};
use support::{assert_links, assert_status, link, patient_payload, with_test_app, with_test_app_with_config};

#[tokio::test]
async fn health_reports_storage_backend() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/health", None).await?;
            assert_status(status, StatusCode::OK, "health");
            assert_eq!(body["status"], "ok");
            assert_eq!(body["storage"], "memory");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn root_links_every_collection() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/", None).await?;
            assert_status(status, StatusCode::OK, "root");
            assert_links(&body, &["self", "all-patients", "all-doctors", "all-visits"])?;
            assert_eq!(
                link(&body, "all-visits")?,
                "http://clinic.test/medical-visits"
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn links_follow_forwarded_headers() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request_with_extra_headers(
                    Method::GET,
                    "/",
                    None,
                    &[
                        ("x-forwarded-proto", "https"),
                        ("x-forwarded-host", "api.clinic.example"),
                    ],
                )
                .await?;
            assert_status(status, StatusCode::OK, "root behind proxy");

            let body: serde_json::Value = serde_json::from_slice(&body)?;
            assert_eq!(link(&body, "self")?, "https://api.clinic.example/");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn responses_carry_request_ids_and_security_headers() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, headers, _) = app.request(Method::GET, "/patients", None).await?;
            assert!(headers.contains_key("x-request-id"));
            assert!(headers.get("x-correlation-id").is_none());
            assert_eq!(headers["x-content-type-options"], "nosniff");

            let (_, headers, _) = app
                .request_with_extra_headers(
                    Method::GET,
                    "/patients",
                    None,
                    &[("x-request-id", "client-abc")],
                )
                .await?;
            assert_eq!(headers["x-correlation-id"], "client-abc");
            assert_ne!(headers["x-request-id"], "client-abc");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn metrics_expose_record_counts() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _) = app
                .json(Method::POST, "/patients", Some(&patient_payload(1)))
                .await?;
            assert_status(status, StatusCode::CREATED, "seed patient");

            let (status, headers, body) = app.request(Method::GET, "/metrics", None).await?;
            assert_status(status, StatusCode::OK, "metrics");
            assert!(headers["content-type"]
                .to_str()?
                .starts_with("text/plain"));

            let text = String::from_utf8(body.to_vec())?;
            assert!(text.contains("clinic_http_requests_total"));
            assert!(text.contains("clinic_records_total"));
            assert!(text.contains("clinic_server_info{version="));
            assert!(text.contains("backend=\"memory\""));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_route_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, _) = app.request(Method::GET, "/nurses", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown route");

            let (status, _, _) = app.request(Method::GET, "/favicon.ico", None).await?;
            assert_status(status, StatusCode::NO_CONTENT, "favicon");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn oversized_bodies_are_rejected() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.server.max_request_body_size = 64,
        |app| {
            Box::pin(async move {
                let mut payload = patient_payload(1);
                payload["address"] = serde_json::json!("x".repeat(512));
                let (status, _) = app.json(Method::POST, "/patients", Some(&payload)).await?;
                assert!(
                    status.is_client_error(),
                    "expected a 4xx for an oversized body, got {status}"
                );
                Ok(())
            })
        },
    )
    .await
}
