#[allow(unused)]
mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::{
    assert_links, assert_status, embedded, link, patient_payload, record_id, with_test_app,
};

#[tokio::test]
async fn create_returns_201_with_links() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .json(Method::POST, "/patients", Some(&patient_payload(1)))
                .await?;
            assert_status(status, StatusCode::CREATED, "create patient");

            let id = record_id(&body)?;
            assert_eq!(id, 1);
            assert_eq!(body["name"], "Patient 1");
            assert_links(
                &body,
                &[
                    "self",
                    "all-patients",
                    "update-patient",
                    "delete-patient",
                    "patient-by-national-id",
                    "visits-by-patient",
                ],
            )?;
            assert_eq!(link(&body, "self")?, "http://clinic.test/patients/1");
            assert_eq!(
                link(&body, "visits-by-patient")?,
                "http://clinic.test/medical-visits/patient/1"
            );

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_national_id_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let first = patient_payload(1);
            let (status, _) = app.json(Method::POST, "/patients", Some(&first)).await?;
            assert_status(status, StatusCode::CREATED, "first create");

            let mut second = patient_payload(2);
            second["nationalId"] = first["nationalId"].clone();
            let (status, body) = app.json(Method::POST, "/patients", Some(&second)).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "duplicate national id");
            assert!(body["error"]
                .as_str()
                .unwrap_or_default()
                .contains("national id"));
            assert_eq!(link(&body, "all-patients")?, "/patients");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let first = patient_payload(1);
            app.json(Method::POST, "/patients", Some(&first)).await?;

            let mut second = patient_payload(2);
            second["email"] = first["email"].clone();
            let (status, body) = app.json(Method::POST, "/patients", Some(&second)).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "duplicate email");
            assert!(body["error"].as_str().unwrap_or_default().contains("email"));

            let (_, list) = app.json(Method::GET, "/patients", None).await?;
            assert_eq!(embedded(&list, "patientList")?.len(), 1);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn validation_errors_are_reported_per_field() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let payload = json!({
                "nationalId": "1234567890123",
                "name": "  ",
                "age": 131,
                "email": "not-an-email"
            });
            let (status, body) = app.json(Method::POST, "/patients", Some(&payload)).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "invalid patient");

            assert_eq!(body["error"], "Validation failed");
            for field in ["nationalId", "name", "age", "email"] {
                assert!(
                    body["fieldErrors"][field].is_array(),
                    "expected field error for {field}: {body}"
                );
            }
            assert_links(&body, &["all-patients", "create-patient"])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_gender_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let mut payload = patient_payload(1);
            payload["gender"] = json!("X");
            let (status, body) = app.json(Method::POST, "/patients", Some(&payload)).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "bad gender");
            assert!(body["error"].is_string());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn overlong_email_is_a_validation_error() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let domain = ["a", "b", "c", "d"].map(|label| label.repeat(60)).join(".");
            let mut payload = patient_payload(1);
            payload["email"] = json!(format!("{}@{}", "p".repeat(64), domain));

            let (status, body) = app.json(Method::POST, "/patients", Some(&payload)).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "overlong email");
            assert_eq!(
                body["fieldErrors"]["email"],
                json!(["email must be at most 255 characters"])
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn missing_patient_returns_404_with_links() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/patients/42", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "get missing");
            assert_eq!(body["message"], "No patient found with id 42");
            assert_eq!(link(&body, "all-patients")?, "/patients");
            assert_eq!(link(&body, "create-patient")?, "/patients");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/patients/abc", None).await?;
            assert_status(status, StatusCode::BAD_REQUEST, "non-numeric id");
            assert!(body["error"].is_string());
            assert_eq!(link(&body, "all-patients")?, "/patients");
            assert_eq!(link(&body, "create-patient")?, "/patients");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn lookup_by_national_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let payload = patient_payload(7);
            app.json(Method::POST, "/patients", Some(&payload)).await?;

            let national_id = payload["nationalId"].as_str().unwrap_or_default();
            let (status, body) = app
                .json(
                    Method::GET,
                    &format!("/patients/national-id/{national_id}"),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::OK, "by national id");
            assert_eq!(body["nationalId"], payload["nationalId"]);
            assert_links(
                &body,
                &["self", "patient-by-id", "all-patients", "update-patient"],
            )?;

            let (status, body) = app
                .json(Method::GET, "/patients/national-id/00000000-0", None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown national id");
            assert_eq!(
                body["message"],
                "No patient found with national id 00000000-0"
            );

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_overwrites_mutable_fields() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, created) = app
                .json(Method::POST, "/patients", Some(&patient_payload(1)))
                .await?;
            let id = record_id(&created)?;

            let mut changed = patient_payload(1);
            changed["name"] = json!("Renamed Patient");
            changed["phone"] = json!(null);
            let (status, body) = app
                .json(Method::PUT, &format!("/patients/{id}"), Some(&changed))
                .await?;
            assert_status(status, StatusCode::OK, "update");
            assert_eq!(body["name"], "Renamed Patient");
            assert!(body["phone"].is_null());
            assert_eq!(record_id(&body)?, id);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_keeps_stored_national_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, created) = app
                .json(Method::POST, "/patients", Some(&patient_payload(1)))
                .await?;
            let id = record_id(&created)?;

            let mut changed = patient_payload(1);
            changed["nationalId"] = json!("99999999-9");
            changed["name"] = json!("Renamed Patient");
            let (status, body) = app
                .json(Method::PUT, &format!("/patients/{id}"), Some(&changed))
                .await?;
            assert_status(status, StatusCode::OK, "update with other national id");
            assert_eq!(body["nationalId"], created["nationalId"]);
            assert_eq!(body["name"], "Renamed Patient");

            let (status, _) = app
                .json(Method::GET, "/patients/national-id/99999999-9", None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "submitted national id not stored");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_missing_returns_404_without_writing() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .json(Method::PUT, "/patients/5", Some(&patient_payload(5)))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "update missing");
            assert_eq!(body["message"], "No patient found with id 5");

            let (_, list) = app.json(Method::GET, "/patients", None).await?;
            assert!(embedded(&list, "patientList")?.is_empty());

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn second_delete_reports_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, created) = app
                .json(Method::POST, "/patients", Some(&patient_payload(1)))
                .await?;
            let path = format!("/patients/{}", record_id(&created)?);

            let (status, body) = app.json(Method::DELETE, &path, None).await?;
            assert_status(status, StatusCode::OK, "first delete");
            assert!(body["message"].is_string());
            assert_links(&body, &["all-patients", "create-patient"])?;

            let (status, _) = app.json(Method::DELETE, &path, None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "second delete");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_collection_keeps_embedded_list() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/patients", None).await?;
            assert_status(status, StatusCode::OK, "list");
            assert!(embedded(&body, "patientList")?.is_empty());
            assert_links(&body, &["self", "create-patient", "load-examples"])?;
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn load_examples_inserts_three_once() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .json(Method::POST, "/patients/load-examples", None)
                .await?;
            assert_status(status, StatusCode::OK, "load examples");
            assert_eq!(body["totalLoaded"], 3);

            let (_, list) = app.json(Method::GET, "/patients", None).await?;
            let items = embedded(&list, "patientList")?;
            assert_eq!(items.len(), 3);
            assert_eq!(items[0]["nationalId"], "12345678-9");
            assert_links(&items[0], &["self", "patient-by-national-id"])?;

            let (status, _) = app
                .json(Method::POST, "/patients/load-examples", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "reload examples");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/patients",
                    Some(axum::body::Bytes::from_static(b"{not json")),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "malformed body");

            let body: serde_json::Value = serde_json::from_slice(&body)?;
            assert!(body["error"].is_string());
            assert_links(&body, &["all-patients", "create-patient"])?;
            Ok(())
        })
    })
    .await
}
