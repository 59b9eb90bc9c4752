//! Patient endpoint handlers

use crate::{
    api::{
        extractors::{ApiPath, JsonBody},
        links::{self, paths, rels, Links},
        url::base_url_from_headers,
    },
    state::AppState,
    Result,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use clinic_models::{Patient, PatientDraft, ResourceKind};
use serde_json::{json, Value as JsonValue};

const KIND: ResourceKind = ResourceKind::Patient;
const LIST_NAME: &str = "patientList";

/// Links of a patient returned on its own.
fn patient_links(base_url: &str, patient: &Patient) -> Links {
    let item = paths::item(KIND, patient.id);
    Links::new(base_url)
        .add(rels::SELF, &item)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::update(KIND), &item)
        .add(rels::delete(KIND), &item)
        .add(
            rels::PATIENT_BY_NATIONAL_ID,
            paths::by_national_id(KIND, &patient.national_id),
        )
        .add(rels::VISITS_BY_PATIENT, paths::visits_by_patient(patient.id))
}

fn patient_model(base_url: &str, patient: &Patient) -> Result<JsonValue> {
    links::entity_model(patient, &patient_links(base_url, patient))
}

/// Links of the delete / load-examples confirmations.
fn collection_action_links(base_url: &str) -> Links {
    Links::new(base_url)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::create(KIND), paths::collection(KIND))
}

/// GET /patients
pub async fn list_patients(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let base_url = base_url_from_headers(&headers);
    let patients = state.patient_service.list().await?;

    let items = patients
        .iter()
        .map(|patient| {
            let item_links = Links::new(&base_url)
                .add(rels::SELF, paths::item(KIND, patient.id))
                .add(
                    rels::PATIENT_BY_NATIONAL_ID,
                    paths::by_national_id(KIND, &patient.national_id),
                );
            links::entity_model(patient, &item_links)
        })
        .collect::<Result<Vec<_>>>()?;

    let collection_links = Links::new(&base_url)
        .add(rels::SELF, paths::collection(KIND))
        .add(rels::create(KIND), paths::collection(KIND))
        .add(rels::LOAD_EXAMPLES, paths::load_examples(KIND));

    Ok(Json(links::collection_model(
        LIST_NAME,
        items,
        &collection_links,
    )))
}

/// GET /patients/:id
pub async fn get_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let patient = state.patient_service.get(id).await?;
    let body = patient_model(&base_url_from_headers(&headers), &patient)?;
    Ok(Json(body))
}

/// GET /patients/national-id/:national_id
pub async fn get_patient_by_national_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(national_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let patient = state
        .patient_service
        .get_by_national_id(&national_id)
        .await?;

    let item = paths::item(KIND, patient.id);
    let links = Links::new(base_url_from_headers(&headers))
        .add(
            rels::SELF,
            paths::by_national_id(KIND, &patient.national_id),
        )
        .add(rels::by_id(KIND), &item)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::update(KIND), &item);

    Ok(Json(links::entity_model(&patient, &links)?))
}

/// POST /patients
pub async fn create_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(draft): JsonBody<PatientDraft>,
) -> Result<impl IntoResponse> {
    let patient = state.patient_service.create(draft).await?;
    let body = patient_model(&base_url_from_headers(&headers), &patient)?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /patients/:id
pub async fn update_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
    JsonBody(draft): JsonBody<PatientDraft>,
) -> Result<impl IntoResponse> {
    let patient = state.patient_service.update(id, draft).await?;
    let body = patient_model(&base_url_from_headers(&headers), &patient)?;
    Ok(Json(body))
}

/// DELETE /patients/:id
pub async fn delete_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    state.patient_service.delete(id).await?;
    Ok(Json(links::message_model(
        format!("Patient with id {} deleted successfully", id),
        &collection_action_links(&base_url_from_headers(&headers)),
    )))
}

/// POST /patients/load-examples
pub async fn load_example_patients(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let total = state.patient_service.load_examples().await?;
    let links = collection_action_links(&base_url_from_headers(&headers));

    Ok(Json(json!({
        "message": "Example patients loaded successfully",
        "totalLoaded": total,
        "_links": links.to_json(),
    })))
}
