//! Doctor endpoint handlers

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
use clinic_models::{Doctor, DoctorDraft, ResourceKind};
use serde_json::{json, Value as JsonValue};

const KIND: ResourceKind = ResourceKind::Doctor;
const LIST_NAME: &str = "doctorList";

/// Links of a doctor returned on its own.
fn doctor_links(base_url: &str, doctor: &Doctor) -> Links {
    let item = paths::item(KIND, doctor.id);
    Links::new(base_url)
        .add(rels::SELF, &item)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::update(KIND), &item)
        .add(rels::delete(KIND), &item)
        .add(
            rels::DOCTOR_BY_NATIONAL_ID,
            paths::by_national_id(KIND, &doctor.national_id),
        )
        .add(rels::VISITS_BY_DOCTOR, paths::visits_by_doctor(doctor.id))
}

fn doctor_model(base_url: &str, doctor: &Doctor) -> Result<JsonValue> {
    links::entity_model(doctor, &doctor_links(base_url, doctor))
}

/// Links of the delete / load-examples confirmations.
fn collection_action_links(base_url: &str) -> Links {
    Links::new(base_url)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::create(KIND), paths::collection(KIND))
}

/// GET /doctors
pub async fn list_doctors(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let base_url = base_url_from_headers(&headers);
    let doctors = state.doctor_service.list().await?;

    let items = doctors
        .iter()
        .map(|doctor| {
            let item_links = Links::new(&base_url)
                .add(rels::SELF, paths::item(KIND, doctor.id))
                .add(
                    rels::DOCTOR_BY_NATIONAL_ID,
                    paths::by_national_id(KIND, &doctor.national_id),
                );
            links::entity_model(doctor, &item_links)
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

/// GET /doctors/:id
pub async fn get_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let doctor = state.doctor_service.get(id).await?;
    let body = doctor_model(&base_url_from_headers(&headers), &doctor)?;
    Ok(Json(body))
}

/// GET /doctors/national-id/:national_id
pub async fn get_doctor_by_national_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(national_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let doctor = state
        .doctor_service
        .get_by_national_id(&national_id)
        .await?;

    let item = paths::item(KIND, doctor.id);
    let links = Links::new(base_url_from_headers(&headers))
        .add(
            rels::SELF,
            paths::by_national_id(KIND, &doctor.national_id),
        )
        .add(rels::by_id(KIND), &item)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::update(KIND), &item);

    Ok(Json(links::entity_model(&doctor, &links)?))
}

/// POST /doctors
pub async fn create_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(draft): JsonBody<DoctorDraft>,
) -> Result<impl IntoResponse> {
    let doctor = state.doctor_service.create(draft).await?;
    let body = doctor_model(&base_url_from_headers(&headers), &doctor)?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /doctors/:id
pub async fn update_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
    JsonBody(draft): JsonBody<DoctorDraft>,
) -> Result<impl IntoResponse> {
    let doctor = state.doctor_service.update(id, draft).await?;
    let body = doctor_model(&base_url_from_headers(&headers), &doctor)?;
    Ok(Json(body))
}

/// DELETE /doctors/:id
pub async fn delete_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    state.doctor_service.delete(id).await?;
    Ok(Json(links::message_model(
        format!("Doctor with id {} deleted successfully", id),
        &collection_action_links(&base_url_from_headers(&headers)),
    )))
}

/// POST /doctors/load-examples
pub async fn load_example_doctors(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let total = state.doctor_service.load_examples().await?;
    let links = collection_action_links(&base_url_from_headers(&headers));

    Ok(Json(json!({
        "message": "Example doctors loaded successfully",
        "totalLoaded": total,
        "_links": links.to_json(),
    })))
}
