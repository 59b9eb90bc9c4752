//! Medical visit endpoint handlers

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
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use clinic_models::{MedicalVisit, MedicalVisitDraft, ResourceKind, VisitStatus};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

const KIND: ResourceKind = ResourceKind::MedicalVisit;
const LIST_NAME: &str = "medicalVisitList";

#[derive(Debug, Deserialize)]
pub struct VisitFilter {
    pub status: Option<String>,
}

/// Links carried by every visit, in lists and on its own.
fn visit_item_links(base_url: &str, visit: &MedicalVisit) -> Links {
    Links::new(base_url)
        .add(rels::SELF, paths::item(KIND, visit.id))
        .add(rels::VISITS_BY_PATIENT, paths::visits_by_patient(visit.patient_id))
        .add(rels::VISITS_BY_DOCTOR, paths::visits_by_doctor(visit.doctor_id))
        .add(rels::VISITS_BY_STATUS, paths::visits_by_status(visit.status))
}

fn visit_model(base_url: &str, visit: &MedicalVisit) -> Result<JsonValue> {
    let item = paths::item(KIND, visit.id);
    let links = visit_item_links(base_url, visit)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::update(KIND), &item)
        .add(rels::delete(KIND), &item)
        .add(
            rels::PATIENT,
            paths::item(ResourceKind::Patient, visit.patient_id),
        )
        .add(rels::DOCTOR, paths::item(ResourceKind::Doctor, visit.doctor_id))
        .add(rels::STATISTICS, paths::visit_statistics());

    links::entity_model(visit, &links)
}

/// A filtered visit list: `self` points at the filter, plus a way back.
fn filtered_collection(
    base_url: &str,
    self_path: &str,
    visits: &[MedicalVisit],
) -> Result<JsonValue> {
    let items = visits
        .iter()
        .map(|visit| links::entity_model(visit, &visit_item_links(base_url, visit)))
        .collect::<Result<Vec<_>>>()?;

    let collection_links = Links::new(base_url)
        .add(rels::SELF, self_path)
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::create(KIND), paths::collection(KIND))
        .add(rels::STATISTICS, paths::visit_statistics());

    Ok(links::collection_model(LIST_NAME, items, &collection_links))
}

/// GET /medical-visits
pub async fn list_visits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let base_url = base_url_from_headers(&headers);
    let visits = state.visit_service.list().await?;

    let items = visits
        .iter()
        .map(|visit| links::entity_model(visit, &visit_item_links(&base_url, visit)))
        .collect::<Result<Vec<_>>>()?;

    let collection_links = Links::new(&base_url)
        .add(rels::SELF, paths::collection(KIND))
        .add(rels::create(KIND), paths::collection(KIND))
        .add(rels::STATISTICS, paths::visit_statistics())
        .add(rels::LOAD_EXAMPLES, paths::load_examples(KIND));

    Ok(Json(links::collection_model(
        LIST_NAME,
        items,
        &collection_links,
    )))
}

/// GET /medical-visits/:id
pub async fn get_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let visit = state.visit_service.get(id).await?;
    Ok(Json(visit_model(&base_url_from_headers(&headers), &visit)?))
}

/// GET /medical-visits/patient/:patient_id[?status=]
pub async fn list_visits_by_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(patient_id): ApiPath<i64>,
    Query(filter): Query<VisitFilter>,
) -> Result<impl IntoResponse> {
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<VisitStatus>)
        .transpose()?;

    let visits = state.visit_service.by_patient(patient_id, status).await?;

    let mut self_path = paths::visits_by_patient(patient_id);
    if let Some(status) = status {
        self_path.push_str(&format!("?status={}", status));
    }

    let body = filtered_collection(&base_url_from_headers(&headers), &self_path, &visits)?;
    Ok(Json(body))
}

/// GET /medical-visits/doctor/:doctor_id
pub async fn list_visits_by_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(doctor_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let visits = state.visit_service.by_doctor(doctor_id).await?;
    let body = filtered_collection(
        &base_url_from_headers(&headers),
        &paths::visits_by_doctor(doctor_id),
        &visits,
    )?;
    Ok(Json(body))
}

/// GET /medical-visits/status/:status
pub async fn list_visits_by_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(status): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let status: VisitStatus = status.parse()?;
    let visits = state.visit_service.by_status(status).await?;
    let body = filtered_collection(
        &base_url_from_headers(&headers),
        &paths::visits_by_status(status),
        &visits,
    )?;
    Ok(Json(body))
}

/// GET /medical-visits/statistics
pub async fn visit_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let stats = state.visit_service.statistics().await?;

    let links = Links::new(base_url_from_headers(&headers))
        .add(rels::SELF, paths::visit_statistics())
        .add(rels::all(KIND), paths::collection(KIND))
        .add(
            rels::SCHEDULED_VISITS,
            paths::visits_by_status(VisitStatus::Scheduled),
        )
        .add(
            rels::COMPLETED_VISITS,
            paths::visits_by_status(VisitStatus::Completed),
        )
        .add(
            rels::CANCELLED_VISITS,
            paths::visits_by_status(VisitStatus::Cancelled),
        );

    Ok(Json(links::entity_model(&stats, &links)?))
}

/// POST /medical-visits
pub async fn create_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(draft): JsonBody<MedicalVisitDraft>,
) -> Result<impl IntoResponse> {
    let visit = state.visit_service.create(draft).await?;
    let body = visit_model(&base_url_from_headers(&headers), &visit)?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /medical-visits/:id
pub async fn update_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
    JsonBody(draft): JsonBody<MedicalVisitDraft>,
) -> Result<impl IntoResponse> {
    let visit = state.visit_service.update(id, draft).await?;
    Ok(Json(visit_model(&base_url_from_headers(&headers), &visit)?))
}

/// DELETE /medical-visits/:id
pub async fn delete_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    state.visit_service.delete(id).await?;

    let links = Links::new(base_url_from_headers(&headers))
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::create(KIND), paths::collection(KIND));

    Ok(Json(links::message_model(
        format!("Medical visit with id {} deleted successfully", id),
        &links,
    )))
}

/// POST /medical-visits/load-examples
pub async fn load_example_visits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let total = state.visit_service.load_examples().await?;

    let links = Links::new(base_url_from_headers(&headers))
        .add(rels::all(KIND), paths::collection(KIND))
        .add(rels::STATISTICS, paths::visit_statistics());

    Ok(Json(json!({
        "message": "Example medical visits loaded successfully",
        "totalLoaded": total,
        "_links": links.to_json(),
    })))
}
