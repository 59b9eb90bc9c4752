//! Medical visit routes

use crate::api::handlers::medical_visits;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn medical_visit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/medical-visits",
            get(medical_visits::list_visits).post(medical_visits::create_visit),
        )
        .route(
            "/medical-visits/load-examples",
            post(medical_visits::load_example_visits),
        )
        .route(
            "/medical-visits/statistics",
            get(medical_visits::visit_statistics),
        )
        .route(
            "/medical-visits/patient/:patient_id",
            get(medical_visits::list_visits_by_patient),
        )
        .route(
            "/medical-visits/doctor/:doctor_id",
            get(medical_visits::list_visits_by_doctor),
        )
        .route(
            "/medical-visits/status/:status",
            get(medical_visits::list_visits_by_status),
        )
        .route(
            "/medical-visits/:id",
            get(medical_visits::get_visit)
                .put(medical_visits::update_visit)
                .delete(medical_visits::delete_visit),
        )
}
