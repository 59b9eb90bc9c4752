//! Patient routes

use crate::api::handlers::patients;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/load-examples",
            post(patients::load_example_patients),
        )
        .route(
            "/patients/national-id/:national_id",
            get(patients::get_patient_by_national_id),
        )
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
}
