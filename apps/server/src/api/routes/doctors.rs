//! Doctor routes

use crate::api::handlers::doctors;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/doctors",
            get(doctors::list_doctors).post(doctors::create_doctor),
        )
        .route(
            "/doctors/load-examples",
            post(doctors::load_example_doctors),
        )
        .route(
            "/doctors/national-id/:national_id",
            get(doctors::get_doctor_by_national_id),
        )
        .route(
            "/doctors/:id",
            get(doctors::get_doctor)
                .put(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
}
