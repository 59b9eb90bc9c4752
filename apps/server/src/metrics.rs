//! Metrics collection for the clinic server
//!
//! Prometheus metrics registered in the default registry and exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "clinic_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "clinic_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "clinic_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    /// HTTP request body size in bytes
    pub static ref HTTP_REQUEST_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "clinic_http_request_size_bytes",
        "HTTP request body size in bytes",
        &["method", "path"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_REQUEST_SIZE_BYTES");

    /// HTTP response size in bytes
    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "clinic_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Record Operation Metrics

    /// Operations by resource collection and operation
    pub static ref CLINIC_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "clinic_operations_total",
        "Total number of record operations",
        &["resource", "operation", "status"]
    )
    .expect("Failed to register CLINIC_OPERATIONS_TOTAL");

    /// Operation duration
    pub static ref CLINIC_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "clinic_operation_duration_seconds",
        "Record operation duration in seconds",
        &["resource", "operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register CLINIC_OPERATION_DURATION_SECONDS");

    // Database Metrics

    /// Active database connections
    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "clinic_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    /// Idle database connections
    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "clinic_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");

    // Record Metrics

    /// Stored records by collection, refreshed on every scrape
    pub static ref RECORDS_TOTAL: IntGaugeVec = register_int_gauge_vec!(
        "clinic_records_total",
        "Number of stored records by collection",
        &["resource"]
    )
    .expect("Failed to register RECORDS_TOTAL");

    /// Stored medical visits by status, refreshed on every scrape
    pub static ref VISITS_BY_STATUS: IntGaugeVec = register_int_gauge_vec!(
        "clinic_visits_by_status",
        "Number of stored medical visits by status",
        &["status"]
    )
    .expect("Failed to register VISITS_BY_STATUS");
}

const COLLECTIONS: [&str; 3] = ["patients", "doctors", "medical-visits"];

/// Helper to sanitize path for metrics labels (remove IDs, limit cardinality)
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let Some(first) = segments.first() else {
        return "/".to_string();
    };

    if !COLLECTIONS.contains(first) {
        // /health, /metrics, unknown paths: keep only the first segment
        return format!("/{}", first);
    }

    match segments.as_slice() {
        [collection] => format!("/{}", collection),
        [collection, "load-examples"] | [collection, "statistics"] => {
            format!("/{}/{}", collection, segments[1])
        }
        [collection, _id] => format!("/{}/{{id}}", collection),
        [collection, "national-id", _] => format!("/{}/national-id/{{nationalId}}", collection),
        [collection, "patient", _] => format!("/{}/patient/{{patientId}}", collection),
        [collection, "doctor", _] => format!("/{}/doctor/{{doctorId}}", collection),
        [collection, "status", _] => format!("/{}/status/{{status}}", collection),
        [collection, ..] => format!("/{}", collection),
        [] => "/".to_string(),
    }
}

/// Extract the resource collection (`patients`, `doctors`, `medical-visits`) from path
pub fn extract_resource_type(path: &str) -> Option<String> {
    let first = path.split('/').find(|s| !s.is_empty())?;
    COLLECTIONS.contains(&first).then(|| first.to_string())
}

/// Extract record operation from path and method
pub fn extract_operation(method: &str, path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let operation = match (method, segments.as_slice()) {
        ("GET", [_]) => "list",
        ("GET", [_, "statistics"]) => "statistics",
        ("GET", [_, "national-id", _]) => "read_by_national_id",
        ("GET", [_, "patient" | "doctor" | "status", _]) => "filter",
        ("GET", [_, _]) => "read",
        ("POST", [_]) => "create",
        ("POST", [_, "load-examples"]) => "load_examples",
        ("PUT", [_, _]) => "update",
        ("DELETE", [_, _]) => "delete",
        _ => return None,
    };

    Some(operation.to_string())
}
