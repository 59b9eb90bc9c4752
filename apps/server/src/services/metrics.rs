//! Metrics service for collecting application metrics

use crate::db::{DoctorRepository, MedicalVisitRepository, PatientRepository};
use clinic_models::VisitStatus;
use sqlx::PgPool;
use std::sync::Arc;

/// Service for collecting application metrics
pub struct MetricsService {
    pool: Option<PgPool>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    visits: Arc<dyn MedicalVisitRepository>,
}

impl MetricsService {
    /// `pool` is `None` for the in-memory backend.
    pub fn new(
        pool: Option<PgPool>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        visits: Arc<dyn MedicalVisitRepository>,
    ) -> Self {
        Self {
            pool,
            patients,
            doctors,
            visits,
        }
    }

    /// Update database connection pool metrics
    pub fn update_db_connection_metrics(&self) {
        let Some(pool) = &self.pool else {
            return;
        };
        let pool_size = pool.size();
        let idle = pool.num_idle() as u32;

        crate::metrics::DB_CONNECTIONS_ACTIVE.set(pool_size.saturating_sub(idle) as i64);
        crate::metrics::DB_CONNECTIONS_IDLE.set(idle as i64);
    }

    /// Refresh stored-record gauges; failures are logged and skipped
    pub async fn update_record_metrics(&self) {
        match self.patients.count().await {
            Ok(count) => crate::metrics::RECORDS_TOTAL
                .with_label_values(&["patients"])
                .set(count),
            Err(e) => tracing::warn!("Failed to count patients for metrics: {}", e),
        }

        match self.doctors.count().await {
            Ok(count) => crate::metrics::RECORDS_TOTAL
                .with_label_values(&["doctors"])
                .set(count),
            Err(e) => tracing::warn!("Failed to count doctors for metrics: {}", e),
        }

        match self.visits.statistics().await {
            Ok(stats) => {
                crate::metrics::RECORDS_TOTAL
                    .with_label_values(&["medical-visits"])
                    .set(stats.total);
                for status in VisitStatus::ALL {
                    crate::metrics::VISITS_BY_STATUS
                        .with_label_values(&[status.as_str()])
                        .set(stats.count(status));
                }
            }
            Err(e) => tracing::warn!("Failed to count medical visits for metrics: {}", e),
        }
    }

    /// Collect all custom application metrics
    pub async fn collect_custom_metrics(&self, server_version: &str, backend: &str) -> String {
        self.update_db_connection_metrics();
        self.update_record_metrics().await;

        let mut output = String::new();
        output.push_str("# HELP clinic_server_info Clinic server information\n");
        output.push_str("# TYPE clinic_server_info gauge\n");
        output.push_str(&format!(
            "clinic_server_info{{version=\"{}\",backend=\"{}\"}} 1\n",
            server_version, backend
        ));

        output
    }
}
