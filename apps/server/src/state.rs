//! Shared application state handed to every handler

use crate::{
    config::{Config, StorageBackend},
    db::{
        DoctorRepository, MedicalVisitRepository, MemoryStore, PatientRepository,
        PostgresDoctorRepository, PostgresMedicalVisitRepository, PostgresPatientRepository,
    },
    services::{DoctorService, MedicalVisitService, MetricsService, PatientService},
    startup, Result,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when running on the in-memory backend
    pub db_pool: Option<PgPool>,
    pub patient_service: Arc<PatientService>,
    pub doctor_service: Arc<DoctorService>,
    pub visit_service: Arc<MedicalVisitService>,
    pub metrics_service: Arc<MetricsService>,
}

/// Startup switches that differ between the server and the test harness.
#[derive(Debug, Clone, Copy)]
pub struct AppStateOptions {
    pub run_migrations: bool,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let options = AppStateOptions {
            run_migrations: config.database.run_migrations,
        };
        Self::new_with_options(config, options).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        match config.database.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using the in-memory storage backend; data is lost on shutdown");
                Ok(Self::in_memory(config))
            }
            StorageBackend::Postgres => {
                let pool = startup::create_pool(&config.database).await?;
                if options.run_migrations {
                    startup::run_migrations(&pool).await?;
                }

                Ok(Self::from_repositories(
                    config,
                    Some(pool.clone()),
                    Arc::new(PostgresPatientRepository::new(pool.clone())),
                    Arc::new(PostgresDoctorRepository::new(pool.clone())),
                    Arc::new(PostgresMedicalVisitRepository::new(pool)),
                ))
            }
        }
    }

    /// State backed by a fresh in-memory store, whatever `config.database.backend` says.
    pub fn in_memory(mut config: Config) -> Self {
        config.database.backend = StorageBackend::Memory;
        let store = Arc::new(MemoryStore::new());

        Self::from_repositories(config, None, store.clone(), store.clone(), store)
    }

    fn from_repositories(
        config: Config,
        db_pool: Option<PgPool>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        visits: Arc<dyn MedicalVisitRepository>,
    ) -> Self {
        let metrics_service = MetricsService::new(
            db_pool.clone(),
            patients.clone(),
            doctors.clone(),
            visits.clone(),
        );

        Self {
            config: Arc::new(config),
            db_pool,
            patient_service: Arc::new(PatientService::new(patients)),
            doctor_service: Arc::new(DoctorService::new(doctors)),
            visit_service: Arc::new(MedicalVisitService::new(visits)),
            metrics_service: Arc::new(metrics_service),
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.config.database.backend
    }
}
