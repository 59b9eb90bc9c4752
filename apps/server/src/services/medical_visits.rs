//! Medical visit service

use crate::{db::MedicalVisitRepository, services::examples, Error, Result};
use clinic_models::{
    validate_draft, MedicalVisit, MedicalVisitDraft, ResourceKind, VisitStatistics, VisitStatus,
};
use std::sync::Arc;

const KIND: ResourceKind = ResourceKind::MedicalVisit;

/// Visit records. Patient and doctor ids are stored as given; they are not
/// checked against the other collections.
pub struct MedicalVisitService {
    repo: Arc<dyn MedicalVisitRepository>,
}

impl MedicalVisitService {
    pub fn new(repo: Arc<dyn MedicalVisitRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<MedicalVisit>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<MedicalVisit> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(Error::ResourceNotFound { kind: KIND, id })
    }

    pub async fn by_patient(
        &self,
        patient_id: i64,
        status: Option<VisitStatus>,
    ) -> Result<Vec<MedicalVisit>> {
        self.repo.find_by_patient(patient_id, status).await
    }

    pub async fn by_doctor(&self, doctor_id: i64) -> Result<Vec<MedicalVisit>> {
        self.repo.find_by_doctor(doctor_id).await
    }

    pub async fn by_status(&self, status: VisitStatus) -> Result<Vec<MedicalVisit>> {
        self.repo.find_by_status(status).await
    }

    pub async fn create(&self, draft: MedicalVisitDraft) -> Result<MedicalVisit> {
        validate_draft(&draft).map_err(|errors| Error::validation(KIND, errors))?;

        let visit = self.repo.insert(draft).await?;
        tracing::info!(
            visit_id = visit.id,
            patient_id = visit.patient_id,
            doctor_id = visit.doctor_id,
            status = %visit.status,
            "Created medical visit"
        );
        Ok(visit)
    }

    /// Any status may replace any other; there is no transition graph.
    pub async fn update(&self, id: i64, draft: MedicalVisitDraft) -> Result<MedicalVisit> {
        validate_draft(&draft).map_err(|errors| Error::validation(KIND, errors))?;

        let visit = self
            .repo
            .update(id, draft)
            .await?
            .ok_or(Error::ResourceNotFound { kind: KIND, id })?;
        tracing::info!(visit_id = id, status = %visit.status, "Updated medical visit");
        Ok(visit)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(Error::ResourceNotFound { kind: KIND, id });
        }
        tracing::info!(visit_id = id, "Deleted medical visit");
        Ok(())
    }

    pub async fn statistics(&self) -> Result<VisitStatistics> {
        self.repo.statistics().await
    }

    pub async fn load_examples(&self) -> Result<usize> {
        let examples = examples::example_visits();
        let total = examples.len();
        for draft in examples {
            self.create(draft).await?;
        }
        tracing::info!(total, "Loaded example medical visits");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> MedicalVisitService {
        MedicalVisitService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn statistics_sum_to_total() {
        let service = service();
        service.load_examples().await.unwrap();

        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.scheduled + stats.completed + stats.cancelled, stats.total);
        assert_eq!(stats.completed, 2);
        assert!(stats.cancelled_percentage.is_some());
    }

    #[tokio::test]
    async fn empty_store_has_no_percentages() {
        let stats = service().statistics().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.scheduled_percentage, None);
    }

    #[tokio::test]
    async fn blank_reason_is_rejected() {
        let mut draft = examples::example_visits().remove(0);
        draft.reason = "   ".to_string();

        let err = service().create(draft).await.unwrap_err();
        match err {
            Error::Validation { errors, .. } => assert!(errors.contains_key("reason")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_can_move_freely() {
        let service = service();
        service.load_examples().await.unwrap();

        let mut draft = examples::example_visits().remove(0);
        draft.status = VisitStatus::Cancelled;
        let updated = service.update(1, draft).await.unwrap();
        assert_eq!(updated.status, VisitStatus::Cancelled);

        let cancelled = service.by_status(VisitStatus::Cancelled).await.unwrap();
        assert_eq!(cancelled.len(), 1);
    }
}
