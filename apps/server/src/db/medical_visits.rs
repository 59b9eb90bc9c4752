//! Medical visit repository - PostgreSQL implementation

use super::parse_status;
use crate::{db::traits::MedicalVisitRepository, Result};
use async_trait::async_trait;
use clinic_models::{MedicalVisit, MedicalVisitDraft, VisitStatistics, VisitStatus};
use sqlx::{postgres::PgRow, PgPool, Row};

const COLUMNS: &str =
    "id, patient_id, doctor_id, visit_date, reason, diagnosis, treatment, notes, status";

#[derive(Debug, Clone)]
pub struct PostgresMedicalVisitRepository {
    pool: PgPool,
}

impl PostgresMedicalVisitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn visit_from_row(row: &PgRow) -> Result<MedicalVisit> {
    let status: String = row.try_get("status")?;

    Ok(MedicalVisit {
        id: row.try_get("id")?,
        patient_id: row.try_get("patient_id")?,
        doctor_id: row.try_get("doctor_id")?,
        visit_date: row.try_get("visit_date")?,
        reason: row.try_get("reason")?,
        diagnosis: row.try_get("diagnosis")?,
        treatment: row.try_get("treatment")?,
        notes: row.try_get("notes")?,
        status: parse_status(&status)?,
    })
}

#[async_trait]
impl MedicalVisitRepository for PostgresMedicalVisitRepository {
    async fn list(&self) -> Result<Vec<MedicalVisit>> {
        let query = format!("SELECT {COLUMNS} FROM medical_visits ORDER BY id");
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(visit_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MedicalVisit>> {
        let query = format!("SELECT {COLUMNS} FROM medical_visits WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(visit_from_row).transpose()
    }

    async fn find_by_patient(
        &self,
        patient_id: i64,
        status: Option<VisitStatus>,
    ) -> Result<Vec<MedicalVisit>> {
        // NULL status parameter disables the filter
        let query = format!(
            r#"
            SELECT {COLUMNS} FROM medical_visits
            WHERE patient_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY id
            "#
        );

        let rows = sqlx::query(&query)
            .bind(patient_id)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(visit_from_row).collect()
    }

    async fn find_by_doctor(&self, doctor_id: i64) -> Result<Vec<MedicalVisit>> {
        let query =
            format!("SELECT {COLUMNS} FROM medical_visits WHERE doctor_id = $1 ORDER BY id");
        let rows = sqlx::query(&query)
            .bind(doctor_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(visit_from_row).collect()
    }

    async fn find_by_status(&self, status: VisitStatus) -> Result<Vec<MedicalVisit>> {
        let query = format!("SELECT {COLUMNS} FROM medical_visits WHERE status = $1 ORDER BY id");
        let rows = sqlx::query(&query)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(visit_from_row).collect()
    }

    async fn insert(&self, draft: MedicalVisitDraft) -> Result<MedicalVisit> {
        let query = format!(
            r#"
            INSERT INTO medical_visits
                (patient_id, doctor_id, visit_date, reason, diagnosis, treatment, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(draft.patient_id)
            .bind(draft.doctor_id)
            .bind(draft.visit_date)
            .bind(&draft.reason)
            .bind(&draft.diagnosis)
            .bind(&draft.treatment)
            .bind(&draft.notes)
            .bind(draft.status.as_str())
            .fetch_one(&self.pool)
            .await?;

        visit_from_row(&row)
    }

    async fn update(&self, id: i64, draft: MedicalVisitDraft) -> Result<Option<MedicalVisit>> {
        let query = format!(
            r#"
            UPDATE medical_visits
            SET patient_id = $2, doctor_id = $3, visit_date = $4, reason = $5,
                diagnosis = $6, treatment = $7, notes = $8, status = $9
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(draft.patient_id)
            .bind(draft.doctor_id)
            .bind(draft.visit_date)
            .bind(&draft.reason)
            .bind(&draft.diagnosis)
            .bind(&draft.treatment)
            .bind(&draft.notes)
            .bind(draft.status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(visit_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM medical_visits WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn statistics(&self) -> Result<VisitStatistics> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'Scheduled') AS scheduled,
                COUNT(*) FILTER (WHERE status = 'Completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'Cancelled') AS cancelled
            FROM medical_visits
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(VisitStatistics::from_counts(
            row.try_get("scheduled")?,
            row.try_get("completed")?,
            row.try_get("cancelled")?,
        ))
    }
}
