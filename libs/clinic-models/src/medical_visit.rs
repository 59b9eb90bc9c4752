//! Medical visit records and visit statistics

use crate::validation::not_blank;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Visit status. Any value may be set directly; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub const ALL: [VisitStatus; 3] = [
        VisitStatus::Scheduled,
        VisitStatus::Completed,
        VisitStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "Scheduled",
            VisitStatus::Completed => "Completed",
            VisitStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for VisitStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Scheduled" => Ok(VisitStatus::Scheduled),
            "Completed" => Ok(VisitStatus::Completed),
            "Cancelled" => Ok(VisitStatus::Cancelled),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored medical visit.
///
/// `patient_id` and `doctor_id` are plain numbers; they are not checked
/// against the patient and doctor tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalVisit {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub visit_date: NaiveDateTime,
    pub reason: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub status: VisitStatus,
}

/// Client-supplied visit fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MedicalVisitDraft {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub visit_date: NaiveDateTime,

    #[validate(
        custom(function = "not_blank"),
        length(max = 500, message = "reason must be at most 500 characters")
    )]
    pub reason: String,

    #[validate(length(max = 1000, message = "diagnosis must be at most 1000 characters"))]
    #[serde(default)]
    pub diagnosis: Option<String>,

    #[validate(length(max = 1000, message = "treatment must be at most 1000 characters"))]
    #[serde(default)]
    pub treatment: Option<String>,

    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    #[serde(default)]
    pub notes: Option<String>,

    pub status: VisitStatus,
}

impl MedicalVisit {
    pub fn from_draft(id: i64, draft: MedicalVisitDraft) -> Self {
        Self {
            id,
            patient_id: draft.patient_id,
            doctor_id: draft.doctor_id,
            visit_date: draft.visit_date,
            reason: draft.reason,
            diagnosis: draft.diagnosis,
            treatment: draft.treatment,
            notes: draft.notes,
            status: draft.status,
        }
    }

    pub fn apply(&mut self, draft: MedicalVisitDraft) {
        let id = self.id;
        *self = MedicalVisit::from_draft(id, draft);
    }
}

/// Visit counts per status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatistics {
    pub total: i64,
    pub scheduled: i64,
    pub completed: i64,
    pub cancelled: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_percentage: Option<f64>,
}

impl VisitStatistics {
    /// Percentages are only reported when there is at least one visit.
    pub fn from_counts(scheduled: i64, completed: i64, cancelled: i64) -> Self {
        let total = scheduled + completed + cancelled;
        let percentage = |count: i64| (total > 0).then(|| count as f64 * 100.0 / total as f64);

        Self {
            total,
            scheduled,
            completed,
            cancelled,
            scheduled_percentage: percentage(scheduled),
            completed_percentage: percentage(completed),
            cancelled_percentage: percentage(cancelled),
        }
    }

    pub fn count(&self, status: VisitStatus) -> i64 {
        match status {
            VisitStatus::Scheduled => self.scheduled,
            VisitStatus::Completed => self.completed,
            VisitStatus::Cancelled => self.cancelled,
        }
    }
}
