//! Fixed example records loaded by the `load-examples` endpoints

use chrono::{NaiveDate, NaiveDateTime};
use clinic_models::{DoctorDraft, Gender, MedicalVisitDraft, PatientDraft, VisitStatus};

pub fn example_patients() -> Vec<PatientDraft> {
    vec![
        patient(
            "12345678-9",
            "Juan Pérez",
            35,
            Gender::M,
            "912345678",
            "juan@email.com",
            "Calle 123",
        ),
        patient(
            "98765432-1",
            "María González",
            28,
            Gender::F,
            "987654321",
            "maria@email.com",
            "Av. 456",
        ),
        patient(
            "45678912-3",
            "Carlos López",
            22,
            Gender::M,
            "945678912",
            "carlos@email.com",
            "Pasaje 789",
        ),
    ]
}

pub fn example_doctors() -> Vec<DoctorDraft> {
    vec![
        doctor(
            "12345678-9",
            "Dr. Carlos Martínez",
            45,
            Gender::M,
            "912345678",
            "carlos@clinica.com",
            "Av. Principal 123",
            "Cardiology",
        ),
        doctor(
            "23456789-0",
            "Dra. Ana González",
            38,
            Gender::F,
            "923456789",
            "ana@hospital.com",
            "Calle Secundaria 456",
            "Pediatrics",
        ),
        doctor(
            "34567890-1",
            "Dr. Roberto Silva",
            52,
            Gender::M,
            "934567890",
            "roberto@salud.cl",
            "Pasaje 789",
            "Traumatology",
        ),
    ]
}

/// Example visits reference patients and doctors 1 to 3.
pub fn example_visits() -> Vec<MedicalVisitDraft> {
    vec![
        MedicalVisitDraft {
            patient_id: 1,
            doctor_id: 1,
            visit_date: at(2024, 1, 15, 10, 30),
            reason: "Chest pain and shortness of breath".to_string(),
            diagnosis: Some("Angina pectoris".to_string()),
            treatment: Some(
                "Rest, sublingual nitroglycerin and cardiology follow-up".to_string(),
            ),
            notes: Some("Patient with cardiovascular risk factors".to_string()),
            status: VisitStatus::Completed,
        },
        MedicalVisitDraft {
            patient_id: 2,
            doctor_id: 2,
            visit_date: at(2024, 1, 16, 11, 0),
            reason: "High fever and sore throat in a child".to_string(),
            diagnosis: Some("Pharyngitis".to_string()),
            treatment: Some("Amoxicillin for 10 days and paracetamol for fever".to_string()),
            notes: Some("Five-year-old child, good general condition".to_string()),
            status: VisitStatus::Completed,
        },
        MedicalVisitDraft {
            patient_id: 3,
            doctor_id: 3,
            visit_date: at(2024, 1, 17, 9, 15),
            reason: "Knee pain after a sports accident".to_string(),
            diagnosis: Some("Sprain".to_string()),
            treatment: Some("Immobilisation, physiotherapy and check-up in 2 weeks".to_string()),
            notes: Some("Amateur football player".to_string()),
            status: VisitStatus::Scheduled,
        },
    ]
}

fn patient(
    national_id: &str,
    name: &str,
    age: i32,
    gender: Gender,
    phone: &str,
    email: &str,
    address: &str,
) -> PatientDraft {
    PatientDraft {
        national_id: national_id.to_string(),
        name: name.to_string(),
        age: Some(age),
        gender: Some(gender),
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        address: Some(address.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn doctor(
    national_id: &str,
    name: &str,
    age: i32,
    gender: Gender,
    phone: &str,
    email: &str,
    address: &str,
    specialty: &str,
) -> DoctorDraft {
    DoctorDraft {
        national_id: national_id.to_string(),
        name: name.to_string(),
        age: Some(age),
        gender: Some(gender),
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        address: Some(address.to_string()),
        specialty: specialty.to_string(),
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}
