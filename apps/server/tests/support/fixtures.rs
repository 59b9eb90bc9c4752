use serde_json::{json, Value};

/// A valid patient payload; national id and email are derived from `seed`
pub fn patient_payload(seed: u32) -> Value {
    json!({
        "nationalId": format!("1000{seed:04}-{}", seed % 10),
        "name": format!("Patient {seed}"),
        "age": 30,
        "gender": "F",
        "phone": "912345678",
        "email": format!("patient{seed}@clinic.test"),
        "address": "Calle 123"
    })
}

/// A valid doctor payload; national id and email are derived from `seed`
pub fn doctor_payload(seed: u32) -> Value {
    json!({
        "nationalId": format!("2000{seed:04}-{}", seed % 10),
        "name": format!("Dr. Doctor {seed}"),
        "age": 45,
        "gender": "M",
        "email": format!("doctor{seed}@clinic.test"),
        "specialty": "Cardiology"
    })
}

pub fn visit_payload(patient_id: i64, doctor_id: i64, status: &str) -> Value {
    json!({
        "patientId": patient_id,
        "doctorId": doctor_id,
        "visitDate": "2024-03-01T09:30:00",
        "reason": "Routine check-up",
        "diagnosis": "Healthy",
        "status": status
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keys_are_unique_per_seed() {
        assert_ne!(patient_payload(1)["nationalId"], patient_payload(2)["nationalId"]);
        assert_ne!(doctor_payload(1)["email"], doctor_payload(2)["email"]);
        assert!(patient_payload(9999)["nationalId"].as_str().unwrap().len() <= 12);
    }
}
