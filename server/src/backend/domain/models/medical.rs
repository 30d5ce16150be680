use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::MedicalType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: String,
    pub animal_id: String,
    pub medical_type: MedicalType,
    pub description: String,
    pub veterinarian: Option<String>,
    pub cost: Option<f64>,
    pub date: NaiveDate,
    pub next_visit_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl MedicalRecord {
    pub fn generate_id() -> String {
        format!("medical::{}", Uuid::new_v4())
    }
}
