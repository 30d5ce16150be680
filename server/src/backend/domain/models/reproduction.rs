use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mating and, once it happened, the resulting birth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproductionRecord {
    pub id: String,
    pub female_id: String,
    pub male_id: Option<String>,
    pub breeding_date: NaiveDate,
    pub expected_birth_date: Option<NaiveDate>,
    pub actual_birth_date: Option<NaiveDate>,
    pub offspring_count: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReproductionRecord {
    pub fn generate_id() -> String {
        format!("reproduction::{}", Uuid::new_v4())
    }

    pub fn involves(&self, animal_id: &str) -> bool {
        self.female_id == animal_id || self.male_id.as_deref() == Some(animal_id)
    }

    pub fn has_birth(&self) -> bool {
        self.actual_birth_date.is_some()
    }
}
