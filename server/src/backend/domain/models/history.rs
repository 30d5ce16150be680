use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::EventType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: String,
    pub animal_id: Option<String>,
    pub event_type: EventType,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub cost: Option<f64>,
}

impl HistoryEvent {
    pub fn generate_id() -> String {
        format!("event::{}", Uuid::new_v4())
    }
}
