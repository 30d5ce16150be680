//! # CSV History Repository
//!
//! Append-only event log in `{data_directory}/history.csv`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use shared::EventType;

use super::connection::{CsvConnection, CsvTable};
use crate::backend::domain::models::history::HistoryEvent;
use crate::backend::storage::HistoryStorage;

const HISTORY_FILE: &str = "history.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryRecord {
    id: String,
    animal_id: Option<String>,
    event_type: String,
    title: String,
    description: String,
    date: String,
    cost: Option<f64>,
}

impl From<&HistoryEvent> for HistoryRecord {
    fn from(event: &HistoryEvent) -> Self {
        HistoryRecord {
            id: event.id.clone(),
            animal_id: event.animal_id.clone(),
            event_type: event.event_type.as_str().to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.to_rfc3339(),
            cost: event.cost,
        }
    }
}

impl TryFrom<HistoryRecord> for HistoryEvent {
    type Error = anyhow::Error;

    fn try_from(record: HistoryRecord) -> Result<Self> {
        Ok(HistoryEvent {
            id: record.id,
            animal_id: record.animal_id,
            event_type: EventType::parse(&record.event_type).unwrap_or(EventType::Other),
            title: record.title,
            description: record.description,
            date: DateTime::parse_from_rfc3339(&record.date)?.with_timezone(&Utc),
            cost: record.cost,
        })
    }
}

#[derive(Clone)]
pub struct HistoryRepository {
    connection: CsvConnection,
}

impl HistoryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_events(&self) -> Result<CsvTable<HistoryEvent>> {
        self.connection.read_table::<HistoryRecord, HistoryEvent>(HISTORY_FILE)
    }

    fn write_events(&self, table: &CsvTable<HistoryEvent>) -> Result<()> {
        let records: Vec<HistoryRecord> = table.records.iter().map(HistoryRecord::from).collect();
        self.connection.write_table(HISTORY_FILE, &records, &table.unreadable)
    }
}

#[async_trait]
impl HistoryStorage for HistoryRepository {
    async fn store_event(&self, event: &HistoryEvent) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_events()?;
        table.records.push(event.clone());
        self.write_events(&table)?;

        debug!("Recorded {} event {}", event.event_type.as_str(), event.id);
        Ok(())
    }

    async fn list_events(&self, animal_id: Option<&str>) -> Result<Vec<HistoryEvent>> {
        let events = self.read_events()?.records;
        Ok(match animal_id {
            Some(animal_id) => events
                .into_iter()
                .filter(|e| e.animal_id.as_deref() == Some(animal_id))
                .collect(),
            None => events,
        })
    }

    async fn delete_events_for_animal(&self, animal_id: &str) -> Result<u32> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_events()?;
        let before = table.records.len();
        table.records.retain(|e| e.animal_id.as_deref() != Some(animal_id));

        let removed = (before - table.records.len()) as u32;
        if removed > 0 {
            self.write_events(&table)?;
        }
        Ok(removed)
    }
}
