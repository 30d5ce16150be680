//! Farm timeline: births, sales, treatments and manual entries.

use anyhow::Result;
use chrono::Utc;
use log::info;
use shared::{CreateHistoryEventRequest, EventType};
use std::sync::Arc;

use crate::backend::domain::models::{clean_optional, history::HistoryEvent};
use crate::backend::domain::DomainError;
use crate::backend::storage::csv::{AnimalRepository, CsvConnection, HistoryRepository};
use crate::backend::storage::traits::{AnimalStorage, HistoryStorage};

#[derive(Clone)]
pub struct HistoryService {
    history_repository: HistoryRepository,
    animal_repository: AnimalRepository,
}

impl HistoryService {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            history_repository: HistoryRepository::new((*connection).clone()),
            animal_repository: AnimalRepository::new((*connection).clone()),
        }
    }

    /// Append an event produced by another service
    pub async fn record_event(
        &self,
        animal_id: Option<&str>,
        event_type: EventType,
        title: impl Into<String>,
        description: impl Into<String>,
        cost: Option<f64>,
    ) -> Result<HistoryEvent> {
        let event = HistoryEvent {
            id: HistoryEvent::generate_id(),
            animal_id: animal_id.map(str::to_string),
            event_type,
            title: title.into(),
            description: description.into(),
            date: Utc::now(),
            cost,
        };

        self.history_repository.store_event(&event).await?;
        Ok(event)
    }

    /// Manual entry from the client
    pub async fn create_event(&self, request: CreateHistoryEventRequest) -> Result<HistoryEvent> {
        info!("Creating {} history event", request.event_type.as_str());

        let title = request.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("titre is required"));
        }
        if request.cost.map_or(false, |cost| !(cost >= 0.0)) {
            return Err(DomainError::validation("cout must not be negative"));
        }

        let animal_id = clean_optional(request.animal_id);
        if let Some(id) = animal_id.as_deref() {
            if self.animal_repository.get_animal(id).await?.is_none() {
                return Err(DomainError::not_found(format!("Animal {}", id)));
            }
        }

        self.record_event(
            animal_id.as_deref(),
            request.event_type,
            title,
            request.description.trim(),
            request.cost,
        )
        .await
    }

    /// Events, most recent first
    pub async fn list_events(&self, animal_id: Option<&str>) -> Result<Vec<HistoryEvent>> {
        let mut events = self.history_repository.list_events(animal_id).await?;
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }

    pub async fn delete_events_for_animal(&self, animal_id: &str) -> Result<u32> {
        self.history_repository.delete_events_for_animal(animal_id).await
    }
}
