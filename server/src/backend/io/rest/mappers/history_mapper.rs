use crate::backend::domain::models::history::HistoryEvent as DomainHistoryEvent;
use shared::HistoryEvent as SharedHistoryEvent;

pub struct HistoryMapper;

impl HistoryMapper {
    pub fn to_dto(domain: DomainHistoryEvent) -> SharedHistoryEvent {
        SharedHistoryEvent {
            id: domain.id,
            animal_id: domain.animal_id,
            event_type: domain.event_type,
            title: domain.title,
            description: domain.description,
            date: domain.date.to_rfc3339(),
            cost: domain.cost,
        }
    }

    pub fn to_dto_list(events: Vec<DomainHistoryEvent>) -> Vec<SharedHistoryEvent> {
        events.into_iter().map(Self::to_dto).collect()
    }
}
