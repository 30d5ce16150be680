use crate::backend::domain::models::{format_date, reproduction::ReproductionRecord as DomainReproductionRecord};
use shared::ReproductionRecord as SharedReproductionRecord;

pub struct ReproductionMapper;

impl ReproductionMapper {
    pub fn to_dto(domain: DomainReproductionRecord) -> SharedReproductionRecord {
        SharedReproductionRecord {
            id: domain.id,
            female_id: domain.female_id,
            male_id: domain.male_id,
            breeding_date: format_date(domain.breeding_date),
            expected_birth_date: domain.expected_birth_date.map(format_date),
            actual_birth_date: domain.actual_birth_date.map(format_date),
            offspring_count: domain.offspring_count,
            notes: domain.notes,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_dto_list(records: Vec<DomainReproductionRecord>) -> Vec<SharedReproductionRecord> {
        records.into_iter().map(Self::to_dto).collect()
    }
}
