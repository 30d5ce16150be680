use crate::backend::domain::models::{format_date, medical::MedicalRecord as DomainMedicalRecord};
use shared::MedicalRecord as SharedMedicalRecord;

pub struct MedicalMapper;

impl MedicalMapper {
    pub fn to_dto(domain: DomainMedicalRecord) -> SharedMedicalRecord {
        SharedMedicalRecord {
            id: domain.id,
            animal_id: domain.animal_id,
            medical_type: domain.medical_type,
            description: domain.description,
            veterinarian: domain.veterinarian,
            cost: domain.cost,
            date: format_date(domain.date),
            next_visit_date: domain.next_visit_date.map(format_date),
            notes: domain.notes,
        }
    }

    pub fn to_dto_list(records: Vec<DomainMedicalRecord>) -> Vec<SharedMedicalRecord> {
        records.into_iter().map(Self::to_dto).collect()
    }
}
