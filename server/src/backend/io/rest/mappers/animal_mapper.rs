use crate::backend::domain::classification::{ClassifiedAnimal, HerdViewModel};
use crate::backend::domain::models::{animal::Animal as DomainAnimal, format_date};
use shared::{Animal as SharedAnimal, AnimalResponse, AnimalView, HerdView};

/// Mapper to convert domain animals and herd views to shared DTOs.
pub struct AnimalMapper;

impl AnimalMapper {
    pub fn to_dto(domain: DomainAnimal) -> SharedAnimal {
        SharedAnimal {
            id: domain.id,
            animal_type: domain.animal_type,
            race: domain.race,
            sex: domain.sex,
            birth_date: format_date(domain.birth_date),
            weight: domain.weight,
            name: domain.name,
            notes: domain.notes,
            head_count: domain.head_count,
            status: domain.status,
            reproduction_status: domain.reproduction_status,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainAnimal, message: &str) -> AnimalResponse {
        AnimalResponse {
            animal: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_view_dto(classified: ClassifiedAnimal) -> AnimalView {
        AnimalView {
            animal: Self::to_dto(classified.animal),
            display_name: classified.display_name,
            age_in_days: classified.age_in_days,
            age_label: classified.age_label,
            category: classified.category,
            category_label: classified.category.label().to_string(),
        }
    }

    pub fn to_herd_view_dto(view: HerdViewModel) -> HerdView {
        HerdView {
            animals: view.animals.into_iter().map(Self::to_view_dto).collect(),
            available_categories: view.available_categories,
            total: view.total,
        }
    }
}
