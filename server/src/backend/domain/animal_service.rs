//! # Animal Service
//!
//! Lifecycle of the herd: creation, edition, sale and deletion of animals
//! (or poultry waves). Every mutation is validated here before it reaches
//! storage; the service also keeps the history and the books in step with
//! the herd (a sale books an income, a deletion removes every record tied
//! to the animal).

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use log::{info, warn};
use shared::{
    AnimalListQuery, AnimalStatus, AnimalType, CreateAnimalRequest, EventType, ReproductionStatus,
    SellAnimalRequest, Sex, TransactionCategory, TransactionKind, UpdateAnimalRequest, CUSTOM_RACE,
};
use std::sync::Arc;

use crate::backend::domain::finance_service::FinanceService;
use crate::backend::domain::history_service::HistoryService;
use crate::backend::domain::medical_service::MedicalService;
use crate::backend::domain::models::{animal::Animal, clean_optional, parse_date};
use crate::backend::domain::reproduction_service::ReproductionService;
use crate::backend::domain::DomainError;
use crate::backend::storage::csv::{AnimalRepository, CsvConnection};
use crate::backend::storage::traits::AnimalStorage;

#[derive(Clone)]
pub struct AnimalService {
    animal_repository: AnimalRepository,
    medical_service: MedicalService,
    reproduction_service: ReproductionService,
    finance_service: FinanceService,
    history_service: HistoryService,
}

impl AnimalService {
    pub fn new(
        connection: Arc<CsvConnection>,
        medical_service: MedicalService,
        reproduction_service: ReproductionService,
        finance_service: FinanceService,
        history_service: HistoryService,
    ) -> Self {
        Self {
            animal_repository: AnimalRepository::new((*connection).clone()),
            medical_service,
            reproduction_service,
            finance_service,
            history_service,
        }
    }

    /// Create a new animal
    pub async fn create_animal(&self, request: CreateAnimalRequest) -> Result<Animal> {
        info!(
            "Creating animal: type={}, race={}, birth_date={}",
            request.animal_type, request.race, request.birth_date
        );

        let today = Utc::now().date_naive();
        let animal_type = validate_type(request.animal_type)?;
        let race = resolve_race(animal_type, &request.race, request.race_autre.as_deref())?;
        let birth_date = validate_birth_date(&request.birth_date, today)?;
        validate_weight(request.weight)?;
        validate_head_count(request.head_count)?;

        let now = Utc::now();
        let animal = Animal {
            id: Animal::generate_id(),
            animal_type,
            race,
            sex: request.sex,
            birth_date,
            weight: request.weight,
            name: clean_optional(request.name),
            notes: clean_optional(request.notes),
            head_count: request.head_count,
            status: AnimalStatus::Active,
            reproduction_status: ReproductionStatus::Available,
            created_at: now,
            updated_at: now,
        };

        self.animal_repository.store_animal(&animal).await?;
        self.history_service
            .record_event(
                Some(&animal.id),
                EventType::Birth,
                "Arrivée",
                format!("{} ({}) enregistré", animal.display_name(), animal.race),
                None,
            )
            .await?;

        info!("Created animal {} with ID {}", animal.display_name(), animal.id);
        Ok(animal)
    }

    pub async fn get_animal(&self, animal_id: &str) -> Result<Animal> {
        self.animal_repository
            .get_animal(animal_id)
            .await?
            .ok_or_else(|| {
                warn!("Animal not found: {}", animal_id);
                DomainError::not_found(format!("Animal {}", animal_id))
            })
    }

    /// Animals in creation order. Empty or unknown filter values are ignored.
    pub async fn list_animals(&self, query: &AnimalListQuery) -> Result<Vec<Animal>> {
        let animal_type = query.animal_type.as_deref().and_then(AnimalType::parse);
        let status = query.status.as_deref().and_then(AnimalStatus::parse);

        let animals: Vec<Animal> = self
            .animal_repository
            .list_animals()
            .await?
            .into_iter()
            .filter(|a| animal_type.map_or(true, |t| a.animal_type == t))
            .filter(|a| status.map_or(true, |s| a.status == s))
            .collect();

        info!("Found {} animals", animals.len());
        Ok(animals)
    }

    /// Every stored animal, unfiltered
    pub async fn all_animals(&self) -> Result<Vec<Animal>> {
        self.animal_repository.list_animals().await
    }

    /// Partial update; absent fields are left untouched. The animal is
    /// re-read and validated under the storage write lock.
    pub async fn update_animal(&self, animal_id: &str, request: UpdateAnimalRequest) -> Result<Animal> {
        info!("Updating animal {}", animal_id);
        let today = Utc::now().date_naive();

        let updated = self
            .animal_repository
            .modify_animal(animal_id, move |animal| apply_update(animal, request, today))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Animal {}", animal_id)))?;

        info!("Updated animal {}", updated.id);
        Ok(updated)
    }

    /// Mark an active animal as sold, booking the sale when a price is given.
    /// The status check and the status change happen as one storage step,
    /// so of several concurrent sales only one goes through.
    pub async fn sell_animal(&self, animal_id: &str, request: SellAnimalRequest) -> Result<Animal> {
        info!("Selling animal {} (price: {:?})", animal_id, request.price);

        if let Some(price) = request.price {
            if !price.is_finite() || price <= 0.0 {
                return Err(DomainError::validation("prix must be greater than 0"));
            }
        }
        let date = match request.date.as_deref() {
            Some(value) => parse_date(value, "date")?,
            None => Utc::now().date_naive(),
        };

        let animal = self
            .animal_repository
            .modify_animal(animal_id, |animal| {
                if animal.status == AnimalStatus::Sold {
                    return Err(DomainError::conflict(format!("Animal {} is already sold", animal.id)));
                }
                animal.status = AnimalStatus::Sold;
                animal.updated_at = Utc::now();
                Ok(())
            })
            .await?
            .ok_or_else(|| {
                warn!("Animal not found: {}", animal_id);
                DomainError::not_found(format!("Animal {}", animal_id))
            })?;

        let display_name = animal.display_name();
        if let Some(price) = request.price {
            self.finance_service
                .record_transaction(
                    Some(&animal.id),
                    TransactionKind::Income,
                    TransactionCategory::Sale,
                    price,
                    date,
                    &format!("Vente {}", display_name),
                )
                .await?;
        }

        let mut description = match request.price {
            Some(price) => format!("{} vendu pour {:.0} FCFA", display_name, price),
            None => format!("{} vendu", display_name),
        };
        if let Some(notes) = clean_optional(request.notes) {
            description.push_str(&format!(" ({})", notes));
        }
        self.history_service
            .record_event(Some(&animal.id), EventType::Sale, "Vente", description, None)
            .await?;

        Ok(animal)
    }

    /// Delete an animal together with its medical, reproduction,
    /// financial and history records
    pub async fn delete_animal(&self, animal_id: &str) -> Result<()> {
        info!("Deleting animal {}", animal_id);
        self.get_animal(animal_id).await?;

        let medical = self.medical_service.delete_for_animal(animal_id).await?;
        let reproduction = self.reproduction_service.delete_for_animal(animal_id).await?;
        let transactions = self.finance_service.delete_transactions_for_animal(animal_id).await?;
        let events = self.history_service.delete_events_for_animal(animal_id).await?;

        if !self.animal_repository.delete_animal(animal_id).await? {
            return Err(DomainError::not_found(format!("Animal {}", animal_id)));
        }

        info!(
            "Deleted animal {} ({} medical, {} reproduction, {} transactions, {} events)",
            animal_id, medical, reproduction, transactions, events
        );
        Ok(())
    }

    /// Insert the demonstration herd when the store is empty.
    /// Returns the number of animals inserted.
    pub async fn seed_sample_animals(&self) -> Result<usize> {
        if !self.animal_repository.list_animals().await?.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let samples = [
            (AnimalType::Poultry, "Plymouth Rock", Sex::Male, 27, 1.0, "poulet #3128"),
            (AnimalType::Poultry, "Sussex", Sex::Female, 27, 1.5, "poulet #f321"),
            (AnimalType::Poultry, "Sussex", Sex::Female, 28, 3.0, "Ok"),
            (AnimalType::Pig, "Large White", Sex::Female, 30, 0.2, "Petit 1 de 2"),
            (AnimalType::Pig, "Large White", Sex::Male, 30, 0.2, "Petit 2 de 2"),
        ];

        for (animal_type, race, sex, age_days, weight, name) in samples {
            let animal = Animal {
                id: Animal::generate_id(),
                animal_type,
                race: race.to_string(),
                sex: Some(sex),
                birth_date: (now - Duration::days(age_days)).date_naive(),
                weight,
                name: Some(name.to_string()),
                notes: None,
                head_count: None,
                status: AnimalStatus::Active,
                reproduction_status: ReproductionStatus::Available,
                created_at: now,
                updated_at: now,
            };
            self.animal_repository.store_animal(&animal).await?;
        }

        info!("Sample data initialized ({} animals)", samples.len());
        Ok(samples.len())
    }
}

fn apply_update(animal: &mut Animal, request: UpdateAnimalRequest, today: NaiveDate) -> Result<()> {
    if let Some(animal_type) = request.animal_type {
        let animal_type = validate_type(animal_type)?;
        // A listed breed of the old species has to be chosen again
        let listed_breed = animal.animal_type.known_races().contains(&animal.race.as_str());
        if animal_type != animal.animal_type && request.race.is_none() && listed_breed {
            resolve_race(animal_type, &animal.race, None)?;
        }
        animal.animal_type = animal_type;
    }
    if let Some(race) = request.race.as_deref() {
        animal.race = resolve_race(animal.animal_type, race, request.race_autre.as_deref())?;
    }
    if let Some(birth_date) = request.birth_date.as_deref() {
        animal.birth_date = validate_birth_date(birth_date, today)?;
    }
    if let Some(weight) = request.weight {
        validate_weight(weight)?;
        animal.weight = weight;
    }
    if request.head_count.is_some() {
        validate_head_count(request.head_count)?;
        animal.head_count = request.head_count;
    }
    if let Some(sex) = request.sex {
        animal.sex = Some(sex);
    }
    if request.name.is_some() {
        animal.name = clean_optional(request.name);
    }
    if request.notes.is_some() {
        animal.notes = clean_optional(request.notes);
    }
    if let Some(status) = request.status {
        animal.status = status;
    }
    if let Some(reproduction_status) = request.reproduction_status {
        animal.reproduction_status = reproduction_status;
    }
    animal.updated_at = Utc::now();
    Ok(())
}

fn validate_type(animal_type: AnimalType) -> Result<AnimalType> {
    match animal_type {
        AnimalType::Poultry | AnimalType::Pig => Ok(animal_type),
        AnimalType::Other => Err(DomainError::validation("type must be 'poulet' or 'porc'")),
    }
}

/// Breed to store: a known breed of the species, or the custom breed
/// when the form sent "Autre"
fn resolve_race(animal_type: AnimalType, race: &str, custom: Option<&str>) -> Result<String> {
    let race = race.trim();
    if race.is_empty() {
        return Err(DomainError::validation("race is required"));
    }

    if race == CUSTOM_RACE {
        return match custom.map(str::trim).filter(|c| !c.is_empty()) {
            Some(custom) => Ok(custom.to_string()),
            None => Err(DomainError::validation("race_autre is required when race is 'Autre'")),
        };
    }

    if animal_type.known_races().contains(&race) {
        Ok(race.to_string())
    } else {
        Err(DomainError::validation(format!(
            "race '{}' is not a known {} breed",
            race, animal_type
        )))
    }
}

fn validate_birth_date(value: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = parse_date(value, "date_naissance")?;
    if date > today {
        return Err(DomainError::validation("date_naissance cannot be in the future"));
    }
    Ok(date)
}

fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DomainError::validation("poids must be greater than 0"));
    }
    Ok(())
}

fn validate_head_count(head_count: Option<u32>) -> Result<()> {
    if head_count == Some(0) {
        return Err(DomainError::validation("nombre must be at least 1"));
    }
    Ok(())
}
