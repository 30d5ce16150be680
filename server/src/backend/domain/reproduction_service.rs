//! Matings, expected births and litters.

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{
    AnimalType, CreateReproductionRequest, EventType, RecordBirthRequest, ReproductionStatus, Sex,
};
use std::sync::Arc;

use crate::backend::domain::history_service::HistoryService;
use crate::backend::domain::models::{
    animal::Animal, clean_optional, parse_date, reproduction::ReproductionRecord,
};
use crate::backend::domain::DomainError;
use crate::backend::storage::csv::{AnimalRepository, CsvConnection, ReproductionRepository};
use crate::backend::storage::traits::{AnimalStorage, ReproductionStorage};

/// Gestation (or incubation) length per species, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestationPeriods {
    pub pig_days: i64,
    pub poultry_days: i64,
}

impl Default for GestationPeriods {
    fn default() -> Self {
        Self {
            pig_days: 114,
            poultry_days: 21,
        }
    }
}

impl GestationPeriods {
    pub fn days_for(&self, animal_type: AnimalType) -> Option<i64> {
        match animal_type {
            AnimalType::Pig => Some(self.pig_days),
            AnimalType::Poultry => Some(self.poultry_days),
            AnimalType::Other => None,
        }
    }
}

#[derive(Clone)]
pub struct ReproductionService {
    reproduction_repository: ReproductionRepository,
    animal_repository: AnimalRepository,
    history_service: HistoryService,
    gestation: GestationPeriods,
}

impl ReproductionService {
    pub fn new(
        connection: Arc<CsvConnection>,
        history_service: HistoryService,
        gestation: GestationPeriods,
    ) -> Self {
        Self {
            reproduction_repository: ReproductionRepository::new((*connection).clone()),
            animal_repository: AnimalRepository::new((*connection).clone()),
            history_service,
            gestation,
        }
    }

    async fn require_animal(&self, animal_id: &str) -> Result<Animal> {
        self.animal_repository
            .get_animal(animal_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Animal {}", animal_id)))
    }

    async fn set_reproduction_status(&self, animal_id: &str, status: ReproductionStatus) -> Result<()> {
        self.animal_repository
            .modify_animal(animal_id, move |animal| {
                animal.reproduction_status = status;
                animal.updated_at = Utc::now();
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Register a mating. The female becomes pregnant.
    pub async fn create_record(&self, request: CreateReproductionRequest) -> Result<ReproductionRecord> {
        info!("Creating reproduction record for female {}", request.female_id);

        let female = self.require_animal(&request.female_id).await?;
        if female.sex != Some(Sex::Female) {
            return Err(DomainError::validation(format!("Animal {} is not a female", female.id)));
        }
        if !female.is_active() {
            return Err(DomainError::validation(format!("Animal {} is not active", female.id)));
        }

        let male_id = clean_optional(request.male_id);
        if let Some(male_id) = male_id.as_deref() {
            let male = self.require_animal(male_id).await?;
            if male.sex != Some(Sex::Male) {
                return Err(DomainError::validation(format!("Animal {} is not a male", male.id)));
            }
            if male.animal_type != female.animal_type {
                return Err(DomainError::validation("male and female must be of the same type"));
            }
        }

        let breeding_date = parse_date(&request.breeding_date, "date_saillie")?;
        let expected_birth_date = match request.expected_birth_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date(value, "date_mise_bas_prevue")?),
            _ => self.expected_birth_date(female.animal_type, breeding_date),
        };
        if expected_birth_date.map_or(false, |expected| expected < breeding_date) {
            return Err(DomainError::validation("date_mise_bas_prevue must not be before date_saillie"));
        }

        let record = ReproductionRecord {
            id: ReproductionRecord::generate_id(),
            female_id: female.id.clone(),
            male_id,
            breeding_date,
            expected_birth_date,
            actual_birth_date: None,
            offspring_count: None,
            notes: clean_optional(request.notes),
            created_at: Utc::now(),
        };
        self.reproduction_repository.store_reproduction_record(&record).await?;

        let description = match record.expected_birth_date {
            Some(expected) => format!("Mise bas prévue le {}", expected.format("%d/%m/%Y")),
            None => String::new(),
        };
        self.history_service
            .record_event(Some(&female.id), EventType::Reproduction, "Saillie", description, None)
            .await?;
        self.set_reproduction_status(&female.id, ReproductionStatus::Pregnant).await?;

        Ok(record)
    }

    /// Close a mating with its birth. The female becomes lactating.
    pub async fn record_birth(&self, record_id: &str, request: RecordBirthRequest) -> Result<ReproductionRecord> {
        info!("Recording birth for reproduction record {}", record_id);

        let birth_date = match request.birth_date.as_deref() {
            Some(value) => parse_date(value, "date_mise_bas")?,
            None => Utc::now().date_naive(),
        };
        let offspring_count = request.offspring_count;

        // Checked under the storage write lock
        let record = self
            .reproduction_repository
            .modify_reproduction_record(record_id, move |record| {
                if record.has_birth() {
                    return Err(DomainError::conflict(format!(
                        "Birth already recorded for reproduction record {}",
                        record.id
                    )));
                }
                if birth_date < record.breeding_date {
                    return Err(DomainError::validation("date_mise_bas must not be before date_saillie"));
                }
                record.actual_birth_date = Some(birth_date);
                record.offspring_count = Some(offspring_count);
                Ok(())
            })
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Reproduction record {}", record_id)))?;

        if let Some(female) = self.animal_repository.get_animal(&record.female_id).await? {
            self.history_service
                .record_event(
                    Some(&female.id),
                    EventType::Birth,
                    "Mise bas",
                    format!("{} petit(s) né(s)", offspring_count),
                    None,
                )
                .await?;
            self.set_reproduction_status(&female.id, ReproductionStatus::Lactating).await?;
        }

        Ok(record)
    }

    /// All records, or those involving `animal_id`; latest matings first
    pub async fn list_records(&self, animal_id: Option<&str>) -> Result<Vec<ReproductionRecord>> {
        let mut records = self.reproduction_repository.list_reproduction_records(animal_id).await?;
        records.sort_by(|a, b| b.breeding_date.cmp(&a.breeding_date));
        Ok(records)
    }

    pub async fn delete_for_animal(&self, animal_id: &str) -> Result<u32> {
        self.reproduction_repository.delete_reproduction_records_for_animal(animal_id).await
    }

    pub fn expected_birth_date(&self, animal_type: AnimalType, breeding_date: NaiveDate) -> Option<NaiveDate> {
        self.gestation
            .days_for(animal_type)
            .map(|days| breeding_date + Duration::days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_animal, TestEnvironment};
    use shared::AnimalStatus;

    struct Fixture {
        env: TestEnvironment,
        service: ReproductionService,
        animals: AnimalRepository,
    }

    async fn fixture() -> Fixture {
        let env = TestEnvironment::new().await.unwrap();
        let connection = Arc::new(env.connection.clone());
        let animals = AnimalRepository::new(env.connection.clone());
        for animal in [
            sample_animal("sow", AnimalType::Pig, Some(Sex::Female)),
            sample_animal("boar", AnimalType::Pig, Some(Sex::Male)),
            sample_animal("hen", AnimalType::Poultry, Some(Sex::Female)),
            sample_animal("rooster", AnimalType::Poultry, Some(Sex::Male)),
        ] {
            animals.store_animal(&animal).await.unwrap();
        }

        let history = HistoryService::new(connection.clone());
        let service = ReproductionService::new(connection, history, GestationPeriods::default());
        Fixture { env, service, animals }
    }

    fn request(female: &str, male: Option<&str>) -> CreateReproductionRequest {
        CreateReproductionRequest {
            female_id: female.to_string(),
            male_id: male.map(str::to_string),
            breeding_date: "2025-02-01".to_string(),
            expected_birth_date: None,
            notes: None,
        }
    }

    fn is_validation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_)))
    }

    #[tokio::test]
    async fn test_create_defaults_expected_birth() {
        let f = fixture().await;

        let pig = f.service.create_record(request("sow", Some("boar"))).await.unwrap();
        assert_eq!(pig.expected_birth_date, NaiveDate::from_ymd_opt(2025, 5, 26));

        let hen = f.service.create_record(request("hen", Some("rooster"))).await.unwrap();
        assert_eq!(hen.expected_birth_date, NaiveDate::from_ymd_opt(2025, 2, 22));

        let sow = f.animals.get_animal("sow").await.unwrap().unwrap();
        assert_eq!(sow.reproduction_status, ReproductionStatus::Pregnant);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let f = fixture().await;

        assert!(is_validation(&f.service.create_record(request("boar", None)).await.unwrap_err()));
        assert!(is_validation(&f.service.create_record(request("sow", Some("hen"))).await.unwrap_err()));
        assert!(is_validation(&f.service.create_record(request("sow", Some("rooster"))).await.unwrap_err()));

        let err = f.service.create_record(request("ghost", None)).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));

        f.animals
            .modify_animal("sow", |sow| {
                sow.status = AnimalStatus::Sold;
                Ok(())
            })
            .await
            .unwrap();
        assert!(is_validation(&f.service.create_record(request("sow", None)).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_record_birth_once() {
        let f = fixture().await;
        let record = f.service.create_record(request("sow", Some("boar"))).await.unwrap();

        let birth = RecordBirthRequest {
            birth_date: Some("2025-05-24".to_string()),
            offspring_count: 11,
        };
        let updated = f.service.record_birth(&record.id, birth.clone()).await.unwrap();
        assert_eq!(updated.offspring_count, Some(11));
        assert_eq!(updated.actual_birth_date, NaiveDate::from_ymd_opt(2025, 5, 24));

        let sow = f.animals.get_animal("sow").await.unwrap().unwrap();
        assert_eq!(sow.reproduction_status, ReproductionStatus::Lactating);

        let err = f.service.record_birth(&record.id, birth).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Conflict(_))));

        let early = RecordBirthRequest {
            birth_date: Some("2025-01-01".to_string()),
            offspring_count: 1,
        };
        let other = f.service.create_record(request("hen", None)).await.unwrap();
        assert!(is_validation(&f.service.record_birth(&other.id, early).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_list_records() {
        let f = fixture().await;
        f.service.create_record(request("sow", Some("boar"))).await.unwrap();
        let mut later = request("hen", None);
        later.breeding_date = "2025-03-01".to_string();
        f.service.create_record(later).await.unwrap();

        let all = f.service.list_records(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].female_id, "hen");

        assert_eq!(f.service.list_records(Some("boar")).await.unwrap().len(), 1);
        assert_eq!(f.service.delete_for_animal("boar").await.unwrap(), 1);
        assert!(f.env.connection.file_path("reproduction_records.csv").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_births_record_once() {
        let f = fixture().await;
        let record = f.service.create_record(request("sow", Some("boar"))).await.unwrap();

        let handles: Vec<_> = (0..6)
            .map(|count| {
                let service = f.service.clone();
                let record_id = record.id.clone();
                tokio::spawn(async move {
                    let birth = RecordBirthRequest {
                        birth_date: Some("2025-05-24".to_string()),
                        offspring_count: 8 + count,
                    };
                    service.record_birth(&record_id, birth).await
                })
            })
            .collect();

        let mut recorded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => recorded += 1,
                Err(e) => assert!(matches!(
                    e.downcast_ref::<DomainError>(),
                    Some(DomainError::Conflict(_))
                )),
            }
        }
        assert_eq!(recorded, 1);

        let stored = f.service.list_records(Some("sow")).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].has_birth());
    }
}
