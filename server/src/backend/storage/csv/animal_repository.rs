//! # CSV Animal Repository
//!
//! Stores the herd in `{data_directory}/animals.csv`, one row per animal
//! (or poultry wave), in creation order.
//!
//! ## CSV Format
//!
//! ```csv
//! id,animal_type,race,sex,birth_date,weight,name,notes,head_count,status,reproduction_status,created_at,updated_at
//! 0d6c…3128,poulet,Plymouth Rock,M,2025-05-19,1.0,,,,actif,disponible,2025-06-15T08:00:00+00:00,2025-06-15T08:00:00+00:00
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{AnimalStatus, AnimalType, ReproductionStatus, Sex};

use super::connection::{CsvConnection, CsvTable};
use crate::backend::domain::models::{animal::Animal, format_date, parse_date};
use crate::backend::storage::AnimalStorage;

const ANIMALS_FILE: &str = "animals.csv";

/// CSV record structure for animals
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnimalRecord {
    id: String,
    animal_type: String,
    race: String,
    sex: Option<String>,
    birth_date: String,
    weight: f64,
    name: Option<String>,
    notes: Option<String>,
    head_count: Option<u32>,
    status: String,
    reproduction_status: String,
    created_at: String,
    updated_at: String,
}

impl From<&Animal> for AnimalRecord {
    fn from(animal: &Animal) -> Self {
        AnimalRecord {
            id: animal.id.clone(),
            animal_type: animal.animal_type.as_str().to_string(),
            race: animal.race.clone(),
            sex: animal.sex.map(|s| s.as_str().to_string()),
            birth_date: format_date(animal.birth_date),
            weight: animal.weight,
            name: animal.name.clone(),
            notes: animal.notes.clone(),
            head_count: animal.head_count,
            status: animal.status.as_str().to_string(),
            reproduction_status: animal.reproduction_status.as_str().to_string(),
            created_at: animal.created_at.to_rfc3339(),
            updated_at: animal.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<AnimalRecord> for Animal {
    type Error = anyhow::Error;

    fn try_from(record: AnimalRecord) -> Result<Self> {
        let animal_type = AnimalType::parse(&record.animal_type).unwrap_or(AnimalType::Other);
        let sex = match record.sex.as_deref() {
            Some(value) => Some(
                Sex::parse(value).ok_or_else(|| anyhow::anyhow!("Invalid sex '{}'", value))?,
            ),
            None => None,
        };
        let status = AnimalStatus::parse(&record.status)
            .ok_or_else(|| anyhow::anyhow!("Invalid status '{}'", record.status))?;
        let reproduction_status =
            ReproductionStatus::parse(&record.reproduction_status).unwrap_or_default();

        Ok(Animal {
            id: record.id,
            animal_type,
            race: record.race,
            sex,
            birth_date: parse_date(&record.birth_date, "birth_date")?,
            weight: record.weight,
            name: record.name,
            notes: record.notes,
            head_count: record.head_count,
            status,
            reproduction_status,
            created_at: DateTime::parse_from_rfc3339(&record.created_at)?.with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&record.updated_at)?.with_timezone(&Utc),
        })
    }
}

/// CSV-based animal repository
#[derive(Clone)]
pub struct AnimalRepository {
    connection: CsvConnection,
}

impl AnimalRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_animals(&self) -> Result<CsvTable<Animal>> {
        self.connection.read_table::<AnimalRecord, Animal>(ANIMALS_FILE)
    }

    fn write_animals(&self, table: &CsvTable<Animal>) -> Result<()> {
        let records: Vec<AnimalRecord> = table.records.iter().map(AnimalRecord::from).collect();
        self.connection.write_table(ANIMALS_FILE, &records, &table.unreadable)
    }
}

#[async_trait]
impl AnimalStorage for AnimalRepository {
    async fn store_animal(&self, animal: &Animal) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_animals()?;

        if table.records.iter().any(|a| a.id == animal.id) {
            return Err(anyhow::anyhow!("Animal with ID {} already exists", animal.id));
        }

        table.records.push(animal.clone());
        self.write_animals(&table)?;

        info!("Stored animal {} ({})", animal.id, animal.animal_type);
        Ok(())
    }

    async fn get_animal(&self, animal_id: &str) -> Result<Option<Animal>> {
        let table = self.read_animals()?;
        Ok(table.records.into_iter().find(|a| a.id == animal_id))
    }

    async fn list_animals(&self) -> Result<Vec<Animal>> {
        let table = self.read_animals()?;
        debug!(
            "Loaded {} animals ({} unreadable rows)",
            table.records.len(),
            table.unreadable.len()
        );
        Ok(table.records)
    }

    async fn modify_animal<F>(&self, animal_id: &str, change: F) -> Result<Option<Animal>>
    where
        F: FnOnce(&mut Animal) -> Result<()> + Send,
    {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_animals()?;

        let Some(animal) = table.records.iter_mut().find(|a| a.id == animal_id) else {
            return Ok(None);
        };
        change(animal)?;
        let updated = animal.clone();

        self.write_animals(&table)?;
        debug!("Updated animal {}", animal_id);
        Ok(Some(updated))
    }

    async fn delete_animal(&self, animal_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_animals()?;
        let before = table.records.len();

        table.records.retain(|a| a.id != animal_id);
        if table.records.len() == before {
            return Ok(false);
        }

        self.write_animals(&table)?;
        info!("Deleted animal {}", animal_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_animal, TestEnvironment};

    #[tokio::test]
    async fn test_store_and_get_animal() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        let animal = sample_animal("a-1", AnimalType::Pig, Some(Sex::Female));

        repo.store_animal(&animal).await.unwrap();

        let loaded = repo.get_animal("a-1").await.unwrap().expect("animal should exist");
        assert_eq!(loaded.race, animal.race);
        assert_eq!(loaded.birth_date, animal.birth_date);
        assert_eq!(loaded.sex, Some(Sex::Female));
        assert_eq!(loaded.status, AnimalStatus::Active);
        assert_eq!(loaded.created_at.timestamp(), animal.created_at.timestamp());

        assert!(repo.get_animal("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_duplicate_id_fails() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        let animal = sample_animal("dup", AnimalType::Poultry, None);

        repo.store_animal(&animal).await.unwrap();
        assert!(repo.store_animal(&animal).await.is_err());
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());

        for id in ["c", "a", "b"] {
            repo.store_animal(&sample_animal(id, AnimalType::Poultry, None)).await.unwrap();
        }

        let ids: Vec<String> = repo.list_animals().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_modify_animal() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        repo.store_animal(&sample_animal("u-1", AnimalType::Pig, Some(Sex::Male))).await.unwrap();

        let updated = repo
            .modify_animal("u-1", |animal| {
                animal.weight = 95.5;
                animal.name = Some("Gaston".to_string());
                animal.status = AnimalStatus::Sold;
                Ok(())
            })
            .await
            .unwrap()
            .expect("animal should exist");
        assert_eq!(updated.weight, 95.5);

        let loaded = repo.get_animal("u-1").await.unwrap().unwrap();
        assert_eq!(loaded.weight, 95.5);
        assert_eq!(loaded.name.as_deref(), Some("Gaston"));
        assert_eq!(loaded.status, AnimalStatus::Sold);

        assert!(repo.modify_animal("ghost", |_| Ok(())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_modify_writes_nothing() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        repo.store_animal(&sample_animal("u-2", AnimalType::Pig, None)).await.unwrap();

        let result = repo
            .modify_animal("u-2", |animal| {
                animal.weight = 1.0;
                anyhow::bail!("rejected")
            })
            .await;

        assert!(result.is_err());
        assert_eq!(repo.get_animal("u-2").await.unwrap().unwrap().weight, 45.0);
    }

    #[tokio::test]
    async fn test_delete_animal() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        repo.store_animal(&sample_animal("d-1", AnimalType::Pig, None)).await.unwrap();
        repo.store_animal(&sample_animal("d-2", AnimalType::Pig, None)).await.unwrap();

        assert!(repo.delete_animal("d-1").await.unwrap());
        assert!(!repo.delete_animal("d-1").await.unwrap());

        let remaining = repo.list_animals().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "d-2");
    }

    fn append_line(env: &TestEnvironment, line: &str) {
        let path = env.connection.file_path(ANIMALS_FILE);
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str(line);
        std::fs::write(&path, content).unwrap();
    }

    #[tokio::test]
    async fn test_unparsable_rows_are_skipped() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        repo.store_animal(&sample_animal("ok", AnimalType::Poultry, None)).await.unwrap();
        append_line(&env, "bad,porc,Duroc,F,not-a-date,50.0,,,,actif,disponible,2025-01-01T00:00:00+00:00,2025-01-01T00:00:00+00:00\n");

        let animals = repo.list_animals().await.unwrap();
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].id, "ok");
    }

    #[tokio::test]
    async fn test_hand_edited_row_survives_writes() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());
        repo.store_animal(&sample_animal("first", AnimalType::Pig, Some(Sex::Male))).await.unwrap();
        let edited = "edited,porc,Duroc,f,2025-01-01,50.0,,,,actif,disponible,2025-01-01T00:00:00+00:00,2025-01-01T00:00:00+00:00";
        append_line(&env, &format!("{}\n", edited));

        repo.store_animal(&sample_animal("new", AnimalType::Pig, None)).await.unwrap();
        repo.modify_animal("first", |animal| {
            animal.weight = 60.0;
            Ok(())
        })
        .await
        .unwrap();
        repo.delete_animal("new").await.unwrap();

        let content = std::fs::read_to_string(env.connection.file_path(ANIMALS_FILE)).unwrap();
        assert!(content.lines().any(|line| line == edited));
        let ids: Vec<String> = repo.list_animals().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_stores_keep_every_row() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AnimalRepository::new(env.connection.clone());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    let animal = sample_animal(&format!("wave-{}", i), AnimalType::Poultry, None);
                    repo.store_animal(&animal).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut ids: Vec<String> = repo.list_animals().await.unwrap().into_iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
