//! # CSV Medical Repository
//!
//! Veterinary interventions in `{data_directory}/medical_records.csv`.

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use shared::MedicalType;

use super::connection::{CsvConnection, CsvTable};
use crate::backend::domain::models::{format_date, medical::MedicalRecord, parse_date};
use crate::backend::storage::MedicalStorage;

const MEDICAL_FILE: &str = "medical_records.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MedicalRow {
    id: String,
    animal_id: String,
    medical_type: String,
    description: String,
    veterinarian: Option<String>,
    cost: Option<f64>,
    date: String,
    next_visit_date: Option<String>,
    notes: Option<String>,
}

impl From<&MedicalRecord> for MedicalRow {
    fn from(record: &MedicalRecord) -> Self {
        MedicalRow {
            id: record.id.clone(),
            animal_id: record.animal_id.clone(),
            medical_type: record.medical_type.as_str().to_string(),
            description: record.description.clone(),
            veterinarian: record.veterinarian.clone(),
            cost: record.cost,
            date: format_date(record.date),
            next_visit_date: record.next_visit_date.map(format_date),
            notes: record.notes.clone(),
        }
    }
}

impl TryFrom<MedicalRow> for MedicalRecord {
    type Error = anyhow::Error;

    fn try_from(row: MedicalRow) -> Result<Self> {
        let medical_type = MedicalType::parse(&row.medical_type)
            .ok_or_else(|| anyhow::anyhow!("Invalid medical type '{}'", row.medical_type))?;
        let next_visit_date = match row.next_visit_date.as_deref() {
            Some(value) => Some(parse_date(value, "next_visit_date")?),
            None => None,
        };

        Ok(MedicalRecord {
            id: row.id,
            animal_id: row.animal_id,
            medical_type,
            description: row.description,
            veterinarian: row.veterinarian,
            cost: row.cost,
            date: parse_date(&row.date, "date")?,
            next_visit_date,
            notes: row.notes,
        })
    }
}

#[derive(Clone)]
pub struct MedicalRepository {
    connection: CsvConnection,
}

impl MedicalRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_all(&self) -> Result<CsvTable<MedicalRecord>> {
        self.connection.read_table::<MedicalRow, MedicalRecord>(MEDICAL_FILE)
    }

    fn write_all(&self, table: &CsvTable<MedicalRecord>) -> Result<()> {
        let rows: Vec<MedicalRow> = table.records.iter().map(MedicalRow::from).collect();
        self.connection.write_table(MEDICAL_FILE, &rows, &table.unreadable)
    }
}

#[async_trait]
impl MedicalStorage for MedicalRepository {
    async fn store_medical_record(&self, record: &MedicalRecord) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_all()?;
        table.records.push(record.clone());
        self.write_all(&table)?;

        info!("Stored medical record {} for animal {}", record.id, record.animal_id);
        Ok(())
    }

    async fn list_medical_records(&self, animal_id: Option<&str>) -> Result<Vec<MedicalRecord>> {
        let records = self.read_all()?.records;
        Ok(match animal_id {
            Some(animal_id) => records.into_iter().filter(|r| r.animal_id == animal_id).collect(),
            None => records,
        })
    }

    async fn delete_medical_record(&self, record_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_all()?;
        let before = table.records.len();
        table.records.retain(|r| r.id != record_id);

        if table.records.len() == before {
            return Ok(false);
        }
        self.write_all(&table)?;
        Ok(true)
    }

    async fn delete_medical_records_for_animal(&self, animal_id: &str) -> Result<u32> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_all()?;
        let before = table.records.len();
        table.records.retain(|r| r.animal_id != animal_id);

        let removed = (before - table.records.len()) as u32;
        if removed > 0 {
            self.write_all(&table)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;

    fn record(id: &str, animal_id: &str, next_visit: Option<NaiveDate>) -> MedicalRecord {
        MedicalRecord {
            id: id.to_string(),
            animal_id: animal_id.to_string(),
            medical_type: MedicalType::Vaccination,
            description: "Vaccin Newcastle".to_string(),
            veterinarian: Some("Dr Kouassi".to_string()),
            cost: Some(2500.0),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            next_visit_date: next_visit,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_store_and_list_by_animal() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = MedicalRepository::new(env.connection.clone());
        let next = NaiveDate::from_ymd_opt(2025, 4, 1);

        repo.store_medical_record(&record("m1", "a1", next)).await.unwrap();
        repo.store_medical_record(&record("m2", "a2", None)).await.unwrap();
        repo.store_medical_record(&record("m3", "a1", None)).await.unwrap();

        let all = repo.list_medical_records(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let a1 = repo.list_medical_records(Some("a1")).await.unwrap();
        assert_eq!(a1.len(), 2);
        assert_eq!(a1[0].next_visit_date, next);
        assert_eq!(a1[0].veterinarian.as_deref(), Some("Dr Kouassi"));
        assert_eq!(a1[1].next_visit_date, None);
    }

    #[tokio::test]
    async fn test_delete_records() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = MedicalRepository::new(env.connection.clone());
        for (id, animal) in [("m1", "a1"), ("m2", "a1"), ("m3", "a2")] {
            repo.store_medical_record(&record(id, animal, None)).await.unwrap();
        }

        assert!(repo.delete_medical_record("m3").await.unwrap());
        assert!(!repo.delete_medical_record("m3").await.unwrap());

        assert_eq!(repo.delete_medical_records_for_animal("a1").await.unwrap(), 2);
        assert_eq!(repo.delete_medical_records_for_animal("a1").await.unwrap(), 0);
        assert!(repo.list_medical_records(None).await.unwrap().is_empty());
    }
}
