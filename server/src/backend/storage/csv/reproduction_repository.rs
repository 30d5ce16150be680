//! # CSV Reproduction Repository
//!
//! Matings and births in `{data_directory}/reproduction_records.csv`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, CsvTable};
use crate::backend::domain::models::{format_date, parse_date, reproduction::ReproductionRecord};
use crate::backend::storage::ReproductionStorage;

const REPRODUCTION_FILE: &str = "reproduction_records.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReproductionRow {
    id: String,
    female_id: String,
    male_id: Option<String>,
    breeding_date: String,
    expected_birth_date: Option<String>,
    actual_birth_date: Option<String>,
    offspring_count: Option<u32>,
    notes: Option<String>,
    created_at: String,
}

impl From<&ReproductionRecord> for ReproductionRow {
    fn from(record: &ReproductionRecord) -> Self {
        ReproductionRow {
            id: record.id.clone(),
            female_id: record.female_id.clone(),
            male_id: record.male_id.clone(),
            breeding_date: format_date(record.breeding_date),
            expected_birth_date: record.expected_birth_date.map(format_date),
            actual_birth_date: record.actual_birth_date.map(format_date),
            offspring_count: record.offspring_count,
            notes: record.notes.clone(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<ReproductionRow> for ReproductionRecord {
    type Error = anyhow::Error;

    fn try_from(row: ReproductionRow) -> Result<Self> {
        let optional_date = |value: Option<&str>, field: &str| match value {
            Some(v) => parse_date(v, field).map(Some),
            None => Ok(None),
        };

        Ok(ReproductionRecord {
            breeding_date: parse_date(&row.breeding_date, "breeding_date")?,
            expected_birth_date: optional_date(row.expected_birth_date.as_deref(), "expected_birth_date")?,
            actual_birth_date: optional_date(row.actual_birth_date.as_deref(), "actual_birth_date")?,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)?.with_timezone(&Utc),
            id: row.id,
            female_id: row.female_id,
            male_id: row.male_id,
            offspring_count: row.offspring_count,
            notes: row.notes,
        })
    }
}

#[derive(Clone)]
pub struct ReproductionRepository {
    connection: CsvConnection,
}

impl ReproductionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_all(&self) -> Result<CsvTable<ReproductionRecord>> {
        self.connection.read_table::<ReproductionRow, ReproductionRecord>(REPRODUCTION_FILE)
    }

    fn write_all(&self, table: &CsvTable<ReproductionRecord>) -> Result<()> {
        let rows: Vec<ReproductionRow> = table.records.iter().map(ReproductionRow::from).collect();
        self.connection.write_table(REPRODUCTION_FILE, &rows, &table.unreadable)
    }
}

#[async_trait]
impl ReproductionStorage for ReproductionRepository {
    async fn store_reproduction_record(&self, record: &ReproductionRecord) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_all()?;
        table.records.push(record.clone());
        self.write_all(&table)?;

        info!("Stored reproduction record {} for female {}", record.id, record.female_id);
        Ok(())
    }

    async fn get_reproduction_record(&self, record_id: &str) -> Result<Option<ReproductionRecord>> {
        Ok(self.read_all()?.records.into_iter().find(|r| r.id == record_id))
    }

    async fn list_reproduction_records(&self, animal_id: Option<&str>) -> Result<Vec<ReproductionRecord>> {
        let records = self.read_all()?.records;
        Ok(match animal_id {
            Some(animal_id) => records.into_iter().filter(|r| r.involves(animal_id)).collect(),
            None => records,
        })
    }

    async fn modify_reproduction_record<F>(&self, record_id: &str, change: F) -> Result<Option<ReproductionRecord>>
    where
        F: FnOnce(&mut ReproductionRecord) -> Result<()> + Send,
    {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_all()?;

        let Some(record) = table.records.iter_mut().find(|r| r.id == record_id) else {
            return Ok(None);
        };
        change(record)?;
        let updated = record.clone();

        self.write_all(&table)?;
        Ok(Some(updated))
    }

    async fn delete_reproduction_records_for_animal(&self, animal_id: &str) -> Result<u32> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_all()?;
        let before = table.records.len();
        table.records.retain(|r| !r.involves(animal_id));

        let removed = (before - table.records.len()) as u32;
        if removed > 0 {
            self.write_all(&table)?;
        }
        Ok(removed)
    }
}
