//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::backend::domain::models::{
    animal::Animal, finance::FinancialTransaction, history::HistoryEvent,
    medical::MedicalRecord, reproduction::ReproductionRecord,
};

/// Trait defining the interface for animal storage operations
#[async_trait]
pub trait AnimalStorage: Send + Sync {
    /// Store a new animal
    async fn store_animal(&self, animal: &Animal) -> Result<()>;

    /// Retrieve a specific animal by ID
    async fn get_animal(&self, animal_id: &str) -> Result<Option<Animal>>;

    /// List all animals in creation order
    async fn list_animals(&self) -> Result<Vec<Animal>>;

    /// Re-read an animal under the write lock, apply `change` and store the
    /// result, all as one step. Returns `None` if the ID is unknown; when
    /// `change` fails nothing is written and its error is returned.
    async fn modify_animal<F>(&self, animal_id: &str, change: F) -> Result<Option<Animal>>
    where
        F: FnOnce(&mut Animal) -> Result<()> + Send;

    /// Delete an animal; returns true if it was found and deleted
    async fn delete_animal(&self, animal_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait MedicalStorage: Send + Sync {
    async fn store_medical_record(&self, record: &MedicalRecord) -> Result<()>;

    /// List records, optionally restricted to one animal
    async fn list_medical_records(&self, animal_id: Option<&str>) -> Result<Vec<MedicalRecord>>;

    async fn delete_medical_record(&self, record_id: &str) -> Result<bool>;

    /// Returns the number of records removed
    async fn delete_medical_records_for_animal(&self, animal_id: &str) -> Result<u32>;
}

#[async_trait]
pub trait ReproductionStorage: Send + Sync {
    async fn store_reproduction_record(&self, record: &ReproductionRecord) -> Result<()>;

    async fn get_reproduction_record(&self, record_id: &str) -> Result<Option<ReproductionRecord>>;

    /// List records, optionally restricted to those involving one animal
    /// as female or male
    async fn list_reproduction_records(&self, animal_id: Option<&str>) -> Result<Vec<ReproductionRecord>>;

    /// Same contract as [`AnimalStorage::modify_animal`]
    async fn modify_reproduction_record<F>(&self, record_id: &str, change: F) -> Result<Option<ReproductionRecord>>
    where
        F: FnOnce(&mut ReproductionRecord) -> Result<()> + Send;

    /// Returns the number of records removed
    async fn delete_reproduction_records_for_animal(&self, animal_id: &str) -> Result<u32>;
}

#[async_trait]
pub trait TransactionStorage: Send + Sync {
    async fn store_transaction(&self, transaction: &FinancialTransaction) -> Result<()>;

    /// List transactions whose date falls in the inclusive range
    async fn list_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<FinancialTransaction>>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<bool>;

    /// Returns the number of transactions removed
    async fn delete_transactions_for_animal(&self, animal_id: &str) -> Result<u32>;
}

#[async_trait]
pub trait HistoryStorage: Send + Sync {
    async fn store_event(&self, event: &HistoryEvent) -> Result<()>;

    /// List events, optionally restricted to one animal
    async fn list_events(&self, animal_id: Option<&str>) -> Result<Vec<HistoryEvent>>;

    /// Returns the number of events removed
    async fn delete_events_for_animal(&self, animal_id: &str) -> Result<u32>;
}
