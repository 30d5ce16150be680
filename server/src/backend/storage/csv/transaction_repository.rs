//! # CSV Transaction Repository
//!
//! Income and expenses in `{data_directory}/transactions.csv`.
//!
//! ## CSV Format
//!
//! ```csv
//! id,animal_id,kind,category,amount,date,description,created_at
//! transaction::revenu::5f1e…,0d6c…3128,revenu,vente,45000.0,2025-06-20,Vente poulet #3128,2025-06-20T10:12:00+00:00
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{TransactionCategory, TransactionKind};

use super::connection::{CsvConnection, CsvTable};
use crate::backend::domain::models::{finance::FinancialTransaction, format_date, parse_date};
use crate::backend::storage::TransactionStorage;

const TRANSACTIONS_FILE: &str = "transactions.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    id: String,
    animal_id: Option<String>,
    kind: String,
    category: String,
    amount: f64,
    date: String,
    description: String,
    created_at: String,
}

impl From<&FinancialTransaction> for TransactionRecord {
    fn from(transaction: &FinancialTransaction) -> Self {
        TransactionRecord {
            id: transaction.id.clone(),
            animal_id: transaction.animal_id.clone(),
            kind: transaction.kind.as_str().to_string(),
            category: transaction.category.as_str().to_string(),
            amount: transaction.amount,
            date: format_date(transaction.date),
            description: transaction.description.clone(),
            created_at: transaction.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<TransactionRecord> for FinancialTransaction {
    type Error = anyhow::Error;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let kind = TransactionKind::parse(&record.kind)
            .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind '{}'", record.kind))?;
        let category = TransactionCategory::parse(&record.category).unwrap_or(TransactionCategory::Other);

        Ok(FinancialTransaction {
            id: record.id,
            animal_id: record.animal_id,
            kind,
            category,
            amount: record.amount,
            date: parse_date(&record.date, "date")?,
            description: record.description,
            created_at: DateTime::parse_from_rfc3339(&record.created_at)?.with_timezone(&Utc),
        })
    }
}

/// CSV-based transaction repository
#[derive(Clone)]
pub struct TransactionRepository {
    connection: CsvConnection,
}

impl TransactionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_transactions(&self) -> Result<CsvTable<FinancialTransaction>> {
        self.connection.read_table::<TransactionRecord, FinancialTransaction>(TRANSACTIONS_FILE)
    }

    fn write_transactions(&self, table: &CsvTable<FinancialTransaction>) -> Result<()> {
        let records: Vec<TransactionRecord> = table.records.iter().map(TransactionRecord::from).collect();
        self.connection.write_table(TRANSACTIONS_FILE, &records, &table.unreadable)
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transaction(&self, transaction: &FinancialTransaction) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_transactions()?;
        table.records.push(transaction.clone());
        self.write_transactions(&table)?;

        info!(
            "Stored {} transaction {} ({:.2})",
            transaction.kind.as_str(),
            transaction.id,
            transaction.amount
        );
        Ok(())
    }

    async fn list_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<FinancialTransaction>> {
        let transactions = self.read_transactions()?.records;
        Ok(transactions
            .into_iter()
            .filter(|t| start_date.map_or(true, |start| t.date >= start))
            .filter(|t| end_date.map_or(true, |end| t.date <= end))
            .collect())
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_transactions()?;
        let before = table.records.len();
        table.records.retain(|t| t.id != transaction_id);

        if table.records.len() == before {
            return Ok(false);
        }
        self.write_transactions(&table)?;
        info!("Deleted transaction {}", transaction_id);
        Ok(true)
    }

    async fn delete_transactions_for_animal(&self, animal_id: &str) -> Result<u32> {
        let _guard = self.connection.lock_writes().await;
        let mut table = self.read_transactions()?;
        let before = table.records.len();
        table.records.retain(|t| t.animal_id.as_deref() != Some(animal_id));

        let removed = (before - table.records.len()) as u32;
        if removed > 0 {
            self.write_transactions(&table)?;
        }
        Ok(removed)
    }
}
