//! Income, expenses and the financial summary of the farm.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::info;
use shared::{
    CategoryTotal, CreateTransactionRequest, FinancialSummary, TransactionCategory,
    TransactionKind, TransactionListQuery,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::domain::models::{clean_optional, finance::FinancialTransaction, parse_date};
use crate::backend::domain::DomainError;
use crate::backend::storage::csv::{AnimalRepository, CsvConnection, TransactionRepository};
use crate::backend::storage::traits::{AnimalStorage, TransactionStorage};

#[derive(Clone)]
pub struct FinanceService {
    transaction_repository: TransactionRepository,
    animal_repository: AnimalRepository,
}

impl FinanceService {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            transaction_repository: TransactionRepository::new((*connection).clone()),
            animal_repository: AnimalRepository::new((*connection).clone()),
        }
    }

    pub async fn create_transaction(&self, request: CreateTransactionRequest) -> Result<FinancialTransaction> {
        info!(
            "Creating {} transaction: {} FCFA ({})",
            request.kind.as_str(),
            request.amount,
            request.category.as_str()
        );

        let animal_id = clean_optional(request.animal_id);
        if let Some(id) = animal_id.as_deref() {
            if self.animal_repository.get_animal(id).await?.is_none() {
                return Err(DomainError::not_found(format!("Animal {}", id)));
            }
        }

        let date = match request.date.as_deref() {
            Some(value) => parse_date(value, "date")?,
            None => Utc::now().date_naive(),
        };

        self.record_transaction(
            animal_id.as_deref(),
            request.kind,
            request.category,
            request.amount,
            date,
            &request.description,
        )
        .await
    }

    /// Store a movement produced by another service (sale, treatment cost)
    pub async fn record_transaction(
        &self,
        animal_id: Option<&str>,
        kind: TransactionKind,
        category: TransactionCategory,
        amount: f64,
        date: NaiveDate,
        description: &str,
    ) -> Result<FinancialTransaction> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::validation("montant must be greater than 0"));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description is required"));
        }

        let transaction = FinancialTransaction {
            id: FinancialTransaction::generate_id(kind),
            animal_id: animal_id.map(str::to_string),
            kind,
            category,
            amount,
            date,
            description: description.to_string(),
            created_at: Utc::now(),
        };

        self.transaction_repository.store_transaction(&transaction).await?;
        Ok(transaction)
    }

    /// Transactions in the optional inclusive date range, most recent first
    pub async fn list_transactions(&self, query: &TransactionListQuery) -> Result<Vec<FinancialTransaction>> {
        let start = optional_date(query.start_date.as_deref(), "start_date")?;
        let end = optional_date(query.end_date.as_deref(), "end_date")?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DomainError::validation("start_date must not be after end_date"));
            }
        }

        let mut transactions = self.transaction_repository.list_transactions(start, end).await?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    pub async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        info!("Deleting transaction {}", transaction_id);
        if !self.transaction_repository.delete_transaction(transaction_id).await? {
            return Err(DomainError::not_found(format!("Transaction {}", transaction_id)));
        }
        Ok(())
    }

    pub async fn delete_transactions_for_animal(&self, animal_id: &str) -> Result<u32> {
        self.transaction_repository.delete_transactions_for_animal(animal_id).await
    }

    /// Totals over every recorded transaction
    pub async fn summary(&self) -> Result<FinancialSummary> {
        let transactions = self.transaction_repository.list_transactions(None, None).await?;
        Ok(summarize(&transactions))
    }
}

fn optional_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v, field).map(Some),
        None => Ok(None),
    }
}

fn summarize(transactions: &[FinancialTransaction]) -> FinancialSummary {
    let mut total_revenus = 0.0;
    let mut total_depenses = 0.0;
    let mut per_category: BTreeMap<(TransactionCategory, &'static str), (TransactionKind, f64)> = BTreeMap::new();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_revenus += transaction.amount,
            TransactionKind::Expense => total_depenses += transaction.amount,
        }
        per_category
            .entry((transaction.category, transaction.kind.as_str()))
            .or_insert((transaction.kind, 0.0))
            .1 += transaction.amount;
    }

    FinancialSummary {
        total_revenus,
        total_depenses,
        benefice: total_revenus - total_depenses,
        par_categorie: per_category
            .into_iter()
            .map(|((category, _), (kind, total))| CategoryTotal { category, kind, total })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_animal, TestEnvironment};
    use shared::AnimalType;

    fn service(env: &TestEnvironment) -> FinanceService {
        FinanceService::new(Arc::new(env.connection.clone()))
    }

    fn request(kind: TransactionKind, category: TransactionCategory, amount: f64, date: &str) -> CreateTransactionRequest {
        CreateTransactionRequest {
            animal_id: None,
            kind,
            category,
            amount,
            date: Some(date.to_string()),
            description: "Mouvement".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_transaction_validation() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env);

        let zero = request(TransactionKind::Expense, TransactionCategory::Feed, 0.0, "2025-06-01");
        let err = service.create_transaction(zero).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_))));

        let mut blank = request(TransactionKind::Expense, TransactionCategory::Feed, 10.0, "2025-06-01");
        blank.description = "  ".to_string();
        assert!(service.create_transaction(blank).await.is_err());

        let bad_date = request(TransactionKind::Expense, TransactionCategory::Feed, 10.0, "juin");
        assert!(service.create_transaction(bad_date).await.is_err());

        let mut ghost = request(TransactionKind::Income, TransactionCategory::Sale, 10.0, "2025-06-01");
        ghost.animal_id = Some("ghost".to_string());
        let err = service.create_transaction(ghost).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_for_existing_animal() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env);
        AnimalRepository::new(env.connection.clone())
            .store_animal(&sample_animal("pig-1", AnimalType::Pig, None))
            .await
            .unwrap();

        let mut req = request(TransactionKind::Expense, TransactionCategory::Purchase, 60000.0, "2025-06-01");
        req.animal_id = Some("pig-1".to_string());
        let transaction = service.create_transaction(req).await.unwrap();

        assert!(transaction.id.starts_with("transaction::depense::"));
        assert_eq!(transaction.animal_id.as_deref(), Some("pig-1"));
        assert_eq!(service.delete_transactions_for_animal("pig-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_range_and_order() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env);
        for date in ["2025-06-01", "2025-06-15", "2025-06-30"] {
            service
                .create_transaction(request(TransactionKind::Expense, TransactionCategory::Feed, 100.0, date))
                .await
                .unwrap();
        }

        let all = service.list_transactions(&TransactionListQuery::default()).await.unwrap();
        let dates: Vec<String> = all.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-30", "2025-06-15", "2025-06-01"]);

        let query = TransactionListQuery {
            start_date: Some("2025-06-10".to_string()),
            end_date: Some("2025-06-30".to_string()),
        };
        assert_eq!(service.list_transactions(&query).await.unwrap().len(), 2);

        let inverted = TransactionListQuery {
            start_date: Some("2025-06-30".to_string()),
            end_date: Some("2025-06-01".to_string()),
        };
        assert!(service.list_transactions(&inverted).await.is_err());
    }

    #[tokio::test]
    async fn test_summary() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env);
        let entries = [
            (TransactionKind::Income, TransactionCategory::Sale, 90000.0),
            (TransactionKind::Income, TransactionCategory::Sale, 10000.0),
            (TransactionKind::Expense, TransactionCategory::Feed, 25000.0),
            (TransactionKind::Expense, TransactionCategory::Medical, 5000.0),
        ];
        for (kind, category, amount) in entries {
            service.create_transaction(request(kind, category, amount, "2025-06-01")).await.unwrap();
        }

        let summary = service.summary().await.unwrap();
        assert_eq!(summary.total_revenus, 100000.0);
        assert_eq!(summary.total_depenses, 30000.0);
        assert_eq!(summary.benefice, 70000.0);

        let sale = summary
            .par_categorie
            .iter()
            .find(|c| c.category == TransactionCategory::Sale)
            .unwrap();
        assert_eq!(sale.total, 100000.0);
        assert_eq!(sale.kind, TransactionKind::Income);
        assert_eq!(summary.par_categorie.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_unknown_transaction() {
        let env = TestEnvironment::new().await.unwrap();
        let err = service(&env).delete_transaction("nope").await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));
    }
}
