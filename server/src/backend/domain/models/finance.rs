use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{TransactionCategory, TransactionKind};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: String,
    pub animal_id: Option<String>,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    /// Always positive; `kind` carries the direction
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl FinancialTransaction {
    pub fn generate_id(kind: TransactionKind) -> String {
        format!("transaction::{}::{}", kind.as_str(), Uuid::new_v4())
    }

    /// Amount with its sign: positive for income, negative for expense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
