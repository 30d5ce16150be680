use crate::backend::domain::models::{finance::FinancialTransaction as DomainTransaction, format_date};
use shared::FinancialTransaction as SharedTransaction;

/// Mapper to convert domain transactions to shared DTOs.
pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            id: domain.id,
            animal_id: domain.animal_id,
            kind: domain.kind,
            category: domain.category,
            amount: domain.amount,
            date: format_date(domain.date),
            description: domain.description,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_dto_list(transactions: Vec<DomainTransaction>) -> Vec<SharedTransaction> {
        transactions.into_iter().map(Self::to_dto).collect()
    }
}
