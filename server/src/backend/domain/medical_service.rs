use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use shared::{CreateMedicalRecordRequest, EventType, TransactionCategory, TransactionKind};
use std::sync::Arc;

use crate::backend::domain::finance_service::FinanceService;
use crate::backend::domain::history_service::HistoryService;
use crate::backend::domain::models::{clean_optional, medical::MedicalRecord, parse_date};
use crate::backend::domain::DomainError;
use crate::backend::storage::csv::{AnimalRepository, CsvConnection, MedicalRepository};
use crate::backend::storage::traits::{AnimalStorage, MedicalStorage};

/// Veterinary follow-up of the herd
#[derive(Clone)]
pub struct MedicalService {
    medical_repository: MedicalRepository,
    animal_repository: AnimalRepository,
    finance_service: FinanceService,
    history_service: HistoryService,
}

impl MedicalService {
    pub fn new(
        connection: Arc<CsvConnection>,
        finance_service: FinanceService,
        history_service: HistoryService,
    ) -> Self {
        Self {
            medical_repository: MedicalRepository::new((*connection).clone()),
            animal_repository: AnimalRepository::new((*connection).clone()),
            finance_service,
            history_service,
        }
    }

    /// Record an intervention. A positive cost is also booked as a
    /// medical expense.
    pub async fn create_medical_record(&self, request: CreateMedicalRecordRequest) -> Result<MedicalRecord> {
        info!(
            "Creating {} record for animal {}",
            request.medical_type.as_str(),
            request.animal_id
        );

        let animal = self
            .animal_repository
            .get_animal(&request.animal_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Animal {}", request.animal_id)))?;

        let description = request.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description is required"));
        }
        if let Some(cost) = request.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(DomainError::validation("cout must not be negative"));
            }
        }

        let date = match request.date.as_deref() {
            Some(value) => parse_date(value, "date")?,
            None => Utc::now().date_naive(),
        };
        let next_visit_date = match request.next_visit_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date(value, "prochaine_visite")?),
            _ => None,
        };
        if next_visit_date.map_or(false, |next| next < date) {
            return Err(DomainError::validation("prochaine_visite must not be before date"));
        }

        let record = MedicalRecord {
            id: MedicalRecord::generate_id(),
            animal_id: animal.id.clone(),
            medical_type: request.medical_type,
            description: description.to_string(),
            veterinarian: clean_optional(request.veterinarian),
            cost: request.cost,
            date,
            next_visit_date,
            notes: clean_optional(request.notes),
        };
        self.medical_repository.store_medical_record(&record).await?;

        if let Some(cost) = record.cost.filter(|cost| *cost > 0.0) {
            self.finance_service
                .record_transaction(
                    Some(&animal.id),
                    TransactionKind::Expense,
                    TransactionCategory::Medical,
                    cost,
                    date,
                    &format!("{} - {}", record.medical_type.as_str(), animal.display_name()),
                )
                .await?;
        }

        self.history_service
            .record_event(
                Some(&animal.id),
                EventType::Medical,
                format!("Soin: {}", record.medical_type.as_str()),
                record.description.clone(),
                record.cost,
            )
            .await?;

        Ok(record)
    }

    /// Records of one animal, most recent first
    pub async fn list_for_animal(&self, animal_id: &str) -> Result<Vec<MedicalRecord>> {
        if self.animal_repository.get_animal(animal_id).await?.is_none() {
            return Err(DomainError::not_found(format!("Animal {}", animal_id)));
        }

        let mut records = self.medical_repository.list_medical_records(Some(animal_id)).await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /// Scheduled visits on or after `today`, soonest first
    pub async fn upcoming_visits(&self, today: NaiveDate) -> Result<Vec<MedicalRecord>> {
        let mut records: Vec<MedicalRecord> = self
            .medical_repository
            .list_medical_records(None)
            .await?
            .into_iter()
            .filter(|record| record.next_visit_date.map_or(false, |next| next >= today))
            .collect();

        records.sort_by_key(|record| record.next_visit_date);
        Ok(records)
    }

    pub async fn delete_medical_record(&self, record_id: &str) -> Result<()> {
        if !self.medical_repository.delete_medical_record(record_id).await? {
            warn!("Medical record {} not found", record_id);
            return Err(DomainError::not_found(format!("Medical record {}", record_id)));
        }
        Ok(())
    }

    pub async fn delete_for_animal(&self, animal_id: &str) -> Result<u32> {
        self.medical_repository.delete_medical_records_for_animal(animal_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_animal, TestEnvironment};
    use shared::{AnimalType, MedicalType, TransactionListQuery};

    struct Fixture {
        _env: TestEnvironment,
        service: MedicalService,
        finance: FinanceService,
        history: HistoryService,
    }

    async fn fixture() -> Fixture {
        let env = TestEnvironment::new().await.unwrap();
        let connection = Arc::new(env.connection.clone());
        AnimalRepository::new(env.connection.clone())
            .store_animal(&sample_animal("pig-1", AnimalType::Pig, None))
            .await
            .unwrap();

        let finance = FinanceService::new(connection.clone());
        let history = HistoryService::new(connection.clone());
        let service = MedicalService::new(connection, finance.clone(), history.clone());
        Fixture { _env: env, service, finance, history }
    }

    fn request(cost: Option<f64>, date: &str, next: Option<&str>) -> CreateMedicalRecordRequest {
        CreateMedicalRecordRequest {
            animal_id: "pig-1".to_string(),
            medical_type: MedicalType::Vaccination,
            description: "Peste porcine".to_string(),
            veterinarian: Some("  ".to_string()),
            cost,
            date: Some(date.to_string()),
            next_visit_date: next.map(str::to_string),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_cost_books_expense() {
        let f = fixture().await;

        let record = f
            .service
            .create_medical_record(request(Some(3500.0), "2025-06-01", Some("2025-07-01")))
            .await
            .unwrap();

        assert!(record.id.starts_with("medical::"));
        assert_eq!(record.veterinarian, None);

        let transactions = f.finance.list_transactions(&TransactionListQuery::default()).await.unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[0].category, TransactionCategory::Medical);
        assert_eq!(transactions[0].amount, 3500.0);

        let events = f.history.list_events(Some("pig-1")).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Medical);
    }

    #[tokio::test]
    async fn test_free_intervention_books_nothing() {
        let f = fixture().await;
        f.service.create_medical_record(request(Some(0.0), "2025-06-01", None)).await.unwrap();
        f.service.create_medical_record(request(None, "2025-06-02", None)).await.unwrap();

        assert!(f.finance.list_transactions(&TransactionListQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_validation() {
        let f = fixture().await;

        let mut unknown = request(None, "2025-06-01", None);
        unknown.animal_id = "ghost".to_string();
        let err = f.service.create_medical_record(unknown).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));

        let negative = request(Some(-10.0), "2025-06-01", None);
        assert!(f.service.create_medical_record(negative).await.is_err());

        let mut blank = request(None, "2025-06-01", None);
        blank.description = " ".to_string();
        assert!(f.service.create_medical_record(blank).await.is_err());

        let backwards = request(None, "2025-06-01", Some("2025-05-01"));
        assert!(f.service.create_medical_record(backwards).await.is_err());
    }

    #[tokio::test]
    async fn test_listing_and_upcoming() {
        let f = fixture().await;
        f.service.create_medical_record(request(None, "2025-05-01", Some("2025-05-20"))).await.unwrap();
        f.service.create_medical_record(request(None, "2025-06-01", Some("2025-08-01"))).await.unwrap();
        f.service.create_medical_record(request(None, "2025-06-10", Some("2025-07-01"))).await.unwrap();

        let records = f.service.list_for_animal("pig-1").await.unwrap();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let upcoming = f.service.upcoming_visits(today).await.unwrap();
        let next: Vec<Option<NaiveDate>> = upcoming.iter().map(|r| r.next_visit_date).collect();
        assert_eq!(
            next,
            vec![NaiveDate::from_ymd_opt(2025, 7, 1), NaiveDate::from_ymd_opt(2025, 8, 1)]
        );

        assert!(f.service.list_for_animal("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let f = fixture().await;
        let record = f.service.create_medical_record(request(None, "2025-06-01", None)).await.unwrap();

        f.service.delete_medical_record(&record.id).await.unwrap();
        let err = f.service.delete_medical_record(&record.id).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));
    }
}
