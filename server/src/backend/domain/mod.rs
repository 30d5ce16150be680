//! # Domain Module
//!
//! Business rules of the farm: the livestock classifier and the services
//! that manage animals, veterinary care, reproduction, finances and the
//! farm history.
//!
//! ## Module Organization
//!
//! - **classification**: age, lifecycle category and herd view building (pure)
//! - **animal_service**: animal lifecycle, validation and cascading deletion
//! - **medical_service**: veterinary interventions and upcoming visits
//! - **reproduction_service**: matings, expected births and litters
//! - **finance_service**: income, expenses and the financial summary
//! - **stats_service**: dashboard figures over the active herd
//! - **history_service**: the farm timeline
//!
//! Services return `anyhow::Result`; business failures are raised as
//! [`DomainError`] so the IO layer can map them to status codes.

pub mod animal_service;
pub mod classification;
pub mod error;
pub mod finance_service;
pub mod history_service;
pub mod medical_service;
pub mod models;
pub mod reproduction_service;
pub mod stats_service;

pub use animal_service::AnimalService;
pub use classification::{ClassificationService, ClassificationThresholds};
pub use error::DomainError;
pub use finance_service::FinanceService;
pub use history_service::HistoryService;
pub use medical_service::MedicalService;
pub use reproduction_service::{GestationPeriods, ReproductionService};
pub use stats_service::{MarketPrices, StatsService};
