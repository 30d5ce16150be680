//! # Storage Module
//!
//! Persistence of the farm data. The domain layer talks to the traits in
//! [`traits`]; [`csv`] implements them with one CSV file per entity in the
//! data directory.

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::{AnimalStorage, HistoryStorage, MedicalStorage, ReproductionStorage, TransactionStorage};
