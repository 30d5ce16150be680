//! # CSV Storage Module
//!
//! File-based storage for the farm, one CSV file per entity:
//!
//! - `animals.csv`
//! - `medical_records.csv`
//! - `reproduction_records.csv`
//! - `transactions.csv`
//! - `history.csv`
//!
//! Each file has a header row and is rewritten atomically (temporary file
//! then rename) on every mutation. Read-modify-write cycles are serialized
//! by the write lock of [`CsvConnection`]. Rows that cannot be read are
//! logged, hidden from callers, and written back verbatim on rewrite.

pub mod animal_repository;
pub mod connection;
pub mod history_repository;
pub mod medical_repository;
pub mod reproduction_repository;
pub mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use animal_repository::AnimalRepository;
pub use connection::{CsvConnection, CsvTable, UnreadableRows};
pub use history_repository::HistoryRepository;
pub use medical_repository::MedicalRepository;
pub use reproduction_repository::ReproductionRepository;
pub use transaction_repository::TransactionRepository;
