//! Conversions from domain models (chrono dates) to the shared wire DTOs
//! (string dates).

pub mod animal_mapper;
pub mod history_mapper;
pub mod medical_mapper;
pub mod reproduction_mapper;
pub mod transaction_mapper;

pub use animal_mapper::AnimalMapper;
pub use history_mapper::HistoryMapper;
pub use medical_mapper::MedicalMapper;
pub use reproduction_mapper::ReproductionMapper;
pub use transaction_mapper::TransactionMapper;
