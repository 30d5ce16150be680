/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use chrono::{Duration, Utc};
use shared::{AnimalStatus, AnimalType, ReproductionStatus, Sex};
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::backend::domain::models::animal::Animal;

/// RAII Test Environment that automatically cleans up on drop
///
/// The temporary directory is removed when the TestEnvironment goes out of scope.
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The CSV connection for the test
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("PROVIDENCE_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}

/// An active animal born 100 days ago
pub fn sample_animal(id: &str, animal_type: AnimalType, sex: Option<Sex>) -> Animal {
    let now = Utc::now();
    let race = animal_type
        .known_races()
        .first()
        .copied()
        .unwrap_or("Inconnue")
        .to_string();

    Animal {
        id: id.to_string(),
        animal_type,
        race,
        sex,
        birth_date: (now - Duration::days(100)).date_naive(),
        weight: match animal_type {
            AnimalType::Pig => 45.0,
            _ => 1.8,
        },
        name: None,
        notes: None,
        head_count: None,
        status: AnimalStatus::Active,
        reproduction_status: ReproductionStatus::Available,
        created_at: now,
        updated_at: now,
    }
}
