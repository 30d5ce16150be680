use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use shared::{AnimalType, Category, CategoryCount, FarmStats, Sex, SpeciesStats};
use std::sync::Arc;

use crate::backend::domain::classification::ClassificationService;
use crate::backend::domain::finance_service::FinanceService;
use crate::backend::domain::models::animal::Animal;
use crate::backend::storage::csv::{AnimalRepository, CsvConnection};
use crate::backend::storage::traits::AnimalStorage;

/// Live-weight market prices in FCFA per kg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketPrices {
    pub pig_per_kg: f64,
    pub poultry_per_kg: f64,
}

impl Default for MarketPrices {
    fn default() -> Self {
        Self {
            pig_per_kg: 1500.0,
            poultry_per_kg: 2500.0,
        }
    }
}

impl MarketPrices {
    pub fn price_per_kg(&self, animal_type: AnimalType) -> f64 {
        match animal_type {
            AnimalType::Pig => self.pig_per_kg,
            AnimalType::Poultry => self.poultry_per_kg,
            AnimalType::Other => 0.0,
        }
    }

    /// Estimated value of a record; a poultry wave counts every head
    pub fn value_of(&self, animal: &Animal) -> f64 {
        let heads = animal.head_count.unwrap_or(1) as f64;
        animal.weight * heads * self.price_per_kg(animal.animal_type)
    }
}

/// Dashboard figures
#[derive(Clone)]
pub struct StatsService {
    animal_repository: AnimalRepository,
    finance_service: FinanceService,
    classification_service: ClassificationService,
    prices: MarketPrices,
}

impl StatsService {
    pub fn new(
        connection: Arc<CsvConnection>,
        finance_service: FinanceService,
        classification_service: ClassificationService,
        prices: MarketPrices,
    ) -> Self {
        Self {
            animal_repository: AnimalRepository::new((*connection).clone()),
            finance_service,
            classification_service,
            prices,
        }
    }

    pub async fn compute_stats(&self, now: DateTime<Utc>) -> Result<FarmStats> {
        let animals = self.animal_repository.list_animals().await?;
        let summary = self.finance_service.summary().await?;

        let stats = self.build_stats(&animals, summary.benefice, now);
        debug!(
            "Stats: {} active, {} sold, herd value {:.0} FCFA",
            stats.active_animals, stats.sold_animals, stats.herd_value
        );
        Ok(stats)
    }

    fn build_stats(&self, animals: &[Animal], profitability: f64, now: DateTime<Utc>) -> FarmStats {
        let active: Vec<&Animal> = animals.iter().filter(|a| a.is_active()).collect();

        let species = |animal_type: AnimalType| {
            let of_type = active.iter().filter(|a| a.animal_type == animal_type);
            SpeciesStats {
                count: of_type.clone().count(),
                males: of_type.clone().filter(|a| a.sex == Some(Sex::Male)).count(),
                females: of_type.filter(|a| a.sex == Some(Sex::Female)).count(),
            }
        };

        let categories = Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                label: category.label().to_string(),
                count: active
                    .iter()
                    .filter(|a| self.classification_service.classify(a, now) == category)
                    .count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        FarmStats {
            total_livestock: active.iter().map(|a| a.head_count.unwrap_or(1) as usize).sum(),
            active_animals: active.len(),
            sold_animals: animals.len() - active.len(),
            poultry: species(AnimalType::Poultry),
            pigs: species(AnimalType::Pig),
            males: active.iter().filter(|a| a.sex == Some(Sex::Male)).count(),
            females: active.iter().filter(|a| a.sex == Some(Sex::Female)).count(),
            categories,
            herd_value: active.iter().map(|a| self.prices.value_of(a)).sum(),
            profitability,
            profitability_label: format!("{:.0} FCFA", profitability),
        }
    }
}
