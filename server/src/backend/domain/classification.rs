//! Livestock classification and herd view building.
//!
//! Everything here is a pure function of the animal list and the current
//! instant: ages are derived from the birth date, each animal is placed in
//! a lifecycle category, and the herd view is filtered and sorted for the
//! presentation layer. Nothing in this module performs I/O or fails.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    AnimalStatus, AnimalType, Category, CategoryLabel, HerdViewQuery, Sex, SortKey,
};
use std::cmp::{Ordering, Reverse};

use crate::backend::domain::models::animal::Animal;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Age limits (in days, inclusive) of the juvenile categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    /// Pigs up to this age are piglets
    pub piglet_max_days: i64,
    /// Pigs up to this age (and past the piglet stage) are growers
    pub grower_max_days: i64,
    /// Poultry up to this age are chicks
    pub chick_max_days: i64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            piglet_max_days: 60,
            grower_max_days: 180,
            chick_max_days: 90,
        }
    }
}

/// Filters of the herd view. `None` means "no filter" for that field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HerdFilter {
    pub status: Option<AnimalStatus>,
    pub animal_type: Option<AnimalType>,
    pub category: Option<Category>,
}

impl HerdFilter {
    /// Build filters from raw query values; empty or unknown values are ignored
    pub fn from_query(query: &HerdViewQuery) -> Self {
        Self {
            status: query.status.as_deref().and_then(AnimalStatus::parse),
            animal_type: query.animal_type.as_deref().and_then(AnimalType::parse),
            category: query.category.as_deref().and_then(Category::parse),
        }
    }
}

/// An animal together with the fields derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedAnimal {
    pub animal: Animal,
    pub display_name: String,
    pub age_in_days: i64,
    pub age_label: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HerdViewModel {
    pub animals: Vec<ClassifiedAnimal>,
    pub available_categories: Vec<Category>,
    pub total: usize,
}

/// Whole days between the birth date (midnight UTC) and `now`, rounding
/// any started day up. Birth dates in the future yield the same positive
/// distance.
pub fn age_in_days(birth_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let born = Utc.from_utc_datetime(&birth_date.and_time(NaiveTime::default()));
    let millis = (now - born).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Human-readable age: "N jours", "N mois" or "Y an(s) M mois"
pub fn format_age(birth_date: NaiveDate, now: DateTime<Utc>) -> String {
    format_age_days(age_in_days(birth_date, now))
}

fn format_age_days(days: i64) -> String {
    if days < 30 {
        return format!("{} jours", days);
    }
    if days < 365 {
        return format!("{} mois", days / 30);
    }

    let years = days / 365;
    let months = (days % 365) / 30;
    let plural = if years > 1 { "s" } else { "" };
    let months_clause = if months > 0 {
        format!("{} mois", months)
    } else {
        String::new()
    };
    format!("{} an{} {}", years, plural, months_clause)
}

/// Collation key for names: lowercase with common accents folded
fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ÿ' => 'y',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Service that classifies animals and builds the herd view
#[derive(Debug, Clone, Default)]
pub struct ClassificationService {
    thresholds: ClassificationThresholds,
}

impl ClassificationService {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ClassificationThresholds {
        self.thresholds
    }

    /// Lifecycle category of an animal at `now`
    pub fn classify(&self, animal: &Animal, now: DateTime<Utc>) -> Category {
        let days = age_in_days(animal.birth_date, now);
        let limits = &self.thresholds;

        match (animal.animal_type, animal.sex) {
            (AnimalType::Pig, _) if days <= limits.piglet_max_days => Category::Piglet,
            (AnimalType::Pig, _) if days <= limits.grower_max_days => Category::Grower,
            (AnimalType::Pig, Some(Sex::Male)) => Category::Boar,
            (AnimalType::Pig, Some(Sex::Female)) => Category::Sow,
            (AnimalType::Poultry, _) if days <= limits.chick_max_days => Category::Chick,
            (AnimalType::Poultry, Some(Sex::Male)) => Category::Rooster,
            (AnimalType::Poultry, Some(Sex::Female)) => Category::LayingHen,
            _ => Category::Other,
        }
    }

    fn matches(&self, animal: &Animal, filter: &HerdFilter, now: DateTime<Utc>) -> bool {
        filter.status.map_or(true, |status| animal.status == status)
            && filter.animal_type.map_or(true, |t| animal.animal_type == t)
            && filter
                .category
                .map_or(true, |category| self.classify(animal, now) == category)
    }

    /// Animals passing every filter, in the requested order.
    ///
    /// Sorting is stable so ties keep their input order; without a sort key
    /// the input order is kept as is. The input slice is never modified.
    pub fn filter_and_sort(
        &self,
        animals: &[Animal],
        filter: &HerdFilter,
        sort: Option<SortKey>,
        now: DateTime<Utc>,
    ) -> Vec<Animal> {
        let mut selected: Vec<&Animal> = animals
            .iter()
            .filter(|animal| self.matches(animal, filter, now))
            .collect();

        match sort {
            Some(SortKey::Age) => {
                selected.sort_by_key(|animal| age_in_days(animal.birth_date, now))
            }
            Some(SortKey::AgeDesc) => {
                selected.sort_by_key(|animal| Reverse(age_in_days(animal.birth_date, now)))
            }
            Some(SortKey::Weight) => selected.sort_by(|a, b| a.weight.total_cmp(&b.weight)),
            Some(SortKey::WeightDesc) => selected.sort_by(|a, b| b.weight.total_cmp(&a.weight)),
            Some(SortKey::Name) => {
                selected.sort_by(|a, b| compare_names(&a.display_name(), &b.display_name()))
            }
            None => {}
        }

        selected.into_iter().cloned().collect()
    }

    /// Distinct categories among animals of `animal_type` (all types when
    /// `None`), in ascending order of their wire names
    pub fn available_categories(
        &self,
        animals: &[Animal],
        animal_type: Option<AnimalType>,
        now: DateTime<Utc>,
    ) -> Vec<Category> {
        let mut categories: Vec<Category> = animals
            .iter()
            .filter(|animal| animal_type.map_or(true, |t| animal.animal_type == t))
            .map(|animal| self.classify(animal, now))
            .collect();

        categories.sort_by_key(|category| category.as_str());
        categories.dedup();
        categories
    }

    /// Label dictionary for every category
    pub fn category_labels(&self) -> Vec<CategoryLabel> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryLabel {
                value: category,
                label: category.label().to_string(),
            })
            .collect()
    }

    pub fn classify_animal(&self, animal: Animal, now: DateTime<Utc>) -> ClassifiedAnimal {
        let age_in_days = age_in_days(animal.birth_date, now);
        ClassifiedAnimal {
            display_name: animal.display_name(),
            age_label: format_age_days(age_in_days),
            category: self.classify(&animal, now),
            age_in_days,
            animal,
        }
    }

    /// Full view-model for the herd list
    pub fn build_view(
        &self,
        animals: &[Animal],
        query: &HerdViewQuery,
        now: DateTime<Utc>,
    ) -> HerdViewModel {
        let filter = HerdFilter::from_query(query);
        let sort = query.sort.as_deref().and_then(SortKey::parse);

        let rows: Vec<ClassifiedAnimal> = self
            .filter_and_sort(animals, &filter, sort, now)
            .into_iter()
            .map(|animal| self.classify_animal(animal, now))
            .collect();

        log::debug!(
            "Herd view built: {} of {} animals (filter: {:?}, sort: {:?})",
            rows.len(),
            animals.len(),
            filter,
            sort
        );

        HerdViewModel {
            total: rows.len(),
            available_categories: self.available_categories(animals, filter.animal_type, now),
            animals: rows,
        }
    }
}
