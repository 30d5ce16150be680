use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{AnimalStatus, AnimalType, ReproductionStatus, Sex};
use uuid::Uuid;

/// Domain model of an animal or a poultry wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub animal_type: AnimalType,
    pub race: String,
    pub sex: Option<Sex>,
    pub birth_date: NaiveDate,
    pub weight: f64,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub head_count: Option<u32>,
    pub status: AnimalStatus,
    pub reproduction_status: ReproductionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Animal {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn is_active(&self) -> bool {
        self.status == AnimalStatus::Active
    }

    /// Name shown in lists: the given name, or `"{type} #{last 4 id chars}"`
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let chars: Vec<char> = self.id.chars().collect();
                let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
                format!("{} #{}", self.animal_type, tail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(id: &str, name: Option<&str>) -> Animal {
        Animal {
            id: id.to_string(),
            animal_type: AnimalType::Poultry,
            race: "Sussex".to_string(),
            sex: None,
            birth_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            weight: 1.5,
            name: name.map(str::to_string),
            notes: None,
            head_count: None,
            status: AnimalStatus::Active,
            reproduction_status: ReproductionStatus::Available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_uses_name() {
        assert_eq!(animal("abc-3128", Some("Rosie")).display_name(), "Rosie");
    }

    #[test]
    fn test_display_name_falls_back_to_type_and_id() {
        assert_eq!(animal("9f1e-3128", None).display_name(), "poulet #3128");
        assert_eq!(animal("9f1e-f321", Some("  ")).display_name(), "poulet #f321");
        assert_eq!(animal("ab", None).display_name(), "poulet #ab");
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(Animal::generate_id(), Animal::generate_id());
    }
}
