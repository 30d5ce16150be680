use serde::{Deserialize, Serialize};
use std::fmt;

/// Species raised on the farm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalType {
    #[serde(rename = "poulet")]
    Poultry,
    #[serde(rename = "porc")]
    Pig,
    /// Anything else read from the wire; never accepted on create
    #[serde(rename = "autre", other)]
    Other,
}

impl AnimalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalType::Poultry => "poulet",
            AnimalType::Pig => "porc",
            AnimalType::Other => "autre",
        }
    }

    /// Parse a filter/query value. Empty or unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "poulet" => Some(AnimalType::Poultry),
            "porc" => Some(AnimalType::Pig),
            _ => None,
        }
    }

    /// Breeds offered by the creation form for this species
    pub fn known_races(&self) -> &'static [&'static str] {
        match self {
            AnimalType::Poultry => &["Plymouth Rock", "Sussex", "Rhode Island Red", "Leghorn"],
            AnimalType::Pig => &["Large White", "Landrace", "Duroc", "Yorkshire"],
            AnimalType::Other => &[],
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Race value the form sends when the breed is typed in by hand
pub const CUSTOM_RACE: &str = "Autre";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Lifecycle status of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalStatus {
    #[serde(rename = "actif")]
    Active,
    #[serde(rename = "vendu")]
    Sold,
}

impl AnimalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Active => "actif",
            AnimalStatus::Sold => "vendu",
        }
    }

    /// Parse a filter/query value. Empty, `all` or unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "actif" => Some(AnimalStatus::Active),
            "vendu" => Some(AnimalStatus::Sold),
            _ => None,
        }
    }
}

impl fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breeding state of a female (or a male in service)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReproductionStatus {
    #[default]
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "gestante")]
    Pregnant,
    #[serde(rename = "allaitante")]
    Lactating,
    #[serde(rename = "reproduction")]
    Breeding,
    #[serde(rename = "repos")]
    Resting,
}

impl ReproductionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReproductionStatus::Available => "disponible",
            ReproductionStatus::Pregnant => "gestante",
            ReproductionStatus::Lactating => "allaitante",
            ReproductionStatus::Breeding => "reproduction",
            ReproductionStatus::Resting => "repos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "disponible" => Some(ReproductionStatus::Available),
            "gestante" => Some(ReproductionStatus::Pregnant),
            "allaitante" => Some(ReproductionStatus::Lactating),
            "reproduction" => Some(ReproductionStatus::Breeding),
            "repos" => Some(ReproductionStatus::Resting),
            _ => None,
        }
    }
}

/// Age-and-sex derived lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "porcelet")]
    Piglet,
    #[serde(rename = "en_croissance")]
    Grower,
    #[serde(rename = "male_reproducteur")]
    Boar,
    #[serde(rename = "femelle_reproductrice")]
    Sow,
    #[serde(rename = "poussin")]
    Chick,
    #[serde(rename = "coq_reproducteur")]
    Rooster,
    #[serde(rename = "poule_pondeuse")]
    LayingHen,
    #[serde(rename = "autre")]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Piglet,
        Category::Grower,
        Category::Boar,
        Category::Sow,
        Category::Chick,
        Category::Rooster,
        Category::LayingHen,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Piglet => "porcelet",
            Category::Grower => "en_croissance",
            Category::Boar => "male_reproducteur",
            Category::Sow => "femelle_reproductrice",
            Category::Chick => "poussin",
            Category::Rooster => "coq_reproducteur",
            Category::LayingHen => "poule_pondeuse",
            Category::Other => "autre",
        }
    }

    /// Human-readable label shown next to the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Piglet => "Porcelet",
            Category::Grower => "En croissance",
            Category::Boar => "Mâle reproducteur",
            Category::Sow => "Femelle reproductrice",
            Category::Chick => "Poussin",
            Category::Rooster => "Coq reproducteur",
            Category::LayingHen => "Poule pondeuse",
            Category::Other => "Autre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied to the herd view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Youngest first
    Age,
    AgeDesc,
    /// Lightest first
    Weight,
    WeightDesc,
    /// Display name, alphabetical
    Name,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "age" => Some(SortKey::Age),
            "age_desc" => Some(SortKey::AgeDesc),
            "weight" => Some(SortKey::Weight),
            "weight_desc" => Some(SortKey::WeightDesc),
            "name" => Some(SortKey::Name),
            _ => None,
        }
    }
}

/// An animal (or a poultry wave) as exchanged with clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    #[serde(rename = "type")]
    pub animal_type: AnimalType,
    pub race: String,
    #[serde(rename = "sexe", default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Birth or arrival date (YYYY-MM-DD)
    #[serde(rename = "date_naissance")]
    pub birth_date: String,
    /// Weight in kilograms
    #[serde(rename = "poids")]
    pub weight: f64,
    #[serde(rename = "nom", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Head-count when the record tracks a poultry wave
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub head_count: Option<u32>,
    #[serde(rename = "statut")]
    pub status: AnimalStatus,
    #[serde(rename = "statut_reproduction", default)]
    pub reproduction_status: ReproductionStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAnimalRequest {
    #[serde(rename = "type")]
    pub animal_type: AnimalType,
    pub race: String,
    /// Free-text breed, used when `race` is "Autre"
    #[serde(default)]
    pub race_autre: Option<String>,
    #[serde(rename = "sexe", default)]
    pub sex: Option<Sex>,
    #[serde(rename = "date_naissance")]
    pub birth_date: String,
    #[serde(rename = "poids")]
    pub weight: f64,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "nombre", default)]
    pub head_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAnimalRequest {
    #[serde(rename = "type", default)]
    pub animal_type: Option<AnimalType>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub race_autre: Option<String>,
    #[serde(rename = "sexe", default)]
    pub sex: Option<Sex>,
    #[serde(rename = "date_naissance", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "poids", default)]
    pub weight: Option<f64>,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "nombre", default)]
    pub head_count: Option<u32>,
    #[serde(rename = "statut", default)]
    pub status: Option<AnimalStatus>,
    #[serde(rename = "statut_reproduction", default)]
    pub reproduction_status: Option<ReproductionStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellAnimalRequest {
    /// Sale price in FCFA; records a sale transaction when present
    #[serde(rename = "prix", default)]
    pub price: Option<f64>,
    /// Sale date (YYYY-MM-DD), today when absent
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalResponse {
    pub animal: Animal,
    pub success_message: String,
}

/// Server-side filters of `GET /api/animals`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalListQuery {
    #[serde(rename = "type", default)]
    pub animal_type: Option<String>,
    #[serde(rename = "statut", default)]
    pub status: Option<String>,
}

/// Filter and sort state of the herd view; values are kept raw so that
/// unknown entries can fall back to "no filter"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HerdViewQuery {
    #[serde(rename = "statut", default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub animal_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// One row of the herd view with its derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalView {
    pub animal: Animal,
    pub display_name: String,
    pub age_in_days: i64,
    pub age_label: String,
    pub category: Category,
    pub category_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerdView {
    pub animals: Vec<AnimalView>,
    pub available_categories: Vec<Category>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub value: Category,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableCategoriesQuery {
    #[serde(rename = "type", default)]
    pub animal_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalType {
    #[serde(rename = "vaccination")]
    Vaccination,
    #[serde(rename = "traitement")]
    Treatment,
    #[serde(rename = "visite")]
    Checkup,
    #[serde(rename = "chirurgie")]
    Surgery,
    #[serde(rename = "autre")]
    Other,
}

impl MedicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicalType::Vaccination => "vaccination",
            MedicalType::Treatment => "traitement",
            MedicalType::Checkup => "visite",
            MedicalType::Surgery => "chirurgie",
            MedicalType::Other => "autre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "vaccination" => Some(MedicalType::Vaccination),
            "traitement" => Some(MedicalType::Treatment),
            "visite" => Some(MedicalType::Checkup),
            "chirurgie" => Some(MedicalType::Surgery),
            "autre" => Some(MedicalType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: String,
    pub animal_id: String,
    #[serde(rename = "type")]
    pub medical_type: MedicalType,
    pub description: String,
    #[serde(rename = "veterinaire", default)]
    pub veterinarian: Option<String>,
    /// Cost in FCFA
    #[serde(rename = "cout", default)]
    pub cost: Option<f64>,
    /// Date of the intervention (YYYY-MM-DD)
    pub date: String,
    #[serde(rename = "prochaine_visite", default)]
    pub next_visit_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicalRecordRequest {
    pub animal_id: String,
    #[serde(rename = "type")]
    pub medical_type: MedicalType,
    pub description: String,
    #[serde(rename = "veterinaire", default)]
    pub veterinarian: Option<String>,
    #[serde(rename = "cout", default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "prochaine_visite", default)]
    pub next_visit_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproductionRecord {
    pub id: String,
    #[serde(rename = "femelle_id")]
    pub female_id: String,
    #[serde(default)]
    pub male_id: Option<String>,
    #[serde(rename = "date_saillie")]
    pub breeding_date: String,
    #[serde(rename = "date_mise_bas_prevue", default)]
    pub expected_birth_date: Option<String>,
    #[serde(rename = "date_mise_bas", default)]
    pub actual_birth_date: Option<String>,
    #[serde(rename = "nombre_petits", default)]
    pub offspring_count: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReproductionRequest {
    #[serde(rename = "femelle_id")]
    pub female_id: String,
    #[serde(default)]
    pub male_id: Option<String>,
    #[serde(rename = "date_saillie")]
    pub breeding_date: String,
    #[serde(rename = "date_mise_bas_prevue", default)]
    pub expected_birth_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBirthRequest {
    /// Actual birth date (YYYY-MM-DD), today when absent
    #[serde(rename = "date_mise_bas", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "nombre_petits")]
    pub offspring_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReproductionListQuery {
    #[serde(default)]
    pub animal_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "revenu")]
    Income,
    #[serde(rename = "depense")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "revenu",
            TransactionKind::Expense => "depense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "revenu" => Some(TransactionKind::Income),
            "depense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionCategory {
    #[serde(rename = "vente")]
    Sale,
    #[serde(rename = "achat")]
    Purchase,
    #[serde(rename = "alimentation")]
    Feed,
    #[serde(rename = "medical")]
    Medical,
    #[serde(rename = "autre")]
    Other,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Sale => "vente",
            TransactionCategory::Purchase => "achat",
            TransactionCategory::Feed => "alimentation",
            TransactionCategory::Medical => "medical",
            TransactionCategory::Other => "autre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "vente" => Some(TransactionCategory::Sale),
            "achat" => Some(TransactionCategory::Purchase),
            "alimentation" => Some(TransactionCategory::Feed),
            "medical" => Some(TransactionCategory::Medical),
            "autre" => Some(TransactionCategory::Other),
            _ => None,
        }
    }
}

/// A financial movement of the farm, optionally tied to an animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: String,
    #[serde(default)]
    pub animal_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "categorie")]
    pub category: TransactionCategory,
    /// Amount in FCFA, always positive; `kind` carries the direction
    #[serde(rename = "montant")]
    pub amount: f64,
    /// Date of the movement (YYYY-MM-DD)
    pub date: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub animal_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "categorie")]
    pub category: TransactionCategory,
    #[serde(rename = "montant")]
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListQuery {
    /// Inclusive lower bound (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(rename = "categorie")]
    pub category: TransactionCategory,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenus: f64,
    pub total_depenses: f64,
    pub benefice: f64,
    pub par_categorie: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "naissance")]
    Birth,
    #[serde(rename = "vente")]
    Sale,
    #[serde(rename = "medical")]
    Medical,
    #[serde(rename = "reproduction")]
    Reproduction,
    #[serde(rename = "alimentation")]
    Feeding,
    #[serde(rename = "autre")]
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Birth => "naissance",
            EventType::Sale => "vente",
            EventType::Medical => "medical",
            EventType::Reproduction => "reproduction",
            EventType::Feeding => "alimentation",
            EventType::Other => "autre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "naissance" => Some(EventType::Birth),
            "vente" => Some(EventType::Sale),
            "medical" => Some(EventType::Medical),
            "reproduction" => Some(EventType::Reproduction),
            "alimentation" => Some(EventType::Feeding),
            "autre" => Some(EventType::Other),
            _ => None,
        }
    }
}

/// Entry of the farm timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: String,
    #[serde(default)]
    pub animal_id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp
    pub date: String,
    #[serde(rename = "cout", default)]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHistoryEventRequest {
    #[serde(default)]
    pub animal_id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "cout", default)]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesStats {
    pub count: usize,
    pub males: usize,
    pub females: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub label: String,
    pub count: usize,
}

/// Dashboard figures; every count covers active animals only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmStats {
    pub total_livestock: usize,
    pub active_animals: usize,
    pub sold_animals: usize,
    pub poultry: SpeciesStats,
    pub pigs: SpeciesStats,
    pub males: usize,
    pub females: usize,
    pub categories: Vec<CategoryCount>,
    /// Estimated live value of the active herd in FCFA
    pub herd_value: f64,
    /// Revenue minus expenses in FCFA
    pub profitability: f64,
    /// Same figure formatted for display, e.g. "3504444 FCFA"
    pub profitability_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_wire_names() {
        let json = r#"{
            "id": "a1",
            "type": "porc",
            "race": "Duroc",
            "sexe": "F",
            "date_naissance": "2025-01-10",
            "poids": 80.5,
            "statut": "actif",
            "created_at": "2025-01-10T08:00:00+00:00",
            "updated_at": "2025-01-10T08:00:00+00:00"
        }"#;

        let animal: Animal = serde_json::from_str(json).unwrap();
        assert_eq!(animal.animal_type, AnimalType::Pig);
        assert_eq!(animal.sex, Some(Sex::Female));
        assert_eq!(animal.weight, 80.5);
        assert_eq!(animal.status, AnimalStatus::Active);
        assert_eq!(animal.reproduction_status, ReproductionStatus::Available);
        assert!(animal.name.is_none());

        let value = serde_json::to_value(&animal).unwrap();
        assert_eq!(value["type"], "porc");
        assert_eq!(value["date_naissance"], "2025-01-10");
        assert_eq!(value["statut_reproduction"], "disponible");
        assert!(value.get("nom").is_none());
    }

    #[test]
    fn test_unknown_animal_type_becomes_other() {
        let animal_type: AnimalType = serde_json::from_str(r#""lapin""#).unwrap();
        assert_eq!(animal_type, AnimalType::Other);
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(AnimalType::parse("poulet"), Some(AnimalType::Poultry));
        assert_eq!(AnimalType::parse(""), None);
        assert_eq!(AnimalType::parse("all"), None);
        assert_eq!(AnimalStatus::parse("vendu"), Some(AnimalStatus::Sold));
        assert_eq!(AnimalStatus::parse("all"), None);
        assert_eq!(SortKey::parse("weight_desc"), Some(SortKey::WeightDesc));
        assert_eq!(SortKey::parse("color"), None);
    }

    #[test]
    fn test_category_strings() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        assert_eq!(Category::parse("lapereau"), None);
        assert_eq!(Category::LayingHen.label(), "Poule pondeuse");
    }

    #[test]
    fn test_known_races() {
        assert!(AnimalType::Poultry.known_races().contains(&"Sussex"));
        assert!(AnimalType::Pig.known_races().contains(&"Large White"));
        assert!(AnimalType::Other.known_races().is_empty());
    }
}
