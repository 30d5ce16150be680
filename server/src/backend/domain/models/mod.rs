//! Domain models. Dates are chrono types here; the shared DTOs carry them
//! as strings and the REST mappers convert between the two.

pub mod animal;
pub mod finance;
pub mod history;
pub mod medical;
pub mod reproduction;

use anyhow::Result;
use chrono::NaiveDate;

use crate::backend::domain::DomainError;

/// Wire format of calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a YYYY-MM-DD date, reporting `field` in the validation message
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::validation(format!("{} must be a valid YYYY-MM-DD date", field)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Trim an optional free-text field, treating blank input as absent
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
