//! Argument validation for plant store operations.
//!
//! Every validator is pure and runs before the store is touched.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::models::{Language, NewPlant, SearchField};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates are stored as text, so only four-digit years keep lexical and
/// chronological order in agreement.
const MAX_YEAR: i32 = 9999;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    NonPositiveId { field: &'static str, value: i64 },
    NotAnInteger { field: &'static str, value: String },
    InvalidDate { field: &'static str, value: String },
    InvalidLanguage(String),
    InvalidSearchField(String),
    InvalidLookupKind(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' must be a non-empty string", field)
            }
            ValidationError::NonPositiveId { field, value } => {
                write!(f, "Field '{}' must be a positive integer, got {}", field, value)
            }
            ValidationError::NotAnInteger { field, value } => {
                write!(f, "Field '{}' must be an integer, got '{}'", field, value)
            }
            ValidationError::InvalidDate { field, value } => {
                write!(f, "Field '{}' must be a YYYY-MM-DD date, got '{}'", field, value)
            }
            ValidationError::InvalidLanguage(lang) => {
                write!(f, "Invalid language '{}', expected 'en' or 'ja'", lang)
            }
            ValidationError::InvalidSearchField(field) => write!(
                f,
                "Invalid search field '{}', expected 'name', 'family' or 'location'",
                field
            ),
            ValidationError::InvalidLookupKind(kind) => write!(
                f,
                "Invalid lookup kind '{}', expected 'names', 'families' or 'locations'",
                kind
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_id(value: i64, field: &'static str) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveId { field, value });
    }
    Ok(())
}

/// Parse a textual id, as found in URLs and CLI arguments, and validate it.
pub fn parse_id(raw: &str, field: &'static str) -> ValidationResult<i64> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: raw.to_string(),
        })?;
    validate_id(value, field)?;
    Ok(value)
}

pub fn validate_non_empty(value: &str, field: &'static str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// An absent or blank date is `None`; anything else must be a calendar date.
pub fn validate_optional_date(
    value: Option<&str>,
    field: &'static str,
) -> ValidationResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .filter(is_storable_date)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidDate {
                field,
                value: raw.to_string(),
            }),
    }
}

fn is_storable_date(date: &NaiveDate) -> bool {
    (0..=MAX_YEAR).contains(&date.year())
}

pub fn validate_language(value: &str) -> ValidationResult<Language> {
    value.parse()
}

pub fn validate_search_field(value: &str) -> ValidationResult<SearchField> {
    value.parse()
}

/// Validate the arguments of an insert or update.
pub fn validate_new_plant(plant: &NewPlant) -> ValidationResult<()> {
    validate_id(plant.plant_name_id, "plant_name_id")?;
    validate_id(plant.family_id, "family_id")?;
    validate_id(plant.location_id, "location_id")?;
    validate_non_empty(&plant.image_path, "image_path")?;
    validate_non_empty(&plant.botanical_name, "botanical_name")?;
    if let Some(date) = plant.plant_date.filter(|d| !is_storable_date(d)) {
        return Err(ValidationError::InvalidDate {
            field: "plant_date",
            value: date.format(DATE_FORMAT).to_string(),
        });
    }
    Ok(())
}
