//! Plant catalog models.
//!
//! `Plant` mirrors a row of the `plants` table with raw lookup ids, while
//! `PlantDetails` is the joined shape with every bilingual name resolved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::ValidationError;

// =============================================================================
// Enumerations
// =============================================================================

/// Language of a bilingual column pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ja,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            other => Err(ValidationError::InvalidLanguage(other.to_string())),
        }
    }
}

/// Joined attribute a search matches against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Family,
    Location,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Family => "family",
            SearchField::Location => "location",
        }
    }
}

impl FromStr for SearchField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchField::Name),
            "family" => Ok(SearchField::Family),
            "location" => Ok(SearchField::Location),
            other => Err(ValidationError::InvalidSearchField(other.to_string())),
        }
    }
}

/// One of the three bilingual reference tables a plant points to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    PlantName,
    Family,
    Location,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [
        LookupKind::PlantName,
        LookupKind::Family,
        LookupKind::Location,
    ];

    /// Name used for the kind in URLs and on the command line.
    pub fn collection_name(&self) -> &'static str {
        match self {
            LookupKind::PlantName => "names",
            LookupKind::Family => "families",
            LookupKind::Location => "locations",
        }
    }

    /// Field names reported by validation for the (English, Japanese) pair.
    pub fn name_fields(&self) -> (&'static str, &'static str) {
        match self {
            LookupKind::PlantName => ("plant_name_en", "plant_name_ja"),
            LookupKind::Family => ("family_name_en", "family_name_ja"),
            LookupKind::Location => ("location_name_en", "location_name_ja"),
        }
    }

    /// Name of the plant column referencing this kind.
    pub fn id_field(&self) -> &'static str {
        match self {
            LookupKind::PlantName => "plant_name_id",
            LookupKind::Family => "family_id",
            LookupKind::Location => "location_id",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LookupKind::PlantName => "Plant name",
            LookupKind::Family => "Family",
            LookupKind::Location => "Location",
        };
        f.write_str(label)
    }
}

impl FromStr for LookupKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupKind::ALL
            .into_iter()
            .find(|kind| kind.collection_name() == s)
            .ok_or_else(|| ValidationError::InvalidLookupKind(s.to_string()))
    }
}

// =============================================================================
// Records
// =============================================================================

/// A row of one of the lookup tables.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupEntry {
    pub id: i64,
    pub name_en: String,
    pub name_ja: String,
}

/// Arguments of an insert or a full-row update.
///
/// A `None` date is replaced by today's date when written.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPlant {
    pub plant_name_id: i64,
    pub family_id: i64,
    pub location_id: i64,
    pub image_path: String,
    pub botanical_name: String,
    pub plant_date: Option<NaiveDate>,
}

/// Flat plant row, lookups unresolved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plant {
    pub plant_id: i64,
    pub plant_name_id: i64,
    pub family_id: i64,
    pub location_id: i64,
    pub image_path: String,
    pub botanical_name: String,
    pub plant_date: NaiveDate,
}

/// Plant joined with its name, family and location in both languages.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantDetails {
    pub plant_id: i64,
    pub plant_name_en: String,
    pub plant_name_ja: String,
    pub family_name_en: String,
    pub family_name_ja: String,
    pub location_name_en: String,
    pub location_name_ja: String,
    pub botanical_name: String,
    pub image_path: String,
    pub plant_date: NaiveDate,
}

impl PlantDetails {
    pub fn name(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.plant_name_en,
            Language::Ja => &self.plant_name_ja,
        }
    }
}
