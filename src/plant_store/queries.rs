//! SQL text for plant reads and writes, plus the search matcher function.
//!
//! Every statement is a compile-time constant. Searching picks one of six
//! prepared texts by (field, language) instead of splicing a column name in.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use super::models::{Language, PlantDetails, SearchField};

pub(crate) const INSERT_PLANT: &str = "INSERT INTO plants \
    (plant_name_id, family_id, location_id, image_path, botanical_name, plant_date) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub(crate) const UPDATE_PLANT: &str = "UPDATE plants SET \
    plant_name_id = ?1, family_id = ?2, location_id = ?3, \
    image_path = ?4, botanical_name = ?5, plant_date = ?6 \
    WHERE plant_id = ?7";

pub(crate) const DELETE_PLANT: &str = "DELETE FROM plants WHERE plant_id = ?1";

pub(crate) const SELECT_ALL_PLANTS: &str = "SELECT plant_id, plant_name_id, family_id, \
    location_id, image_path, botanical_name, plant_date FROM plants ORDER BY plant_id";

pub(crate) const COUNT_PLANTS: &str = "SELECT COUNT(*) FROM plants";

pub(crate) const TRUNCATE_PLANTS: &str = "DELETE FROM plants";

macro_rules! plant_details_select {
    () => {
        "SELECT p.plant_id, n.name_en, n.name_ja, f.name_en, f.name_ja, \
         l.name_en, l.name_ja, p.botanical_name, p.image_path, p.plant_date \
         FROM plants p \
         JOIN plant_names n ON n.id = p.plant_name_id \
         JOIN families f ON f.id = p.family_id \
         JOIN locations l ON l.id = p.location_id"
    };
}

pub(crate) const SELECT_PLANT_DETAILS: &str =
    concat!(plant_details_select!(), " WHERE p.plant_id = ?1");

/// Both bounds inclusive, NULL meaning unbounded.
pub(crate) const LIST_PLANTS_BY_DATE: &str = concat!(
    plant_details_select!(),
    " WHERE (?1 IS NULL OR p.plant_date >= ?1) AND (?2 IS NULL OR p.plant_date <= ?2)",
    " ORDER BY p.plant_date DESC, p.plant_id DESC"
);

macro_rules! search_by {
    ($column:literal) => {
        concat!(
            plant_details_select!(),
            " WHERE casefold_contains(",
            $column,
            ", ?1) ORDER BY p.plant_id"
        )
    };
}

const SEARCH_NAME_EN: &str = search_by!("n.name_en");
const SEARCH_NAME_JA: &str = search_by!("n.name_ja");
const SEARCH_FAMILY_EN: &str = search_by!("f.name_en");
const SEARCH_FAMILY_JA: &str = search_by!("f.name_ja");
const SEARCH_LOCATION_EN: &str = search_by!("l.name_en");
const SEARCH_LOCATION_JA: &str = search_by!("l.name_ja");

pub(crate) fn search_sql(field: SearchField, lang: Language) -> &'static str {
    match (field, lang) {
        (SearchField::Name, Language::En) => SEARCH_NAME_EN,
        (SearchField::Name, Language::Ja) => SEARCH_NAME_JA,
        (SearchField::Family, Language::En) => SEARCH_FAMILY_EN,
        (SearchField::Family, Language::Ja) => SEARCH_FAMILY_JA,
        (SearchField::Location, Language::En) => SEARCH_LOCATION_EN,
        (SearchField::Location, Language::Ja) => SEARCH_LOCATION_JA,
    }
}

pub(crate) fn parse_plant_details(row: &rusqlite::Row) -> rusqlite::Result<PlantDetails> {
    Ok(PlantDetails {
        plant_id: row.get(0)?,
        plant_name_en: row.get(1)?,
        plant_name_ja: row.get(2)?,
        family_name_en: row.get(3)?,
        family_name_ja: row.get(4)?,
        location_name_en: row.get(5)?,
        location_name_ja: row.get(6)?,
        botanical_name: row.get(7)?,
        image_path: row.get(8)?,
        plant_date: row.get(9)?,
    })
}

/// Case-insensitive substring test over full Unicode lowercase mapping.
pub fn casefold_contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Register `casefold_contains(haystack, needle)` on the connection.
pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold_contains",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack = ctx.get::<Option<String>>(0)?;
            let needle = ctx.get::<Option<String>>(1)?.unwrap_or_default();
            Ok(haystack.is_some_and(|h| casefold_contains(&h, &needle)))
        },
    )
}
