//! Test fixture creation for the plant database and upload directory

use super::constants::*;
use anyhow::Result;
use chrono::NaiveDate;
use plant_catalog_server::plant_store::{NewPlant, SqlitePlantStore};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct SeedPlant {
    name: (&'static str, &'static str),
    family: (&'static str, &'static str),
    location: (&'static str, &'static str),
    botanical_name: &'static str,
    image_path: &'static str,
    date: &'static str,
}

const SEED_PLANTS: [SeedPlant; SEEDED_PLANT_COUNT] = [
    SeedPlant {
        name: (TULIP_NAME_EN, TULIP_NAME_JA),
        family: (LILIACEAE_EN, LILIACEAE_JA),
        location: (FRONT_GARDEN_EN, FRONT_GARDEN_JA),
        botanical_name: TULIP_BOTANICAL,
        image_path: TULIP_IMAGE,
        date: TULIP_DATE,
    },
    SeedPlant {
        name: (ROSE_NAME_EN, ROSE_NAME_JA),
        family: (ROSACEAE_EN, ROSACEAE_JA),
        location: (BALCONY_EN, BALCONY_JA),
        botanical_name: ROSE_BOTANICAL,
        image_path: ROSE_IMAGE,
        date: ROSE_DATE,
    },
    SeedPlant {
        name: (SUNFLOWER_NAME_EN, SUNFLOWER_NAME_JA),
        family: (ASTERACEAE_EN, ASTERACEAE_JA),
        location: (FRONT_GARDEN_EN, FRONT_GARDEN_JA),
        botanical_name: SUNFLOWER_BOTANICAL,
        image_path: SUNFLOWER_IMAGE,
        date: SUNFLOWER_DATE,
    },
];

/// Creates a temporary plant database holding the three seed plants, and
/// an upload directory holding the tulip image.
/// Returns (temp_dir, db_path, upload_dir)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = TempDir::new()?;

    let upload_dir = dir.path().join("uploads");
    fs::create_dir_all(&upload_dir)?;
    fs::write(upload_dir.join(TULIP_IMAGE), TEST_IMAGE_BYTES)?;

    let db_path = dir.path().join("plants.db");
    let store = SqlitePlantStore::new(&db_path)?;
    for seed in &SEED_PLANTS {
        let plant = NewPlant {
            plant_name_id: store.get_or_create_plant_name(seed.name.0, seed.name.1)?,
            family_id: store.get_or_create_family(seed.family.0, seed.family.1)?,
            location_id: store.get_or_create_location(seed.location.0, seed.location.1)?,
            image_path: seed.image_path.to_string(),
            botanical_name: seed.botanical_name.to_string(),
            plant_date: Some(NaiveDate::parse_from_str(seed.date, "%Y-%m-%d")?),
        };
        store.insert_plant(&plant)?;
    }
    store.close()?;

    Ok((dir, db_path, upload_dir))
}

/// JSON body for POST/PUT /plants. Family and location reuse seeded entries.
#[allow(dead_code)]
pub fn plant_body(
    name_en: &str,
    name_ja: &str,
    botanical_name: &str,
    image_path: &str,
    plant_date: Option<&str>,
) -> Value {
    let mut body = json!({
        "plant_name_en": name_en,
        "plant_name_ja": name_ja,
        "family_name_en": ROSACEAE_EN,
        "family_name_ja": ROSACEAE_JA,
        "location_name_en": BALCONY_EN,
        "location_name_ja": BALCONY_JA,
        "botanical_name": botanical_name,
        "image_path": image_path,
    });
    if let Some(date) = plant_date {
        body["plant_date"] = json!(date);
    }
    body
}
