//! SQLite-backed plant catalog store.
//!
//! A store owns exactly one connection and runs every call on it in order.
//! Single operations are atomic on their own; callers chaining several of
//! them (resolve lookups, then insert) wrap the chain in `with_transaction`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

use super::error::{
    is_foreign_key_violation, unique_violation, PlantStoreError, PlantStoreResult, UniqueViolation,
};
use super::lookup;
use super::models::{
    Language, LookupEntry, LookupKind, NewPlant, Plant, PlantDetails, SearchField,
};
use super::queries::{self, parse_plant_details};
use super::schema::PLANT_VERSIONED_SCHEMAS;
use super::validation::{
    validate_id, validate_language, validate_new_plant, validate_search_field,
};
use crate::sqlite_persistence::{migrate_if_needed, BASE_DB_VERSION};

/// The calendar date used when a plant is written without one.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct SqlitePlantStore {
    conn: Connection,
}

impl SqlitePlantStore {
    /// Open (creating if needed) the database file and bring its schema up to date.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open plant database at {:?}", db_path))?;

        let store = Self::from_connection(conn)?;
        store.conn.pragma_update(None, "journal_mode", "WAL")?;

        info!(
            "Opened plant catalog at {:?}: {} plants",
            db_path,
            store.count_plants()?
        );
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    /// Take ownership of an already opened connection.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        queries::register_functions(&conn).context("Failed to register SQL functions")?;
        migrate_if_needed(&mut conn, PLANT_VERSIONED_SCHEMAS, "plant")?;
        Ok(SqlitePlantStore { conn })
    }

    /// Close the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("Failed to close plant database")
    }

    /// Schema version the database is currently at.
    pub fn schema_version(&self) -> Result<usize> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok((user_version - BASE_DB_VERSION as i64).max(0) as usize)
    }

    /// Run `f` inside one transaction, committed only if `f` succeeds.
    ///
    /// The transaction is rolled back when dropped, so any error or panic
    /// inside `f` leaves the database untouched.
    pub fn with_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<rusqlite::Error>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get_or_create(
        &self,
        kind: LookupKind,
        name_en: &str,
        name_ja: &str,
    ) -> PlantStoreResult<i64> {
        lookup::get_or_create(&self.conn, kind, name_en, name_ja)
    }

    pub fn get_or_create_plant_name(&self, name_en: &str, name_ja: &str) -> PlantStoreResult<i64> {
        self.get_or_create(LookupKind::PlantName, name_en, name_ja)
    }

    pub fn get_or_create_family(&self, name_en: &str, name_ja: &str) -> PlantStoreResult<i64> {
        self.get_or_create(LookupKind::Family, name_en, name_ja)
    }

    pub fn get_or_create_location(&self, name_en: &str, name_ja: &str) -> PlantStoreResult<i64> {
        self.get_or_create(LookupKind::Location, name_en, name_ja)
    }

    pub fn get_lookup(&self, kind: LookupKind, id: i64) -> PlantStoreResult<LookupEntry> {
        lookup::get_entry(&self.conn, kind, id)
    }

    pub fn list_lookups(&self, kind: LookupKind) -> PlantStoreResult<Vec<LookupEntry>> {
        lookup::list_entries(&self.conn, kind)
    }

    // =========================================================================
    // Plant Writes
    // =========================================================================

    /// Insert a plant, returning its new id.
    pub fn insert_plant(&self, plant: &NewPlant) -> PlantStoreResult<i64> {
        validate_new_plant(plant)?;
        let plant_date = plant.plant_date.unwrap_or_else(today);

        let result = self.conn.prepare_cached(queries::INSERT_PLANT)?.execute(params![
            plant.plant_name_id,
            plant.family_id,
            plant.location_id,
            plant.image_path,
            plant.botanical_name,
            plant_date,
        ]);
        match result {
            Ok(_) => {
                let plant_id = self.conn.last_insert_rowid();
                debug!("Inserted plant {} ({})", plant_id, plant.botanical_name);
                Ok(plant_id)
            }
            Err(err) => Err(self.translate_write_error(err, plant)),
        }
    }

    /// Replace every column of an existing plant.
    pub fn update_plant(&self, plant_id: i64, plant: &NewPlant) -> PlantStoreResult<()> {
        validate_id(plant_id, "plant_id")?;
        validate_new_plant(plant)?;
        let plant_date = plant.plant_date.unwrap_or_else(today);

        let result = self.conn.prepare_cached(queries::UPDATE_PLANT)?.execute(params![
            plant.plant_name_id,
            plant.family_id,
            plant.location_id,
            plant.image_path,
            plant.botanical_name,
            plant_date,
            plant_id,
        ]);
        match result {
            Ok(0) => Err(PlantStoreError::PlantNotFound(plant_id)),
            Ok(_) => {
                debug!("Updated plant {}", plant_id);
                Ok(())
            }
            Err(err) => Err(self.translate_write_error(err, plant)),
        }
    }

    pub fn delete_plant(&self, plant_id: i64) -> PlantStoreResult<()> {
        validate_id(plant_id, "plant_id")?;
        let deleted = self
            .conn
            .prepare_cached(queries::DELETE_PLANT)?
            .execute(params![plant_id])?;
        if deleted == 0 {
            return Err(PlantStoreError::PlantNotFound(plant_id));
        }
        debug!("Deleted plant {}", plant_id);
        Ok(())
    }

    /// Delete every plant, leaving lookup tables intact. Returns the number removed.
    pub fn truncate_plants(&self) -> PlantStoreResult<usize> {
        let deleted = self.conn.execute(queries::TRUNCATE_PLANTS, [])?;
        info!("Truncated plants table, {} rows removed", deleted);
        Ok(deleted)
    }

    fn translate_write_error(&self, err: rusqlite::Error, plant: &NewPlant) -> PlantStoreError {
        if let Some(violation) = unique_violation(&err) {
            return duplicate_plant_error(&violation, plant);
        }
        if is_foreign_key_violation(&err) {
            return match self.find_missing_reference(plant) {
                Ok(Some((kind, id))) => PlantStoreError::LookupNotFound { kind, id },
                Ok(None) => PlantStoreError::MissingReference,
                Err(lookup_err) => lookup_err,
            };
        }
        err.into()
    }

    /// First lookup id of `plant` that has no row, if any.
    fn find_missing_reference(
        &self,
        plant: &NewPlant,
    ) -> PlantStoreResult<Option<(LookupKind, i64)>> {
        let references = [
            (LookupKind::PlantName, plant.plant_name_id),
            (LookupKind::Family, plant.family_id),
            (LookupKind::Location, plant.location_id),
        ];
        for (kind, id) in references {
            if lookup::find_entry(&self.conn, kind, id)?.is_none() {
                return Ok(Some((kind, id)));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Plant Reads
    // =========================================================================

    pub fn get_all_plants(&self) -> PlantStoreResult<Vec<Plant>> {
        let mut stmt = self.conn.prepare_cached(queries::SELECT_ALL_PLANTS)?;
        let plants = stmt
            .query_map([], |row| {
                Ok(Plant {
                    plant_id: row.get(0)?,
                    plant_name_id: row.get(1)?,
                    family_id: row.get(2)?,
                    location_id: row.get(3)?,
                    image_path: row.get(4)?,
                    botanical_name: row.get(5)?,
                    plant_date: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(plants)
    }

    pub fn count_plants(&self) -> PlantStoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row(queries::COUNT_PLANTS, [], |r| r.get(0))?;
        Ok(count as usize)
    }

    pub fn get_plant_details(&self, plant_id: i64) -> PlantStoreResult<PlantDetails> {
        validate_id(plant_id, "plant_id")?;
        self.conn
            .prepare_cached(queries::SELECT_PLANT_DETAILS)?
            .query_row(params![plant_id], parse_plant_details)
            .optional()?
            .ok_or(PlantStoreError::PlantNotFound(plant_id))
    }

    /// Plants dated within `[start, end]`, most recent first. A missing bound is open.
    pub fn list_plants_by_date(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> PlantStoreResult<Vec<PlantDetails>> {
        let mut stmt = self.conn.prepare_cached(queries::LIST_PLANTS_BY_DATE)?;
        let plants = stmt
            .query_map(params![start, end], parse_plant_details)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(plants)
    }

    /// Search with raw `field`/`lang` arguments, both validated before querying.
    pub fn search_plants(
        &self,
        query: &str,
        field: &str,
        lang: &str,
    ) -> PlantStoreResult<Vec<PlantDetails>> {
        let field = validate_search_field(field)?;
        let lang = validate_language(lang)?;
        self.search_plants_by(query, field, lang)
    }

    /// Case-insensitive substring search on one language of one joined attribute.
    pub fn search_plants_by(
        &self,
        query: &str,
        field: SearchField,
        lang: Language,
    ) -> PlantStoreResult<Vec<PlantDetails>> {
        let mut stmt = self.conn.prepare_cached(queries::search_sql(field, lang))?;
        let plants = stmt
            .query_map(params![query], parse_plant_details)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(plants)
    }
}

/// Map a unique violation on `plants` to the error naming the clashing value.
fn duplicate_plant_error(violation: &UniqueViolation, plant: &NewPlant) -> PlantStoreError {
    if violation.is_single_column("plants", "botanical_name") {
        PlantStoreError::DuplicateBotanicalName(plant.botanical_name.clone())
    } else if violation.is_single_column("plants", "image_path") {
        PlantStoreError::DuplicateImagePath(plant.image_path.clone())
    } else {
        PlantStoreError::DuplicatePlantConstraint {
            constraint: violation.describe(),
        }
    }
}
