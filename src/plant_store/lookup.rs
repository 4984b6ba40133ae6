//! Get-or-create resolution of bilingual name pairs.
//!
//! One procedure serves the three lookup tables; only the SQL differs and it
//! is generated from the table name at compile time.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::error::{is_unique_violation, PlantStoreError, PlantStoreResult};
use super::models::{LookupEntry, LookupKind};
use super::validation::{validate_id, validate_non_empty};

pub(crate) struct LookupTable {
    find_sql: &'static str,
    insert_sql: &'static str,
    get_sql: &'static str,
    list_sql: &'static str,
}

macro_rules! lookup_table {
    ($table:literal) => {
        LookupTable {
            find_sql: concat!(
                "SELECT id FROM ",
                $table,
                " WHERE name_en = ?1 AND name_ja = ?2"
            ),
            insert_sql: concat!("INSERT INTO ", $table, " (name_en, name_ja) VALUES (?1, ?2)"),
            get_sql: concat!("SELECT id, name_en, name_ja FROM ", $table, " WHERE id = ?1"),
            list_sql: concat!("SELECT id, name_en, name_ja FROM ", $table, " ORDER BY id"),
        }
    };
}

const PLANT_NAMES: LookupTable = lookup_table!("plant_names");
const FAMILIES: LookupTable = lookup_table!("families");
const LOCATIONS: LookupTable = lookup_table!("locations");

fn table_for(kind: LookupKind) -> &'static LookupTable {
    match kind {
        LookupKind::PlantName => &PLANT_NAMES,
        LookupKind::Family => &FAMILIES,
        LookupKind::Location => &LOCATIONS,
    }
}

fn parse_entry(row: &rusqlite::Row) -> rusqlite::Result<LookupEntry> {
    Ok(LookupEntry {
        id: row.get(0)?,
        name_en: row.get(1)?,
        name_ja: row.get(2)?,
    })
}

/// Return the id of the (name_en, name_ja) row, inserting it if absent.
pub(crate) fn get_or_create(
    conn: &Connection,
    kind: LookupKind,
    name_en: &str,
    name_ja: &str,
) -> PlantStoreResult<i64> {
    let (en_field, ja_field) = kind.name_fields();
    validate_non_empty(name_en, en_field)?;
    validate_non_empty(name_ja, ja_field)?;

    let table = table_for(kind);
    let existing: Option<i64> = conn
        .prepare_cached(table.find_sql)?
        .query_row(params![name_en, name_ja], |row| row.get(0))
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    match conn
        .prepare_cached(table.insert_sql)?
        .execute(params![name_en, name_ja])
    {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            debug!("Created {} entry {} ('{}', '{}')", kind, id, name_en, name_ja);
            Ok(id)
        }
        Err(err) => Err(translate_insert_error(err, kind, name_en, name_ja)),
    }
}

/// A unique violation on insert means the pair already exists.
fn translate_insert_error(
    err: rusqlite::Error,
    kind: LookupKind,
    name_en: &str,
    name_ja: &str,
) -> PlantStoreError {
    if is_unique_violation(&err) {
        PlantStoreError::DuplicateLookupEntry {
            kind,
            name_en: name_en.to_string(),
            name_ja: name_ja.to_string(),
        }
    } else {
        err.into()
    }
}

pub(crate) fn find_entry(
    conn: &Connection,
    kind: LookupKind,
    id: i64,
) -> PlantStoreResult<Option<LookupEntry>> {
    Ok(conn
        .prepare_cached(table_for(kind).get_sql)?
        .query_row(params![id], parse_entry)
        .optional()?)
}

pub(crate) fn get_entry(
    conn: &Connection,
    kind: LookupKind,
    id: i64,
) -> PlantStoreResult<LookupEntry> {
    validate_id(id, kind.id_field())?;
    find_entry(conn, kind, id)?.ok_or(PlantStoreError::LookupNotFound { kind, id })
}

pub(crate) fn list_entries(
    conn: &Connection,
    kind: LookupKind,
) -> PlantStoreResult<Vec<LookupEntry>> {
    let mut stmt = conn.prepare_cached(table_for(kind).list_sql)?;
    let entries = stmt
        .query_map([], parse_entry)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant_store::schema::PLANT_VERSIONED_SCHEMAS;
    use crate::sqlite_persistence::migrate_if_needed;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_if_needed(&mut conn, PLANT_VERSIONED_SCHEMAS, "plant").unwrap();
        conn
    }

    #[test]
    fn resolving_twice_returns_the_same_id() {
        let conn = setup();
        for kind in LookupKind::ALL {
            let first = get_or_create(&conn, kind, "Sunflower", "ヒマワリ").unwrap();
            let second = get_or_create(&conn, kind, "Sunflower", "ヒマワリ").unwrap();
            assert_eq!(first, second);
            assert_eq!(list_entries(&conn, kind).unwrap().len(), 1);
        }
    }

    #[test]
    fn pair_differing_in_one_language_is_a_new_entry() {
        let conn = setup();
        let a = get_or_create(&conn, LookupKind::Family, "Asteraceae", "キク科").unwrap();
        let b = get_or_create(&conn, LookupKind::Family, "Asteraceae", "ヒマワリ属").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unique_violation_on_insert_is_a_duplicate_entry() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: families.name_en, families.name_ja".to_string()),
        );
        let err = translate_insert_error(err, LookupKind::Family, "Asteraceae", "キク科");
        assert!(matches!(
            err,
            PlantStoreError::DuplicateLookupEntry {
                kind: LookupKind::Family,
                ref name_en,
                ref name_ja,
            } if name_en == "Asteraceae" && name_ja == "キク科"
        ));
        assert!(err.is_conflict());

        let err = translate_insert_error(
            rusqlite::Error::QueryReturnedNoRows,
            LookupKind::Location,
            "Balcony",
            "ベランダ",
        );
        assert!(matches!(err, PlantStoreError::Database(_)));
    }

    #[test]
    fn kinds_do_not_share_rows() {
        let conn = setup();
        get_or_create(&conn, LookupKind::Location, "Kyoto", "京都").unwrap();
        assert!(list_entries(&conn, LookupKind::PlantName).unwrap().is_empty());
        assert!(list_entries(&conn, LookupKind::Family).unwrap().is_empty());
    }

    #[test]
    fn empty_names_are_rejected_before_any_write() {
        let conn = setup();
        let err = get_or_create(&conn, LookupKind::Location, "Kyoto", "  ").unwrap_err();
        assert!(matches!(
            err,
            PlantStoreError::Validation(crate::plant_store::ValidationError::EmptyField {
                field: "location_name_ja"
            })
        ));
        assert!(list_entries(&conn, LookupKind::Location).unwrap().is_empty());
    }

    #[test]
    fn get_entry_reports_missing_id() {
        let conn = setup();
        let id = get_or_create(&conn, LookupKind::PlantName, "Tulip", "チューリップ").unwrap();
        let entry = get_entry(&conn, LookupKind::PlantName, id).unwrap();
        assert_eq!(entry.name_ja, "チューリップ");

        assert!(matches!(
            get_entry(&conn, LookupKind::PlantName, id + 1),
            Err(PlantStoreError::LookupNotFound {
                kind: LookupKind::PlantName,
                ..
            })
        ));
        assert!(get_entry(&conn, LookupKind::PlantName, 0)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn pair_is_unique_in_the_table() {
        let conn = setup();
        get_or_create(&conn, LookupKind::Family, "Rosaceae", "バラ科").unwrap();

        let err = conn
            .execute(FAMILIES.insert_sql, params!["Rosaceae", "バラ科"])
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }
}
