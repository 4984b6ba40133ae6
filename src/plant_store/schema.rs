//! SQLite schema of the plant catalog database.
//!
//! Three bilingual lookup tables and the `plants` table referencing them.
//! A lookup row is unique on its (name_en, name_ja) pair; the same English
//! name may appear twice with different Japanese names.

use anyhow::Result;
use rusqlite::Connection;

use crate::sqlite_column;
use crate::sqlite_persistence::{
    create_index, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

// =============================================================================
// Lookup Tables
// =============================================================================

const PLANT_NAMES_TABLE: Table = Table {
    name: "plant_names",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name_en", &SqlType::Text, non_null = true),
        sqlite_column!("name_ja", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name_en", "name_ja"]],
};

const FAMILIES_TABLE: Table = Table {
    name: "families",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name_en", &SqlType::Text, non_null = true),
        sqlite_column!("name_ja", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name_en", "name_ja"]],
};

const LOCATIONS_TABLE: Table = Table {
    name: "locations",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name_en", &SqlType::Text, non_null = true),
        sqlite_column!("name_ja", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name_en", "name_ja"]],
};

// =============================================================================
// Plants
// =============================================================================

const PLANT_NAME_FK: ForeignKey = ForeignKey {
    foreign_table: "plant_names",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const FAMILY_FK: ForeignKey = ForeignKey {
    foreign_table: "families",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const LOCATION_FK: ForeignKey = ForeignKey {
    foreign_table: "locations",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const PLANTS_COLUMNS: &[Column] = &[
    sqlite_column!("plant_id", &SqlType::Integer, is_primary_key = true),
    sqlite_column!(
        "plant_name_id",
        &SqlType::Integer,
        non_null = true,
        foreign_key = Some(&PLANT_NAME_FK)
    ),
    sqlite_column!(
        "family_id",
        &SqlType::Integer,
        non_null = true,
        foreign_key = Some(&FAMILY_FK)
    ),
    sqlite_column!(
        "location_id",
        &SqlType::Integer,
        non_null = true,
        foreign_key = Some(&LOCATION_FK)
    ),
    sqlite_column!("image_path", &SqlType::Text, non_null = true, is_unique = true),
    sqlite_column!("botanical_name", &SqlType::Text, non_null = true, is_unique = true),
    sqlite_column!("plant_date", &SqlType::Text, non_null = true), // 'YYYY-MM-DD'
];

const PLANTS_TABLE_V0: Table = Table {
    name: "plants",
    columns: PLANTS_COLUMNS,
    indices: &[
        ("idx_plants_plant_name", "plant_name_id"),
        ("idx_plants_family", "family_id"),
        ("idx_plants_location", "location_id"),
    ],
    unique_constraints: &[],
};

/// V1: date index for the sorted listing.
const PLANTS_TABLE_V1: Table = Table {
    name: "plants",
    columns: PLANTS_COLUMNS,
    indices: &[
        ("idx_plants_plant_name", "plant_name_id"),
        ("idx_plants_family", "family_id"),
        ("idx_plants_location", "location_id"),
        ("idx_plants_plant_date", "plant_date"),
    ],
    unique_constraints: &[],
};

fn migrate_v0_to_v1(conn: &Connection) -> Result<()> {
    create_index(conn, "plants", "idx_plants_plant_date", "plant_date")
}

pub const PLANT_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 0,
        tables: &[PLANT_NAMES_TABLE, FAMILIES_TABLE, LOCATIONS_TABLE, PLANTS_TABLE_V0],
        migration: None,
    },
    VersionedSchema {
        version: 1,
        tables: &[PLANT_NAMES_TABLE, FAMILIES_TABLE, LOCATIONS_TABLE, PLANTS_TABLE_V1],
        migration: Some(migrate_v0_to_v1),
    },
];
