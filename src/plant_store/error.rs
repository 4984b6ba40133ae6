//! Typed failures of the plant store and translation of SQLite constraint errors.

use rusqlite::ffi;
use thiserror::Error;

use super::models::LookupKind;
use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum PlantStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Plant with id {0} not found")]
    PlantNotFound(i64),

    #[error("{kind} with id {id} not found")]
    LookupNotFound { kind: LookupKind, id: i64 },

    #[error("A plant with botanical name '{0}' already exists")]
    DuplicateBotanicalName(String),

    #[error("A plant with image path '{0}' already exists")]
    DuplicateImagePath(String),

    #[error("Plant violates unique constraint on {constraint}")]
    DuplicatePlantConstraint { constraint: String },

    #[error("{kind} entry ('{name_en}', '{name_ja}') already exists")]
    DuplicateLookupEntry {
        kind: LookupKind,
        name_en: String,
        name_ja: String,
    },

    #[error("Plant references a lookup entry that does not exist")]
    MissingReference,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl PlantStoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PlantStoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlantStoreError::PlantNotFound(_) | PlantStoreError::LookupNotFound { .. }
        )
    }

    /// Write rejected because of existing data.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            PlantStoreError::DuplicateBotanicalName(_)
                | PlantStoreError::DuplicateImagePath(_)
                | PlantStoreError::DuplicatePlantConstraint { .. }
                | PlantStoreError::DuplicateLookupEntry { .. }
                | PlantStoreError::MissingReference
        )
    }
}

pub type PlantStoreResult<T> = Result<T, PlantStoreError>;

/// Columns named by a failed UNIQUE constraint.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct UniqueViolation {
    pub table: String,
    pub columns: Vec<String>,
}

impl UniqueViolation {
    pub fn is_single_column(&self, table: &str, column: &str) -> bool {
        self.table == table && self.columns.len() == 1 && self.columns[0] == column
    }

    pub fn describe(&self) -> String {
        format!("{}({})", self.table, self.columns.join(", "))
    }
}

fn extended_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.extended_code),
        _ => None,
    }
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        extended_code(err),
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE) | Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    extended_code(err) == Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

/// Structured detail of a unique violation, `None` for any other error.
///
/// When SQLite's message cannot be parsed the violation is still reported,
/// with the raw message as table and no columns.
pub(crate) fn unique_violation(err: &rusqlite::Error) -> Option<UniqueViolation> {
    if !is_unique_violation(err) {
        return None;
    }
    let message = match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message.as_str(),
        _ => "",
    };
    Some(parse_unique_message(message).unwrap_or_else(|| UniqueViolation {
        table: message.to_string(),
        columns: vec![],
    }))
}

/// Parse "UNIQUE constraint failed: table.col_a, table.col_b".
fn parse_unique_message(message: &str) -> Option<UniqueViolation> {
    let qualified_columns = message.strip_prefix("UNIQUE constraint failed: ")?;
    let mut table = None;
    let mut columns = Vec::new();
    for qualified in qualified_columns.split(", ") {
        let (t, column) = qualified.trim().split_once('.')?;
        match table {
            None => table = Some(t.to_string()),
            Some(ref existing) if existing != t => return None,
            _ => {}
        }
        columns.push(column.to_string());
    }
    Some(UniqueViolation {
        table: table?,
        columns,
    })
}
