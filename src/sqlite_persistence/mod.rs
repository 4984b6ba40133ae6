mod versioned_schema;

pub use versioned_schema::{
    create_index, migrate_if_needed, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table,
    VersionedSchema, BASE_DB_VERSION,
};
