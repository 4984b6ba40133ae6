//! Plant Catalog Server Library
//!
//! Bilingual (English/Japanese) plant catalog on SQLite, plus the HTTP
//! server exposing it.

pub mod config;
pub mod plant_store;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use plant_store::{PlantStoreError, SqlitePlantStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
