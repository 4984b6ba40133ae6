mod error;
mod lookup;
mod models;
mod queries;
mod schema;
mod store;
mod validation;

pub use error::{PlantStoreError, PlantStoreResult};
pub use models::*;
pub use queries::casefold_contains;
pub use schema::PLANT_VERSIONED_SCHEMAS;
pub use store::{today, SqlitePlantStore};
pub use validation::{
    parse_id, validate_id, validate_language, validate_new_plant, validate_non_empty,
    validate_optional_date, validate_search_field, ValidationError, ValidationResult,
};
