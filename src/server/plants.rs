//! Plant and lookup routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::api_error::ApiError;
use super::api_key::ApiKey;
use super::state::{lock_store, GuardedPlantStore, ServerState};
use crate::plant_store::{
    parse_id, validate_optional_date, LookupEntry, LookupKind, NewPlant, Plant, PlantDetails,
    PlantStoreResult, SqlitePlantStore,
};

/// Body of POST and PUT: names are resolved to lookup ids server side.
#[derive(Deserialize, Debug)]
pub struct PlantBody {
    pub plant_name_en: String,
    pub plant_name_ja: String,
    pub family_name_en: String,
    pub family_name_ja: String,
    pub location_name_en: String,
    pub location_name_ja: String,
    pub botanical_name: String,
    pub image_path: String,
    #[serde(default)]
    pub plant_date: Option<String>,
}

#[derive(Serialize)]
struct CreatedPlant {
    plant_id: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_search_field")]
    pub field: String,
    #[serde(default = "default_search_lang")]
    pub lang: String,
}

fn default_search_field() -> String {
    "name".to_string()
}

fn default_search_lang() -> String {
    "en".to_string()
}

fn parse_body(payload: Result<Json<PlantBody>, JsonRejection>) -> Result<PlantBody, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Resolve the three lookup pairs of `body` into a `NewPlant`.
///
/// Must run inside the same transaction as the write that follows.
fn resolve_plant(
    store: &SqlitePlantStore,
    body: &PlantBody,
    plant_date: Option<NaiveDate>,
) -> PlantStoreResult<NewPlant> {
    Ok(NewPlant {
        plant_name_id: store.get_or_create_plant_name(&body.plant_name_en, &body.plant_name_ja)?,
        family_id: store.get_or_create_family(&body.family_name_en, &body.family_name_ja)?,
        location_id: store
            .get_or_create_location(&body.location_name_en, &body.location_name_ja)?,
        image_path: body.image_path.clone(),
        botanical_name: body.botanical_name.clone(),
        plant_date,
    })
}

async fn get_all_plants(
    State(store): State<GuardedPlantStore>,
) -> Result<Json<Vec<Plant>>, ApiError> {
    let plants = lock_store(&store)?.get_all_plants()?;
    Ok(Json(plants))
}

async fn get_plant(
    State(store): State<GuardedPlantStore>,
    Path(id): Path<String>,
) -> Result<Json<PlantDetails>, ApiError> {
    let plant_id = parse_id(&id, "plant_id")?;
    let details = lock_store(&store)?.get_plant_details(plant_id)?;
    Ok(Json(details))
}

async fn get_plants_by_date(
    State(store): State<GuardedPlantStore>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<PlantDetails>>, ApiError> {
    let start = validate_optional_date(range.start_date.as_deref(), "start_date")?;
    let end = validate_optional_date(range.end_date.as_deref(), "end_date")?;
    let plants = lock_store(&store)?.list_plants_by_date(start, end)?;
    Ok(Json(plants))
}

async fn search_plants(
    State(store): State<GuardedPlantStore>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<Vec<PlantDetails>>, ApiError> {
    let plants = lock_store(&store)?.search_plants(&search.query, &search.field, &search.lang)?;
    Ok(Json(plants))
}

async fn post_plant(
    _api_key: ApiKey,
    State(store): State<GuardedPlantStore>,
    payload: Result<Json<PlantBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(payload)?;
    let plant_date = validate_optional_date(body.plant_date.as_deref(), "plant_date")?;

    let plant_id = lock_store(&store)?.with_transaction(|s| {
        let plant = resolve_plant(s, &body, plant_date)?;
        s.insert_plant(&plant)
    })?;

    info!("Added plant {} ({})", plant_id, body.botanical_name);
    Ok((StatusCode::CREATED, Json(CreatedPlant { plant_id })))
}

async fn put_plant(
    _api_key: ApiKey,
    State(store): State<GuardedPlantStore>,
    Path(id): Path<String>,
    payload: Result<Json<PlantBody>, JsonRejection>,
) -> Result<Json<PlantDetails>, ApiError> {
    let plant_id = parse_id(&id, "plant_id")?;
    let body = parse_body(payload)?;
    let plant_date = validate_optional_date(body.plant_date.as_deref(), "plant_date")?;

    let guard = lock_store(&store)?;
    guard.with_transaction(|s| {
        let plant = resolve_plant(s, &body, plant_date)?;
        s.update_plant(plant_id, &plant)
    })?;
    let details = guard.get_plant_details(plant_id)?;

    info!("Updated plant {}", plant_id);
    Ok(Json(details))
}

async fn delete_plant(
    _api_key: ApiKey,
    State(store): State<GuardedPlantStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let plant_id = parse_id(&id, "plant_id")?;
    lock_store(&store)?.delete_plant(plant_id)?;
    info!("Deleted plant {}", plant_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_lookups(
    State(store): State<GuardedPlantStore>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<LookupEntry>>, ApiError> {
    let kind: LookupKind = kind.parse()?;
    let entries = lock_store(&store)?.list_lookups(kind)?;
    Ok(Json(entries))
}

pub fn make_plant_routes(state: ServerState) -> Router {
    Router::new()
        .route("/plants", get(get_all_plants).post(post_plant))
        .route("/plants/sort_by_date", get(get_plants_by_date))
        .route("/plants/search", get(search_plants))
        .route(
            "/plants/{id}",
            get(get_plant).put(put_plant).delete(delete_plant),
        )
        .route("/lookups/{kind}", get(get_lookups))
        .with_state(state)
}
