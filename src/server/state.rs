use axum::extract::FromRef;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::error;

use super::api_error::ApiError;
use super::ServerConfig;
use crate::plant_store::SqlitePlantStore;

pub type GuardedPlantStore = Arc<Mutex<SqlitePlantStore>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub plant_store: GuardedPlantStore,
}

impl ServerState {
    pub fn new(config: ServerConfig, plant_store: SqlitePlantStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            plant_store: Arc::new(Mutex::new(plant_store)),
        }
    }
}

/// Lock the store, turning a poisoned mutex into a 500.
pub fn lock_store(store: &GuardedPlantStore) -> Result<MutexGuard<'_, SqlitePlantStore>, ApiError> {
    store.lock().map_err(|_| {
        error!("Plant store mutex poisoned");
        ApiError::Internal
    })
}

impl FromRef<ServerState> for GuardedPlantStore {
    fn from_ref(input: &ServerState) -> Self {
        input.plant_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
