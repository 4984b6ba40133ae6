use anyhow::{Context, Result};
use std::time::Duration;

use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::info;

use super::plants::make_plant_routes;
use super::state::{lock_store, ServerState};
use super::{http_cache, log_requests, ApiError, ServerConfig};
use crate::plant_store::SqlitePlantStore;

#[derive(Serialize)]
struct ServerStats {
    pub version: String,
    pub uptime: String,
    pub plants: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Result<Json<ServerStats>, ApiError> {
    let plants = lock_store(&state.plant_store)?.count_plants()?;
    Ok(Json(ServerStats {
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        uptime: format_uptime(state.start_time.elapsed()),
        plants,
    }))
}

pub fn make_app(config: ServerConfig, plant_store: SqlitePlantStore) -> Router {
    let state = ServerState::new(config.clone(), plant_store);

    let mut app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .merge(make_plant_routes(state.clone()));

    if let Some(upload_dir) = &config.upload_dir {
        let uploads = Router::new()
            .route_service("/{*path}", ServeDir::new(upload_dir))
            .layer(middleware::from_fn_with_state(
                config.uploads_cache_age_sec,
                http_cache,
            ));
        app = app.nest("/uploads", uploads);
    }

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, plant_store: SqlitePlantStore) -> Result<()> {
    if config.api_key.is_none() {
        info!("No API key configured, write routes will answer 500");
    }
    let port = config.port;
    let app = make_app(config, plant_store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
