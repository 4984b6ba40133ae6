mod api_error;
mod api_key;
pub mod config;
mod http_layers;
mod plants;
pub mod server;
pub mod state;

pub use api_error::ApiError;
pub use api_key::{ApiKey, HEADER_API_KEY};
pub use config::ServerConfig;
pub use http_layers::*;
pub use plants::PlantBody;
pub use server::{make_app, run_server};
