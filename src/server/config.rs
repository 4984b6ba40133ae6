use std::path::PathBuf;

use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Expected value of the `x-api-key` header on write routes.
    pub api_key: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub uploads_cache_age_sec: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3001,
            api_key: None,
            upload_dir: None,
            uploads_cache_age_sec: 3600,
        }
    }
}
