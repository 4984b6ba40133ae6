use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plant_catalog_server::config::{AppConfig, CliConfig, FileConfig};
use plant_catalog_server::{run_server, RequestsLoggingLevel, ServerConfig, SqlitePlantStore};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let resolved = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => path_buf,
        Err(err) => return Err(err).with_context(|| format!("Error resolving path: {}", s)),
    };
    if resolved.is_absolute() {
        return Ok(resolved);
    }
    Ok(std::env::current_dir()?.join(resolved))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite plant database file.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Key required in the x-api-key header of write requests.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Directory of plant images served under /uploads.
    #[clap(long, value_parser = parse_path)]
    pub upload_dir: Option<PathBuf>,

    /// The maximum age of uploaded images in the cache in seconds.
    #[clap(long, default_value_t = 3600)]
    pub uploads_cache_age_sec: usize,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            api_key: self.api_key.clone(),
            upload_dir: self.upload_dir.clone(),
            uploads_cache_age_sec: self.uploads_cache_age_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening SQLite plant database at {:?}...", config.db_path);
    let plant_store = SqlitePlantStore::new(&config.db_path)?;

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        port: config.port,
        api_key: config.api_key,
        upload_dir: config.upload_dir,
        uploads_cache_age_sec: config.uploads_cache_age_sec,
    };

    info!("Ready to serve at port {}!", server_config.port);
    run_server(server_config, plant_store).await
}
