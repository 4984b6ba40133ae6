mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub api_key: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub uploads_cache_age_sec: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    /// Key required by write routes; writes are refused while unset.
    pub api_key: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub uploads_cache_age_sec: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified via --db-path or in config file")
            })?;

        if db_path.is_dir() {
            bail!("db_path points to a directory: {:?}", db_path);
        }
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let api_key = file
            .api_key
            .or_else(|| cli.api_key.clone())
            .filter(|key| !key.trim().is_empty());

        let upload_dir = file
            .upload_dir
            .map(PathBuf::from)
            .or_else(|| cli.upload_dir.clone());
        if let Some(dir) = &upload_dir {
            if !dir.exists() {
                bail!("Upload directory does not exist: {:?}", dir);
            }
            if !dir.is_dir() {
                bail!("upload_dir is not a directory: {:?}", dir);
            }
        }

        let uploads_cache_age_sec = file
            .uploads_cache_age_sec
            .unwrap_or(cli.uploads_cache_age_sec);

        Ok(Self {
            db_path,
            port,
            logging_level,
            api_key,
            upload_dir,
            uploads_cache_age_sec,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_logging_level() {
        assert!(matches!(
            parse_logging_level("none"),
            Some(RequestsLoggingLevel::None)
        ));
        assert!(matches!(
            parse_logging_level("headers"),
            Some(RequestsLoggingLevel::Headers)
        ));
        // Case insensitive
        assert!(matches!(
            parse_logging_level("BODY"),
            Some(RequestsLoggingLevel::Body)
        ));
        assert!(parse_logging_level("verbose").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("plants.db");
        let cli = CliConfig {
            db_path: Some(db_path.clone()),
            port: 3001,
            logging_level: RequestsLoggingLevel::Headers,
            api_key: Some("cli-key".to_string()),
            upload_dir: Some(temp_dir.path().to_path_buf()),
            uploads_cache_age_sec: 600,
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.db_path, db_path);
        assert_eq!(config.port, 3001);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        assert_eq!(config.api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.upload_dir.as_deref(), Some(temp_dir.path()));
        assert_eq!(config.uploads_cache_age_sec, 600);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/should/be/overridden.db")),
            port: 3001,
            logging_level: RequestsLoggingLevel::Path,
            api_key: Some("cli-key".to_string()),
            uploads_cache_age_sec: 3600,
            ..Default::default()
        };

        let file_config = FileConfig {
            db_path: Some(temp_dir.path().join("toml.db").to_string_lossy().to_string()),
            port: Some(4000),
            logging_level: Some("body".to_string()),
            api_key: Some("toml-key".to_string()),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.db_path, temp_dir.path().join("toml.db"));
        assert_eq!(config.port, 4000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Body);
        assert_eq!(config.api_key.as_deref(), Some("toml-key"));
        // CLI value used when TOML doesn't specify
        assert_eq!(config.uploads_cache_age_sec, 3600);
        assert!(config.upload_dir.is_none());
    }

    #[test]
    fn test_resolve_missing_db_path_error() {
        let result = AppConfig::resolve(&CliConfig::default(), None);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("db_path must be specified"));
    }

    #[test]
    fn test_resolve_db_path_in_missing_directory_error() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/nonexistent/dir/plants.db")),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_db_path_is_directory_error() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("points to a directory"));
    }

    #[test]
    fn test_resolve_upload_dir_not_directory_error() {
        let temp_dir = TempDir::new().unwrap();
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().join("plants.db")),
            upload_dir: Some(temp_file.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_resolve_blank_api_key_is_unset() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().join("plants.db")),
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert!(config.api_key.is_none());
    }
}
