/// Configuration management for dataset-service
///
/// Loads configuration from environment variables with sensible defaults.
use db_pool::env_utils::parse_env_with_default;
use db_pool::{DbConfig, PoolError};
use s3_utils::S3Config;
use serde::Deserialize;
use thiserror::Error;

/// Bucket receiving the archived copy of each inserted batch
pub const DEFAULT_ARCHIVE_BUCKET: &str = "user-02-juanda-smm-ueia-so";

/// Key prefix inside the archive bucket
pub const DEFAULT_ARCHIVE_PREFIX: &str = "datasets";

const DEFAULT_MAX_JSON_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Database(#[from] PoolError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub database: DbConfig,
    pub s3: S3Config,
    pub archive: ArchiveConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_json_payload_bytes: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArchiveConfig {
    pub prefix: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = AppConfig {
            host: std::env::var("DATASET_SERVICE_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_with_default("DATASET_SERVICE_PORT", 8000),
            max_json_payload_bytes: parse_env_with_default(
                "MAX_JSON_PAYLOAD_BYTES",
                DEFAULT_MAX_JSON_PAYLOAD_BYTES,
            ),
        };
        if app.max_json_payload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "MAX_JSON_PAYLOAD_BYTES must be positive".to_string(),
            ));
        }

        Ok(Config {
            app,
            database: DbConfig::from_env("dataset-service")?,
            s3: S3Config::from_env(DEFAULT_ARCHIVE_BUCKET),
            archive: ArchiveConfig {
                prefix: std::env::var("S3_ARCHIVE_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_ARCHIVE_PREFIX.to_string()),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
