use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// 25 MiB, per uploaded file.
pub const DEFAULT_MAX_FILE_SIZE: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct TrackConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory uploads are written to and served from under `/uploads`.
    pub upload_dir: String,
    pub max_file_size: usize,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl TrackConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let max_file_size = match env::var("STORAGE_MAX_FILE_SIZE") {
            Ok(raw) => raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "STORAGE_MAX_FILE_SIZE must be a byte count, got '{}': {}",
                    raw,
                    e
                ))
            })?,
            Err(_) => DEFAULT_MAX_FILE_SIZE,
        };

        Ok(TrackConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("music_platform"), is_prod)?,
            },
            storage: StorageConfig {
                upload_dir: get_env("STORAGE_UPLOAD_DIR", Some("public/uploads"), false)?,
                max_file_size,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }

    /// Request body ceiling for the upload route: one audio file, one cover
    /// and a little room for the text fields and multipart framing.
    pub fn upload_body_limit(&self) -> usize {
        self.storage.max_file_size.saturating_mul(2) + 1024 * 1024
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
