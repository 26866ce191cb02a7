//! Configuration module
//!
//! Server and upload settings, read from the process environment (and an
//! optional `.env` file) with typed defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::validation::{DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_MAX_FILE_SIZE};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_PUBLIC_PATH: &str = "/uploads";

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
    /// Maximum requests in flight across the whole router
    pub http_concurrency_limit: usize,
    /// Add internal error details to error responses (ignored in production)
    pub expose_error_details: bool,
}

/// Upload pipeline settings
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Directory uploaded files are written to (created on first upload)
    pub upload_dir: PathBuf,
    /// URL path the upload directory is served under
    pub public_path: String,
    /// Maximum accepted payload size in bytes
    pub max_file_size: usize,
    /// Accepted declared media types (lower-cased, without parameters)
    pub allowed_content_types: Vec<String>,
    /// Absolute origin override for generated URLs, e.g. `https://cdn.example.org`
    pub public_base_url: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_path: DEFAULT_PUBLIC_PATH.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            public_base_url: None,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match var("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::Text,
        };

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let http_concurrency_limit = var("HTTP_CONCURRENCY_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
            .max(1);

        let expose_error_details = var("EXPOSE_ERROR_DETAILS")
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let max_file_size = match var("MAX_FILE_SIZE") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE must be an integer number of bytes"))?,
            None => DEFAULT_MAX_FILE_SIZE,
        };

        let allowed_content_types = var("UPLOAD_ALLOWED_CONTENT_TYPES")
            .map(|value| {
                value
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                DEFAULT_ALLOWED_CONTENT_TYPES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        let public_base_url = var("PUBLIC_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let config = Config {
            server: ServerConfig {
                port,
                environment,
                cors_origins,
                log_format,
                http_concurrency_limit,
                expose_error_details,
            },
            upload: UploadConfig {
                upload_dir: var("UPLOAD_DIR")
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
                public_path: DEFAULT_PUBLIC_PATH.to_string(),
                max_file_size,
                allowed_content_types,
                public_base_url,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.server.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.upload.max_file_size == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE must be greater than zero"));
        }

        if self.upload.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_ALLOWED_CONTENT_TYPES must list at least one media type"
            ));
        }

        if let Some(base) = &self.upload.public_base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "PUBLIC_BASE_URL must be an absolute http(s) origin, got '{}'",
                    base
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.server.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Whether error responses may carry a `details` field
    pub fn expose_error_details(&self) -> bool {
        self.server.expose_error_details && !self.is_production()
    }

    pub fn server_port(&self) -> u16 {
        self.server.port
    }

    pub fn environment(&self) -> &str {
        &self.server.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.upload.max_file_size, 10_485_760);
        assert_eq!(config.upload.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.upload.public_path, "/uploads");
        assert_eq!(config.upload.allowed_content_types.len(), 7);
        assert!(config.upload.public_base_url.is_none());
        assert_eq!(config.server_port(), 4000);
        assert_eq!(config.server.log_format, LogFormat::Text);
        assert_eq!(config.server.http_concurrency_limit, 10_000);
        assert!(!config.is_production());
        assert!(!config.expose_error_details());
    }

    #[test]
    fn test_error_details_are_opt_in_and_never_in_production() {
        let config = load(&[("EXPOSE_ERROR_DETAILS", "true")]).unwrap();
        assert!(config.expose_error_details());

        let config = load(&[
            ("EXPOSE_ERROR_DETAILS", "1"),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://school.example"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert!(!config.expose_error_details());
    }

    #[test]
    fn test_max_file_size_is_read_in_bytes() {
        let config = load(&[("MAX_FILE_SIZE", "2048")]).unwrap();
        assert_eq!(config.upload.max_file_size, 2048);
    }

    #[test]
    fn test_invalid_max_file_size_is_rejected() {
        assert!(load(&[("MAX_FILE_SIZE", "ten")]).is_err());
        assert!(load(&[("MAX_FILE_SIZE", "0")]).is_err());
    }

    #[test]
    fn test_public_base_url_trailing_slash_is_trimmed() {
        let config = load(&[("PUBLIC_BASE_URL", "https://school.example/")]).unwrap();
        assert_eq!(
            config.upload.public_base_url.as_deref(),
            Some("https://school.example")
        );
    }

    #[test]
    fn test_relative_public_base_url_is_rejected() {
        assert!(load(&[("PUBLIC_BASE_URL", "school.example")]).is_err());
    }

    #[test]
    fn test_empty_public_base_url_means_unset() {
        let config = load(&[("PUBLIC_BASE_URL", "  ")]).unwrap();
        assert!(config.upload.public_base_url.is_none());
    }

    #[test]
    fn test_allowed_content_types_are_normalized() {
        let config = load(&[("UPLOAD_ALLOWED_CONTENT_TYPES", " Image/PNG , video/mp4,")]).unwrap();
        assert_eq!(
            config.upload.allowed_content_types,
            vec!["image/png".to_string(), "video/mp4".to_string()]
        );
    }

    #[test]
    fn test_wildcard_cors_refused_in_production() {
        assert!(load(&[("ENVIRONMENT", "production")]).is_err());
        let config = load(&[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://school.example"),
        ])
        .unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_log_format_parses() {
        let config = load(&[("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }
}
