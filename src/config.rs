//! Environment-based configuration module
//!
//! Configuration can be set via:
//! 1. Environment variables (highest priority)
//! 2. .env file
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use std::{env, fs};

use crate::errors::AppError;

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Get environment from APP_ENV variable or default to Development
    pub fn from_env() -> Self {
        match env::var("APP_ENV").unwrap_or_default().as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_name: String,
    pub version: String,

    /// Remote REST API
    pub api: ApiConfig,

    /// List query behaviour (cache freshness, paging, debounce)
    pub query: QueryConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, tanpa trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Berapa lama hasil list dianggap fresh
    pub stale_time_ms: u64,

    pub default_page_size: u32,

    /// Quiet window untuk input pencarian
    pub search_debounce_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,

    /// Directory for log files; no file logging when unset
    pub log_dir: Option<PathBuf>,

    pub log_to_stdout: bool,

    /// Use JSON format (true for production)
    pub json_format: bool,

    /// Maximum log file size in MB
    pub max_file_size_mb: u64,

    /// Maximum number of rotated log files to keep
    pub max_log_files: u32,
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::from_env();

        Self {
            environment: env,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "Konter Admin".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),

            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
                timeout_secs: parse_var("API_TIMEOUT_SECS", 15),
                connect_timeout_secs: parse_var("API_CONNECT_TIMEOUT_SECS", 10),
            },

            query: QueryConfig {
                stale_time_ms: parse_var("QUERY_STALE_TIME_MS", 5_000),
                default_page_size: parse_var("DEFAULT_PAGE_SIZE", 10),
                search_debounce_ms: parse_var("SEARCH_DEBOUNCE_MS", 1_000),
            },

            logging: LoggingConfig {
                level: env::var("RUST_LOG").unwrap_or_else(|_| {
                    if env.is_production() { "warn".to_string() } else { "debug".to_string() }
                }),
                log_dir: env::var("LOG_DIR").ok().map(PathBuf::from),
                log_to_stdout: env::var("LOG_TO_STDOUT")
                    .map(|s| s == "true")
                    .unwrap_or(true),
                json_format: env.is_production(),
                max_file_size_mb: 10,
                max_log_files: 5,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        Self::default()
    }

    /// Load configuration from a .env file (if exists)
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');

                // Existing environment wins over the file
                if env::var_os(key).is_none() {
                    env::set_var(key, value);
                }
            }
        }

        Some(Self::default())
    }

    /// Config untuk base URL tertentu, sisanya default. Dipakai test dan tool.
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.trim_end_matches('/').to_string();
        config
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_millis(self.query.stale_time_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.query.search_debounce_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API_BASE_URL harus diawali http:// atau https:// (didapat: {})",
                url
            )));
        }

        if self.query.default_page_size == 0 {
            return Err(AppError::Config("DEFAULT_PAGE_SIZE harus lebih dari 0".into()));
        }

        if self.is_production() && url.starts_with("http://") && !url.contains("localhost") {
            eprintln!("⚠️  WARNING: API tanpa TLS di production: {}", url);
        }

        Ok(())
    }
}

/// Global configuration instance
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration
pub fn init_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get_or_init(AppConfig::load)
}
