use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
}

/// Liora backend configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

/// User identity persistence configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = env::var("LIORA_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config {
                message: format!("LIORA_BASE_URL must be an http(s) URL, got '{}'", base_url),
            });
        }
        let api = ApiConfig { base_url };

        let identity = IdentityConfig {
            path: PathBuf::from(
                env::var("LIORA_USER_ID_PATH")
                    .unwrap_or_else(|_| "./data/liora_user_id".to_string()),
            ),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
            max_retries: env::var("MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: env::var("RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
        };

        Ok(Config {
            api,
            identity,
            logging,
            request,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}
