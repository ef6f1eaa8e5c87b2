use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::eligibility::DEFAULT_HISTORY_LIMIT;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub rules: RulesConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = match env::var("APP_LOG_ANSI") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidLogAnsi)?,
            Err(_) => false,
        };

        let directory = env::var("ELIGIBILITY_RULES_DIR")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let limit = match env::var("ELIGIBILITY_HISTORY_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidHistoryLimit)?,
            Err(_) => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level, ansi },
            rules: RulesConfig { directory },
            history: HistoryConfig { limit },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Where additional rule documents are loaded from, on top of the built-in set.
#[derive(Debug, Clone, Default)]
pub struct RulesConfig {
    pub directory: Option<PathBuf>,
}

/// Saved-run history settings.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub limit: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHistoryLimit,
    InvalidLogAnsi,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHistoryLimit => {
                write!(f, "ELIGIBILITY_HISTORY_LIMIT must be a positive integer")
            }
            ConfigError::InvalidLogAnsi => write!(f, "APP_LOG_ANSI must be true or false"),
        }
    }
}

impl std::error::Error for ConfigError {}
