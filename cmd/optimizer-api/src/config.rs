use std::env;
use thiserror::Error;

use crate::app::AppConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub analyze_path: Option<String>,
    pub auto_optimize: bool,
    pub log_level: String,
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value,
            })?,
            None => 8086,
        };

        let auto_optimize = match lookup("OPTIMIZER_AUTO_OPTIMIZE") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "OPTIMIZER_AUTO_OPTIMIZE",
                expected: "boolean",
                value,
            })?,
            None => true,
        };

        Ok(Self {
            port,
            analyze_path: lookup("OPTIMIZER_ANALYZE_PATH").filter(|path| !path.is_empty()),
            auto_optimize,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            auto_optimize: Some(self.auto_optimize),
            analyze_path: self.analyze_path.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
