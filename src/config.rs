use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Which database the board reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSettings {
    /// Hosted PostgREST-style service.
    Hosted { url: String, api_key: String },
    /// Local SQLite file.
    Sqlite { path: PathBuf },
    /// Nothing configured; pages render a connection error.
    Unconfigured,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub static_dir: PathBuf,
    pub cookie_secure: bool,

    // Backend
    pub backend: BackendSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
            static_dir: PathBuf::from(env_or_default("STATIC_DIR", "./static")),
            cookie_secure: parse_env_bool("COOKIE_SECURE", true)?,

            // Backend
            backend: backend_from_env()?,
        })
    }

    /// Configuration with defaults and no backend, for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            static_dir: PathBuf::from("./static"),
            cookie_secure: false,
            backend: BackendSettings::Unconfigured,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let BackendSettings::Hosted { url, api_key } = &self.backend {
            let parsed = url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                name: "BACKEND_URL".to_string(),
                message: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    name: "BACKEND_URL".to_string(),
                    message: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
            if api_key.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: "BACKEND_API_KEY".to_string(),
                    message: "cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn backend_from_env() -> Result<BackendSettings, ConfigError> {
    match (optional_env("BACKEND_URL"), optional_env("DATABASE_PATH")) {
        (Some(_), Some(_)) => Err(ConfigError::InvalidValue {
            name: "DATABASE_PATH".to_string(),
            message: "cannot be combined with BACKEND_URL".to_string(),
        }),
        (Some(url), None) => Ok(BackendSettings::Hosted {
            url,
            api_key: required_env("BACKEND_API_KEY")?,
        }),
        (None, Some(path)) => Ok(BackendSettings::Sqlite {
            path: PathBuf::from(path),
        }),
        (None, None) => Ok(BackendSettings::Unconfigured),
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}
