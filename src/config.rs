//! Configuration types.

use crate::error::ConfigError;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name for identification.
    pub name: String,
    /// HTTP bind port.
    pub port: u16,
    /// Maximum candidate providers pulled from the store per scoring request.
    pub provider_limit: usize,
    /// Path to the local database file.
    pub db_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "pathways-core".to_string(),
            port: 8080,
            provider_limit: 10,
            db_path: "./data/pathways.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset. A set-but-unparseable value is an error,
    /// not a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match std::env::var("PATHWAYS_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PATHWAYS_PORT".to_string(),
                message: format!("expected a port number, got {raw:?}"),
            })?,
            Err(_) => defaults.port,
        };

        let provider_limit = match std::env::var("PATHWAYS_PROVIDER_LIMIT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PATHWAYS_PROVIDER_LIMIT".to_string(),
                message: format!("expected a positive integer, got {raw:?}"),
            })?,
            Err(_) => defaults.provider_limit,
        };

        let db_path = std::env::var("PATHWAYS_DB_PATH").unwrap_or(defaults.db_path);

        Ok(Self {
            name: defaults.name,
            port,
            provider_limit,
            db_path,
        })
    }
}
