//! Process configuration read from environment variables.

use std::time::Duration;

use super::search::{ElasticsearchConfig, SearchBackend, DEFAULT_ELASTICSEARCH_URL};

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:endqueue.db?mode=rwc";
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown SEARCH_BACKEND '{0}' (expected 'memory' or 'elasticsearch')")]
    UnknownSearchBackend(String),
}

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub search: SearchBackend,
    /// Comma separated origins or `*`. `None` leaves CORS off.
    pub cors_allowed_origins: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            search: SearchBackend::Memory,
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let server_port = var("SERVER_PORT")
            .map(|value| ("SERVER_PORT", value))
            .or_else(|| var("PORT").map(|value| ("PORT", value)))
            .map(|(key, value)| parse_or(key, &value, DEFAULT_SERVER_PORT))
            .unwrap_or(DEFAULT_SERVER_PORT);

        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .map(|value| {
                parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    &value,
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                )
            })
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);

        let search = match var("SEARCH_BACKEND")
            .map(|value| value.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("memory") => SearchBackend::Memory,
            Some("elasticsearch") => {
                let timeout_secs = var("SEARCH_TIMEOUT_SECS")
                    .map(|value| {
                        parse_or("SEARCH_TIMEOUT_SECS", &value, DEFAULT_SEARCH_TIMEOUT_SECS)
                    })
                    .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS);

                SearchBackend::Elasticsearch(ElasticsearchConfig {
                    url: var("ELASTICSEARCH_URL")
                        .unwrap_or_else(|| DEFAULT_ELASTICSEARCH_URL.to_string()),
                    index_prefix: var("ELASTICSEARCH_INDEX_PREFIX").unwrap_or_default(),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            Some(other) => return Err(ConfigError::UnknownSearchBackend(other.to_string())),
        };

        Ok(Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections,
            search,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T>(key: &str, value: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(
            key,
            value,
            default = %default,
            "Unparseable configuration value, using default"
        );
        default
    })
}
