use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_request_size() -> usize {
    DEFAULT_MAX_REQUEST_SIZE
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_request_size: default_max_request_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            web: WebConfig::default(),
        }
    }
}

impl Config {
    /// Layer defaults, the TOML file (when present) and `SERIES_API_*` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `SERIES_API_DATABASE__URL`.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(config_file).exists() {
            info!("Loading configuration from {}", config_file);
        } else {
            debug!("Config file {} not found, using defaults", config_file);
        }

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", config_file))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, Some(10));
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from_file("does-not-exist.toml")
                .map_err(|e| e.to_string())?;
            assert_eq!(config.web.port, DEFAULT_PORT);
            assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
            Ok(())
        });
    }

    #[test]
    fn test_file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [database]
                url = "sqlite::memory:"

                [web]
                port = 9090
                "#,
            )?;

            let config = Config::load_from_file("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.database.url, "sqlite::memory:");
            assert_eq!(config.web.port, 9090);
            // Untouched keys keep their defaults
            assert_eq!(config.web.host, DEFAULT_HOST);
            assert_eq!(config.database.max_connections, Some(DEFAULT_MAX_CONNECTIONS));
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[web]\nport = 9090\n")?;
            jail.set_env("SERIES_API_WEB__PORT", "7070");
            jail.set_env("SERIES_API_DATABASE__URL", "sqlite://./env.db");

            let config = Config::load_from_file("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.web.port, 7070);
            assert_eq!(config.database.url, "sqlite://./env.db");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_reported() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[web]\nport = \"not-a-port\"\n")?;
            assert!(Config::load_from_file("config.toml").is_err());
            Ok(())
        });
    }
}
