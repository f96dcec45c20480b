//! Configuration default values
//!
//! Central location for every default the config layer falls back to.

// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./series-api.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1024 * 1024; // 1MiB

// Environment
pub const ENV_PREFIX: &str = "SERIES_API_";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
