//! Application configuration structs
//!
//! Loads configuration from environment variables, optionally layered over a
//! config file for deployments that prefer one.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    #[serde(default)]
    pub leveling: LevelingDefaults,
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Fallback leveling settings for guilds with no stored config
#[derive(Debug, Clone, Deserialize)]
pub struct LevelingDefaults {
    #[serde(default = "default_min_gain")]
    pub min_gain: i64,
    #[serde(default = "default_max_gain")]
    pub max_gain: i64,
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: i64,
    /// Seconds a cached guild config stays fresh
    #[serde(default = "default_config_cache_ttl")]
    pub config_cache_ttl_seconds: u64,
}

impl Default for LevelingDefaults {
    fn default() -> Self {
        Self {
            min_gain: default_min_gain(),
            max_gain: default_max_gain(),
            cooldown_seconds: default_cooldown_seconds(),
            config_cache_ttl_seconds: default_config_cache_ttl(),
        }
    }
}

/// Snowflake ID generator configuration (audit entry IDs)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "levelup".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_min_gain() -> i64 {
    15
}

fn default_max_gain() -> i64 {
    25
}

fn default_cooldown_seconds() -> i64 {
    60
}

fn default_config_cache_ttl() -> u64 {
    300
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: env::var("REDIS_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_redis_max_connections),
            },
            leveling: LevelingDefaults {
                min_gain: env::var("LEVELING_MIN_GAIN")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_gain),
                max_gain: env::var("LEVELING_MAX_GAIN")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_gain),
                cooldown_seconds: env::var("LEVELING_COOLDOWN_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_cooldown_seconds),
                config_cache_ttl_seconds: env::var("LEVELING_CONFIG_CACHE_TTL")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_config_cache_ttl),
            },
            snowflake: SnowflakeConfig {
                worker_id: env::var("WORKER_ID")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            },
        })
    }

    /// Load configuration from an optional file layered under the environment
    ///
    /// File keys use the struct paths (`database.url`, `leveling.min_gain`);
    /// `LEVELUP_`-prefixed environment variables override them
    /// (`LEVELUP_DATABASE__URL`).
    pub fn load(file: Option<&str>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix("LEVELUP")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(::config::Config::try_deserialize)
            .map_err(|e| ConfigError::InvalidValue("config", e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
