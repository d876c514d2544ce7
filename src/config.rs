//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local
//! development.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Zone used when a request omits `tz`
    pub default_tz: String,
    /// Comma-separated origins, or `*` for any
    pub cors_allowed_origins: String,
    /// Maximum number of memoized panchanga responses (0 disables the cache)
    pub panchanga_cache_capacity: usize,
    /// When set, compute routes require this key
    pub api_key: Option<String>,
}

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TZ: &str = "Asia/Kolkata";
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            default_tz: DEFAULT_TZ.to_string(),
            cors_allowed_origins: "*".to_string(),
            panchanga_cache_capacity: DEFAULT_CACHE_CAPACITY,
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", v))?,
            Err(_) => defaults.port,
        };

        let panchanga_cache_capacity = match env::var("PANCHANGA_CACHE_CAPACITY") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PANCHANGA_CACHE_CAPACITY", v))?,
            Err(_) => defaults.panchanga_cache_capacity,
        };

        let default_tz = env::var("DEFAULT_TZ")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.default_tz);
        if default_tz.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::Invalid("DEFAULT_TZ", default_tz));
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            default_tz,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
            panchanga_cache_capacity,
            api_key: env::var("API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Configuration with an API key, for tests of the auth layer.
    pub fn with_api_key(key: &str) -> Self {
        Self {
            api_key: Some(key.to_string()),
            ..Self::default()
        }
    }

    /// Zone applied when a request does not name one.
    pub fn default_zone(&self) -> chrono_tz::Tz {
        self.default_tz.parse().unwrap_or(chrono_tz::Asia::Kolkata)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "8080");
        env::set_var("API_KEY", "  secret  ");
        env::remove_var("DEFAULT_TZ");
        env::remove_var("PANCHANGA_CACHE_CAPACITY");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.default_tz, DEFAULT_TZ);
        assert_eq!(config.panchanga_cache_capacity, DEFAULT_CACHE_CAPACITY);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PORT", _))
        ));

        env::remove_var("PORT");
        env::remove_var("API_KEY");
    }

    #[test]
    fn test_default_serves_port_80_for_any_origin() {
        let config = Config::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.cors_allowed_origins, "*");
        assert!(config.api_key.is_none());
        assert_eq!(config.default_zone(), chrono_tz::Asia::Kolkata);
    }
}
