//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `FISHMONGER`
//! prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use fishmonger::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod cms;
mod error;
mod redis;

pub use cms::CmsConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Strapi CMS connection (catalog + cart store)
    pub cms: CmsConfig,

    /// Redis connection (session store)
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables such as
    /// `FISHMONGER__CMS__BASE_URL` and `FISHMONGER__REDIS__URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FISHMONGER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.cms.validate()?;
        self.redis.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("FISHMONGER__CMS__BASE_URL", "http://localhost:1337");
        env::set_var("FISHMONGER__CMS__TOKEN", "test-token");
        env::set_var("FISHMONGER__REDIS__URL", "redis://localhost:6379");
    }

    fn clear_env() {
        env::remove_var("FISHMONGER__CMS__BASE_URL");
        env::remove_var("FISHMONGER__CMS__TOKEN");
        env::remove_var("FISHMONGER__CMS__TIMEOUT_SECS");
        env::remove_var("FISHMONGER__REDIS__URL");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.cms.base_url, "http://localhost:1337");
        assert_eq!(config.redis.url, "redis://localhost:6379");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_timeout_default() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().cms.timeout_secs, 10);
    }

    #[test]
    fn test_custom_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FISHMONGER__CMS__TIMEOUT_SECS", "30");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().cms.timeout_secs, 30);
    }
}
