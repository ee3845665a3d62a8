//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `COMPLAINT_INTAKE`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use complaint_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod delivery;
mod error;
mod server;
mod session;

pub use database::DatabaseConfig;
pub use delivery::DeliveryConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// in-memory configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Session expiry, sweeping and storage
    #[serde(default)]
    pub session: SessionConfig,

    /// PostgreSQL complaint repository; in-memory when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Complaint document output
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COMPLAINT_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COMPLAINT_INTAKE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COMPLAINT_INTAKE__SESSION__INACTIVITY_TIMEOUT_MINS=30` -> `session.inactivity_timeout_mins = 30`
    /// - `COMPLAINT_INTAKE__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMPLAINT_INTAKE")
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
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.session.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.delivery.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "COMPLAINT_INTAKE__SERVER__PORT",
        "COMPLAINT_INTAKE__SERVER__ENVIRONMENT",
        "COMPLAINT_INTAKE__SESSION__INACTIVITY_TIMEOUT_MINS",
        "COMPLAINT_INTAKE__SESSION__STORE_DIR",
        "COMPLAINT_INTAKE__DATABASE__URL",
        "COMPLAINT_INTAKE__DELIVERY__OUTPUT_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.session.inactivity_timeout_mins, 30);
        assert!(config.database.is_none());
        assert_eq!(config.delivery.output_dir, "./complaints");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("COMPLAINT_INTAKE__SERVER__PORT", "3000"),
            ("COMPLAINT_INTAKE__SESSION__INACTIVITY_TIMEOUT_MINS", "45"),
            ("COMPLAINT_INTAKE__SESSION__STORE_DIR", "/var/lib/intake"),
            ("COMPLAINT_INTAKE__DELIVERY__OUTPUT_DIR", "/srv/forms"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.inactivity_timeout(), chrono::Duration::minutes(45));
        assert_eq!(config.session.store_dir.as_deref(), Some("/var/lib/intake"));
        assert_eq!(config.delivery.output_dir, "/srv/forms");
    }

    #[test]
    fn test_database_section_is_optional() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[(
            "COMPLAINT_INTAKE__DATABASE__URL",
            "postgresql://intake@localhost/complaints",
        )])
        .unwrap();

        let database = config.database.as_ref().unwrap();
        assert_eq!(database.url, "postgresql://intake@localhost/complaints");
        assert_eq!(database.max_connections, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_database_url_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("COMPLAINT_INTAKE__DATABASE__URL", "mysql://localhost/x")]).unwrap();

        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("COMPLAINT_INTAKE__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
    }
}
