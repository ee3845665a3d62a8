//! Intake session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session lifetime and storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle minutes after which a session restarts from the greeting
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout_mins: i64,

    /// Seconds between background sweeps of idle sessions
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Directory for file-backed sessions; in-memory when unset
    pub store_dir: Option<String>,
}

impl SessionConfig {
    pub fn inactivity_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.inactivity_timeout_mins)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=1440).contains(&self.inactivity_timeout_mins) {
            return Err(ValidationError::InvalidInactivityTimeout);
        }
        if !(1..=3600).contains(&self.sweep_interval_secs) {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.store_dir.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
            return Err(ValidationError::MissingRequired("SESSION__STORE_DIR"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_mins: default_inactivity_timeout(),
            sweep_interval_secs: default_sweep_interval(),
            store_dir: None,
        }
    }
}

fn default_inactivity_timeout() -> i64 {
    30
}

fn default_sweep_interval() -> u64 {
    60
}
