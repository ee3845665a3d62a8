//! Document delivery configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Directory that receives one rendered form per complaint
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl DeliveryConfig {
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DELIVERY__OUTPUT_DIR"));
        }
        Ok(())
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "./complaints".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        let config = DeliveryConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("./complaints"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_output_dir_is_invalid() {
        let config = DeliveryConfig {
            output_dir: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
