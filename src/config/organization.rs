//! Seed organization configuration loading from config.toml
//!
//! The organization defined in config.toml is used to seed the directory on
//! first run, when no organization exists yet.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// The organization to seed on first run
    pub organization: OrganizationConfig,
}

/// Configuration for the seed organization
#[derive(Debug, Deserialize, Clone)]
pub struct OrganizationConfig {
    /// Display name of the business
    pub name: String,
    /// ISO currency code (e.g. "VND", "USD"); ledger default applies if unset
    pub currency: Option<String>,
    /// Default session length in minutes; ledger default applies if unset
    pub session_default_length_minutes: Option<i32>,
}

/// Loads the seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed configuration from the default location (./config.toml).
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_organization_config() {
        let toml_str = r#"
            [organization]
            name = "Lean Gym Saigon"
            currency = "VND"
            session_default_length_minutes = 45
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.organization.name, "Lean Gym Saigon");
        assert_eq!(config.organization.currency.as_deref(), Some("VND"));
        assert_eq!(config.organization.session_default_length_minutes, Some(45));
    }

    #[test]
    fn test_optional_settings_default_to_none() {
        let toml_str = r#"
            [organization]
            name = "Minimal Gym"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.organization.name, "Minimal Gym");
        assert!(config.organization.currency.is_none());
        assert!(config.organization.session_default_length_minutes.is_none());
    }
}
