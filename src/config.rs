//! Environment-driven settings for the admission check.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::api::{ApiVersion, ArchitectureVersion, UnknownValue};
use crate::validate::StaticValidator;
use crate::vms::VmSizeCatalog;

pub const DEFAULT_LOCATION: &str = "eastus";
pub const MANAGED_DOMAIN_SUFFIX: &str = "aroapp.io";

/// Error in an environment setting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}: {source}")]
    Unknown {
        name: &'static str,
        #[source]
        source: UnknownValue,
    },

    #[error("{name}: expected 'true' or 'false', got '{value}'")]
    NotABool { name: &'static str, value: String },

    #[error("{name}: must not be empty")]
    Empty { name: &'static str },
}

/// Validator settings for one region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmissionConfig {
    /// Region served, e.g. `eastus`
    pub location: String,
    /// Managed domain, e.g. `eastus.aroapp.io`
    pub domain: String,
    pub require_d2s_workers: bool,
    /// Architecture new clusters are installed with
    pub install_architecture_version: ArchitectureVersion,
    pub api_version: ApiVersion,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            domain: managed_domain(DEFAULT_LOCATION),
            require_d2s_workers: false,
            install_architecture_version: ArchitectureVersion::V2,
            api_version: ApiVersion::default(),
        }
    }
}

fn managed_domain(location: &str) -> String {
    format!("{location}.{MANAGED_DOMAIN_SUFFIX}")
}

impl AdmissionConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which returns `None` for unset names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let location = lookup("RP_LOCATION").unwrap_or_else(|| {
            warn!("RP_LOCATION not set, using '{}'", DEFAULT_LOCATION);
            DEFAULT_LOCATION.to_string()
        });
        if location.is_empty() {
            return Err(ConfigError::Empty {
                name: "RP_LOCATION",
            });
        }

        let domain = lookup("RP_DOMAIN").unwrap_or_else(|| managed_domain(&location));
        if domain.is_empty() {
            return Err(ConfigError::Empty { name: "RP_DOMAIN" });
        }

        let require_d2s_workers = match lookup("REQUIRE_D2S_WORKERS").as_deref() {
            None | Some("") => false,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(ConfigError::NotABool {
                    name: "REQUIRE_D2S_WORKERS",
                    value: other.to_string(),
                });
            }
        };

        let install_architecture_version = match lookup("INSTALL_ARCHITECTURE_VERSION") {
            Some(v) => v.parse().map_err(|source| ConfigError::Unknown {
                name: "INSTALL_ARCHITECTURE_VERSION",
                source,
            })?,
            None => ArchitectureVersion::V2,
        };

        let api_version = match lookup("API_VERSION") {
            Some(v) => v.parse().map_err(|source| ConfigError::Unknown {
                name: "API_VERSION",
                source,
            })?,
            None => ApiVersion::default(),
        };

        Ok(Self {
            location,
            domain,
            require_d2s_workers,
            install_architecture_version,
            api_version,
        })
    }

    /// Build a validator sharing `catalog`.
    pub fn validator(&self, catalog: Arc<VmSizeCatalog>) -> StaticValidator {
        StaticValidator::new(catalog, &self.location, &self.domain)
            .with_require_d2s_workers(self.require_d2s_workers)
            .with_api_version(self.api_version)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AdmissionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AdmissionConfig::default());
        assert_eq!(config.domain, "eastus.aroapp.io");
    }

    #[test]
    fn test_domain_follows_location() {
        let config = AdmissionConfig::from_lookup(lookup(&[("RP_LOCATION", "westeurope")])).unwrap();
        assert_eq!(config.domain, "westeurope.aroapp.io");

        let config = AdmissionConfig::from_lookup(lookup(&[
            ("RP_LOCATION", "westeurope"),
            ("RP_DOMAIN", "example.com"),
        ]))
        .unwrap();
        assert_eq!(config.domain, "example.com");
    }

    #[test]
    fn test_parsed_values() {
        let config = AdmissionConfig::from_lookup(lookup(&[
            ("REQUIRE_D2S_WORKERS", "true"),
            ("INSTALL_ARCHITECTURE_VERSION", "1"),
            ("API_VERSION", "2023-04-01"),
        ]))
        .unwrap();
        assert!(config.require_d2s_workers);
        assert_eq!(config.install_architecture_version, ArchitectureVersion::V1);
        assert_eq!(config.api_version, ApiVersion::V2023_04_01);
    }

    #[test]
    fn test_invalid_values() {
        let err = AdmissionConfig::from_lookup(lookup(&[("REQUIRE_D2S_WORKERS", "maybe")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "REQUIRE_D2S_WORKERS: expected 'true' or 'false', got 'maybe'"
        );

        let err = AdmissionConfig::from_lookup(lookup(&[("API_VERSION", "2020-01-01")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "API_VERSION: unsupported API version '2020-01-01'");

        let err = AdmissionConfig::from_lookup(lookup(&[("RP_LOCATION", "")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { name: "RP_LOCATION" });
    }

    #[test]
    fn test_validator_settings() {
        let config = AdmissionConfig::from_lookup(lookup(&[("API_VERSION", "2023-04-01")])).unwrap();
        let validator = config.validator(Arc::new(VmSizeCatalog::new()));
        assert_eq!(validator.api_version(), ApiVersion::V2023_04_01);
    }
}
