//! aro-admission library crate
//!
//! Synchronous admission checks for managed OpenShift cluster resources:
//! static field rules, immutability of existing clusters, and the VM size
//! and platform version policy those rules consult.

pub mod api;
pub mod config;
pub mod error;
pub mod immutable;
pub mod validate;
pub mod version;
pub mod vms;

pub use api::{ApiVersion, ArchitectureVersion, OpenShiftCluster};
pub use config::{AdmissionConfig, ConfigError};
pub use error::{CloudError, CloudErrorCode, ErrorKind};
pub use validate::StaticValidator;
pub use version::Version;
pub use vms::VmSizeCatalog;
