//! Versioned resource representation.
//!
//! The cluster types in [`cluster`] mirror the wire JSON of the resource
//! provider API. Enumerated fields are kept as strings so that unknown
//! values survive decoding and can be rejected with a precise message.

pub mod cluster;
pub mod resource_id;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cluster::{
    ApiServerProfile, ClusterProfile, ConsoleProfile, EffectiveOutboundIp, IngressProfile,
    LoadBalancerProfile, ManagedOutboundIps, MasterProfile, NetworkProfile, OpenShiftCluster,
    OpenShiftClusterProperties, ServicePrincipalProfile, SystemData, WorkerProfile,
};
pub use resource_id::{ResourceId, ResourceIdError};

/// Resource provider namespace.
pub const RESOURCE_PROVIDER_NAMESPACE: &str = "Microsoft.RedHatOpenShift";

/// Resource type within the namespace.
pub const RESOURCE_TYPE: &str = "openShiftClusters";

/// Fully qualified resource type, `namespace/type`.
pub fn qualified_resource_type() -> String {
    format!("{RESOURCE_PROVIDER_NAMESPACE}/{RESOURCE_TYPE}")
}

/// Provisioning states a caller may send.
pub mod provisioning_state {
    pub const CREATING: &str = "Creating";
    pub const UPDATING: &str = "Updating";
    pub const ADMIN_UPDATING: &str = "AdminUpdating";
    pub const DELETING: &str = "Deleting";
    pub const SUCCEEDED: &str = "Succeeded";
    pub const FAILED: &str = "Failed";
    pub const CANCELED: &str = "Canceled";
}

pub const FIPS_ENABLED: &str = "Enabled";
pub const FIPS_DISABLED: &str = "Disabled";

pub const ENCRYPTION_AT_HOST_ENABLED: &str = "Enabled";
pub const ENCRYPTION_AT_HOST_DISABLED: &str = "Disabled";

pub const VISIBILITY_PUBLIC: &str = "Public";
pub const VISIBILITY_PRIVATE: &str = "Private";

pub const OUTBOUND_TYPE_LOADBALANCER: &str = "Loadbalancer";
pub const OUTBOUND_TYPE_USER_DEFINED_ROUTING: &str = "UserDefinedRouting";

/// `createdByType` / `lastModifiedByType` values.
pub mod created_by_type {
    pub const APPLICATION: &str = "Application";
    pub const KEY: &str = "Key";
    pub const MANAGED_IDENTITY: &str = "ManagedIdentity";
    pub const USER: &str = "User";
}

/// Unknown value for a versioned setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported {what} '{value}'")]
pub struct UnknownValue {
    pub what: &'static str,
    pub value: String,
}

/// API version a request was made with.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApiVersion {
    V2023_04_01,
    #[default]
    V2023_11_22,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V2023_04_01 => "2023-04-01",
            ApiVersion::V2023_11_22 => "2023-11-22",
        }
    }

    /// `Canceled` is a valid provisioning state.
    pub fn accepts_canceled_state(&self) -> bool {
        *self >= ApiVersion::V2023_11_22
    }

    /// The service principal profile is optional in the schema and must be
    /// checked for presence.
    pub fn requires_explicit_service_principal(&self) -> bool {
        *self >= ApiVersion::V2023_11_22
    }

    /// CIDRs are checked against reserved ranges and for host bits.
    pub fn checks_cidr_ranges(&self) -> bool {
        *self >= ApiVersion::V2023_11_22
    }

    /// Outbound type and load balancer profile exist.
    pub fn has_outbound_settings(&self) -> bool {
        *self >= ApiVersion::V2023_11_22
    }

    /// `workerProfilesStatus` exists.
    pub fn has_worker_profiles_status(&self) -> bool {
        *self >= ApiVersion::V2023_11_22
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2023-04-01" => Ok(ApiVersion::V2023_04_01),
            "2023-11-22" => Ok(ApiVersion::V2023_11_22),
            other => Err(UnknownValue {
                what: "API version",
                value: other.to_string(),
            }),
        }
    }
}

/// Network architecture a cluster was installed with.
///
/// Clusters installed before the current architecture report `V1`, which is
/// also what an unset value means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ArchitectureVersion {
    #[default]
    V1,
    V2,
}

impl fmt::Display for ArchitectureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchitectureVersion::V1 => write!(f, "V1"),
            ArchitectureVersion::V2 => write!(f, "V2"),
        }
    }
}

impl FromStr for ArchitectureVersion {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "V1" | "v1" => Ok(ArchitectureVersion::V1),
            "2" | "V2" | "v2" => Ok(ArchitectureVersion::V2),
            other => Err(UnknownValue {
                what: "architecture version",
                value: other.to_string(),
            }),
        }
    }
}
