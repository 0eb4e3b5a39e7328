//! Leaf checks shared by the rule groups.

use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

static RX_DOMAIN_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z]|[a-z][-a-z0-9]{0,61}[a-z0-9])(\.([a-z0-9]|[a-z0-9][-a-z0-9]{0,61}[a-z0-9]))*$",
    )
    .ok()
});

static RX_DOMAIN_NAME_RFC1123: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z0-9]|[a-z0-9][-a-z0-9]{0,61}[a-z0-9])(\.([a-z0-9]|[a-z0-9][-a-z0-9]{0,61}[a-z0-9]))*$",
    )
    .ok()
});

static RX_RESOURCE_GROUP_ID: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^/subscriptions/[^/]+/resourceGroups/[-a-z0-9_().]{0,89}[-a-z0-9_()]$").ok()
});

static RX_SUBNET_ID: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^/subscriptions/[^/]+/resourceGroups/[^/]+/providers/Microsoft\.Network/virtualNetworks/[^/]+/subnets/[^/]+$",
    )
    .ok()
});

static RX_DISK_ENCRYPTION_SET_ID: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^/subscriptions/[^/]+/resourceGroups/[^/]+/providers/Microsoft\.Compute/diskEncryptionSets/[^/]+$",
    )
    .ok()
});

fn matches(rx: &LazyLock<Option<Regex>>, s: &str) -> bool {
    rx.as_ref().is_some_and(|re| re.is_match(s))
}

/// Domain label syntax. New clusters may not start with a digit; existing
/// clusters created before that restriction keep validating on update.
pub fn is_valid_domain_name(domain: &str, create: bool) -> bool {
    if create {
        matches(&RX_DOMAIN_NAME, domain)
    } else {
        matches(&RX_DOMAIN_NAME_RFC1123, domain)
    }
}

/// Placement of a domain relative to the managed domain `rp_domain`
/// (for example `eastus.aroapp.io`).
///
/// A domain under the parent zone must be under the regional zone, and a
/// domain under the regional zone must be a single label.
pub fn is_valid_domain_placement(domain: &str, rp_domain: &str) -> bool {
    let managed = format!(".{rp_domain}");

    if let Some((_, parent)) = rp_domain.split_once('.')
        && domain.ends_with(&format!(".{parent}"))
        && !domain.ends_with(&managed)
    {
        return false;
    }

    match domain.strip_suffix(&managed) {
        Some(prefix) => !prefix.contains('.'),
        None => true,
    }
}

pub fn is_valid_resource_group_id(id: &str) -> bool {
    matches(&RX_RESOURCE_GROUP_ID, id)
}

pub fn is_valid_subnet_id(id: &str) -> bool {
    matches(&RX_SUBNET_ID, id)
}

pub fn is_valid_disk_encryption_set_id(id: &str) -> bool {
    matches(&RX_DISK_ENCRYPTION_SET_ID, id)
}

/// Registry credentials keyed by registry host.
#[derive(Debug, Deserialize)]
struct PullSecret {
    #[serde(default)]
    #[allow(dead_code)]
    auths: Option<BTreeMap<String, Option<RegistryAuth>>>,
}

#[derive(Debug, Deserialize)]
struct RegistryAuth {
    #[serde(default)]
    #[allow(dead_code)]
    auth: String,
}

/// An empty pull secret, or a JSON object whose `auths` maps registries to
/// objects with a string `auth`. Other keys are ignored.
pub fn is_valid_pull_secret(pull_secret: &str) -> bool {
    if pull_secret.is_empty() {
        return true;
    }
    // Decoding through a map keeps a top-level array from filling the struct
    // positionally.
    serde_json::from_str::<Map<String, Value>>(pull_secret)
        .and_then(|secret| serde_json::from_value::<PullSecret>(Value::Object(secret)))
        .is_ok()
}

pub fn is_valid_guid(s: &str) -> bool {
    uuid::Uuid::try_parse(s).is_ok()
}

/// Absolute or relative URL without control characters.
pub fn is_valid_url(s: &str) -> bool {
    if s.chars().any(|c| c.is_ascii_control()) {
        return false;
    }
    match url::Url::parse(s) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => url::Url::parse("http://base.invalid/")
            .and_then(|base| base.join(s))
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrError {
    #[error("invalid CIDR address: {0}")]
    InvalidCidr(String),

    #[error("invalid IP address: {0}")]
    InvalidIp(String),
}

/// A CIDR block as written, `address/prefix`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IpCidr {
    pub addr: IpAddr,
    pub prefix: u8,
}

impl IpCidr {
    pub fn parse(s: &str) -> Result<Self, AddrError> {
        let invalid = || AddrError::InvalidCidr(s.to_string());

        let (addr, prefix) = s.split_once('/').ok_or_else(invalid)?;
        let addr: IpAddr = addr.parse().map_err(|_| invalid())?;
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
        let max = if addr.is_ipv4() { 32 } else { 128 };
        if prefix > max {
            return Err(invalid());
        }
        Ok(Self { addr, prefix })
    }

    /// The IPv4 form of this block, if it is one.
    pub fn v4(&self) -> Option<Ipv4Cidr> {
        match self.addr {
            IpAddr::V4(addr) => Some(Ipv4Cidr::new(addr, self.prefix)),
            IpAddr::V6(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ipv4Cidr {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    pub const fn new(addr: Ipv4Addr, prefix: u8) -> Self {
        Self { addr, prefix }
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn mask(&self) -> u32 {
        u32::MAX.checked_shl(32 - u32::from(self.prefix)).unwrap_or(0)
    }

    /// Address with the host bits cleared.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask())
    }

    /// Whether the address as written is the network address.
    pub fn is_network_address(&self) -> bool {
        self.network() == self.addr
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask() == u32::from(self.network())
    }

    /// Either block contains the other's network address.
    pub fn overlaps(&self, other: &Ipv4Cidr) -> bool {
        self.contains(other.network()) || other.contains(self.network())
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// Address ranges the platform uses internally.
pub const RESERVED_RANGES: [Ipv4Cidr; 3] = [
    Ipv4Cidr::new(Ipv4Addr::new(100, 64, 0, 0), 16),
    Ipv4Cidr::new(Ipv4Addr::new(169, 254, 169, 0), 29),
    Ipv4Cidr::new(Ipv4Addr::new(100, 88, 0, 0), 16),
];

pub fn overlaps_reserved_range(cidr: &Ipv4Cidr) -> bool {
    RESERVED_RANGES.iter().any(|r| r.overlaps(cidr))
}

/// Parse an IP address, returning its IPv4 form if it has one.
///
/// IPv4-mapped IPv6 addresses count as IPv4.
pub fn parse_ip(s: &str) -> Result<Option<Ipv4Addr>, AddrError> {
    match s.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => Ok(Some(v4)),
        Ok(IpAddr::V6(v6)) => Ok(v6.to_ipv4_mapped()),
        Err(_) => Err(AddrError::InvalidIp(s.to_string())),
    }
}
