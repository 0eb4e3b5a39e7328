//! Network profile: pod and service CIDRs, outbound type and the load
//! balancer profile.

use super::checks::{self, Ipv4Cidr};
use super::ValidationContext;
use crate::api::{
    ArchitectureVersion, ManagedOutboundIps, OUTBOUND_TYPE_LOADBALANCER,
    OUTBOUND_TYPE_USER_DEFINED_ROUTING, VISIBILITY_PRIVATE,
};
use crate::error::{CloudError, CloudErrorCode, ErrorKind, Result};

const PATH: &str = "properties.networkProfile";
const LB_PATH: &str = "properties.networkProfile.loadBalancerProfile";

/// Smallest allowed pod network.
pub const MAX_POD_PREFIX: u8 = 18;
/// Smallest allowed service network.
pub const MAX_SERVICE_PREFIX: u8 = 22;

pub const MIN_MANAGED_OUTBOUND_IPS: i32 = 1;
pub const MAX_MANAGED_OUTBOUND_IPS: i32 = 20;

struct CidrField<'a> {
    /// `pod` or `service`
    label: &'static str,
    key: &'static str,
    value: &'a str,
    max_prefix: u8,
}

pub fn validate(ctx: &ValidationContext<'_>) -> Result<()> {
    let props = &ctx.cluster.properties;
    let np = &props.network_profile;

    for field in [
        CidrField {
            label: "pod",
            key: "podCidr",
            value: &np.pod_cidr,
            max_prefix: MAX_POD_PREFIX,
        },
        CidrField {
            label: "service",
            key: "serviceCidr",
            value: &np.service_cidr,
            max_prefix: MAX_SERVICE_PREFIX,
        },
    ] {
        validate_cidr(ctx, &field)?;
    }

    if !ctx.api_version.has_outbound_settings() {
        return Ok(());
    }

    let outbound = np.outbound_type.as_str();
    if !outbound.is_empty() {
        if outbound != OUTBOUND_TYPE_LOADBALANCER && outbound != OUTBOUND_TYPE_USER_DEFINED_ROUTING
        {
            return Err(CloudError::invalid_parameter(
                ErrorKind::UnsupportedCapability,
                format!("{PATH}.outboundType"),
                format!(
                    "The provided outboundType '{outbound}' is invalid: must be UserDefinedRouting or Loadbalancer."
                ),
            ));
        }

        let api_server_private = props.api_server_profile.visibility == VISIBILITY_PRIVATE;
        let ingress_private = props
            .ingress_profiles()
            .first()
            .is_some_and(|ingress| ingress.visibility == VISIBILITY_PRIVATE);

        if outbound == OUTBOUND_TYPE_USER_DEFINED_ROUTING && !(api_server_private && ingress_private)
        {
            return Err(CloudError::invalid_parameter(
                ErrorKind::ReferentialMismatch,
                format!("{PATH}.outboundType"),
                format!(
                    "The provided outboundType '{outbound}' is invalid: cannot use UserDefinedRouting if either API Server Visibility or Ingress Visibility is public."
                ),
            ));
        }
    }

    if outbound == OUTBOUND_TYPE_USER_DEFINED_ROUTING && np.load_balancer_profile.is_some() {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            LB_PATH,
            "The provided loadBalancerProfile is invalid: cannot use a loadBalancerProfile if outboundType is UserDefinedRouting.",
        ));
    }

    Ok(())
}

fn validate_cidr(ctx: &ValidationContext<'_>, field: &CidrField<'_>) -> Result<()> {
    let CidrField {
        label,
        key,
        value,
        max_prefix,
    } = *field;
    let target = format!("{PATH}.{key}");

    let parsed = checks::IpCidr::parse(value).map_err(|e| {
        CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            target.clone(),
            format!("The provided {label} CIDR '{value}' is invalid: '{e}'."),
        )
    })?;

    let Some(cidr) = parsed.v4() else {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            target,
            format!("The provided {label} CIDR '{value}' is invalid: must be IPv4."),
        ));
    };

    if ctx.api_version.checks_cidr_ranges() && checks::overlaps_reserved_range(&cidr) {
        return Err(CloudError::bad_request(
            CloudErrorCode::InvalidCidrRange,
            ErrorKind::ReferentialMismatch,
            PATH,
            format!(
                "Azure Red Hat OpenShift uses 100.64.0.0/16, 169.254.169.0/29, and 100.88.0.0/16 IP address ranges internally. Do not include this '{value}' IP address range in any other CIDR definitions in your cluster."
            ),
        ));
    }

    if cidr.prefix() > max_prefix {
        return Err(CloudError::invalid_parameter(
            ErrorKind::OutOfRange,
            target,
            format!("The provided vnet CIDR '{value}' is invalid: must be /{max_prefix} or larger."),
        ));
    }

    if ctx.api_version.checks_cidr_ranges() && !cidr.is_network_address() {
        return Err(expecting_network_address(label, value, &target, &cidr));
    }

    Ok(())
}

fn expecting_network_address(label: &str, value: &str, target: &str, cidr: &Ipv4Cidr) -> CloudError {
    CloudError::bad_request(
        CloudErrorCode::InvalidNetworkAddress,
        ErrorKind::MalformedInput,
        target,
        format!(
            "The provided {label} CIDR '{value}' is invalid, expecting: '{}/{}'.",
            cidr.network(),
            cidr.prefix()
        ),
    )
}

pub fn validate_load_balancer(ctx: &ValidationContext<'_>) -> Result<()> {
    if !ctx.api_version.has_outbound_settings() {
        return Ok(());
    }
    let Some(lbp) = &ctx.cluster.properties.network_profile.load_balancer_profile else {
        return Ok(());
    };

    if let Some(managed) = &lbp.managed_outbound_ips {
        validate_managed_outbound_ips(managed, ctx.architecture_version)?;
    }

    // Updates are covered by the read-only annotation.
    if lbp.effective_outbound_ips.is_some() && ctx.is_create() {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ImmutabilityViolation,
            format!("{LB_PATH}.effectiveOutboundIps"),
            "The field effectiveOutboundIps is read only.",
        ));
    }

    Ok(())
}

fn validate_managed_outbound_ips(
    managed: &ManagedOutboundIps,
    architecture_version: ArchitectureVersion,
) -> Result<()> {
    let count = managed.count;
    let target = format!("{LB_PATH}.managedOutboundIps.count");

    if architecture_version == ArchitectureVersion::V1 && count > 1 {
        return Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            target,
            format!(
                "The provided managedOutboundIps.count {count} is invalid: managedOutboundIps.count must be 1, multiple IPs are not supported for this cluster's network architecture."
            ),
        ));
    }

    if !(MIN_MANAGED_OUTBOUND_IPS..=MAX_MANAGED_OUTBOUND_IPS).contains(&count) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::OutOfRange,
            target,
            format!(
                "The provided managedOutboundIps.count {count} is invalid: managedOutboundIps.count must be in the range of 1 to 20 (inclusive)."
            ),
        ));
    }

    Ok(())
}
