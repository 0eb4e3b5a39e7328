//! API server and ingress profiles.

use super::{ValidationContext, checks};
use crate::api::{IngressProfile, VISIBILITY_PRIVATE, VISIBILITY_PUBLIC};
use crate::error::{CloudError, ErrorKind, Result};

/// Only ingress name accepted on create.
pub const INGRESS_PROFILE_NAME: &str = "default";

fn validate_visibility(target: String, visibility: &str) -> Result<()> {
    match visibility {
        VISIBILITY_PUBLIC | VISIBILITY_PRIVATE => Ok(()),
        other => Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            target,
            format!("The provided visibility '{other}' is invalid."),
        )),
    }
}

fn validate_ip(target: String, ip: &str) -> Result<()> {
    if ip.is_empty() {
        return Ok(());
    }
    match checks::parse_ip(ip) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            target,
            format!("The provided IP '{ip}' is invalid: must be IPv4."),
        )),
        Err(_) => Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            target,
            format!("The provided IP '{ip}' is invalid."),
        )),
    }
}

pub fn validate_api_server(ctx: &ValidationContext<'_>) -> Result<()> {
    const PATH: &str = "properties.apiserverProfile";
    let ap = &ctx.cluster.properties.api_server_profile;

    validate_visibility(format!("{PATH}.visibility"), &ap.visibility)?;

    if !ap.url.is_empty() && !checks::is_valid_url(&ap.url) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            format!("{PATH}.url"),
            format!("The provided URL '{}' is invalid.", ap.url),
        ));
    }

    validate_ip(format!("{PATH}.ip"), &ap.ip)
}

/// Ingress profiles of a create request; exactly one is accepted.
pub fn validate_ingress(ctx: &ValidationContext<'_>) -> Result<()> {
    let [ingress] = ctx.cluster.properties.ingress_profiles() else {
        return Err(CloudError::invalid_parameter(
            ErrorKind::OutOfRange,
            "properties.ingressProfiles",
            "There should be exactly one ingress profile.",
        ));
    };

    let path = format!("properties.ingressProfiles['{}']", ingress.name);
    validate_ingress_profile(&path, ingress)
}

fn validate_ingress_profile(path: &str, p: &IngressProfile) -> Result<()> {
    if p.name != INGRESS_PROFILE_NAME {
        return Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            format!("{path}.name"),
            format!("The provided ingress name '{}' is invalid.", p.name),
        ));
    }

    validate_visibility(format!("{path}.visibility"), &p.visibility)?;
    validate_ip(format!("{path}.ip"), &p.ip)
}
