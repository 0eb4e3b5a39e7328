//! Cluster, console and service principal profiles.

use super::{ValidationContext, checks};
use crate::api::resource_id::subscription_of;
use crate::api::{FIPS_DISABLED, FIPS_ENABLED, ServicePrincipalProfile};
use crate::error::{CloudError, ErrorKind, Result};
use crate::immutable::equal_fold;

const PATH: &str = "properties.clusterProfile";

pub fn validate(ctx: &ValidationContext<'_>) -> Result<()> {
    let cp = &ctx.cluster.properties.cluster_profile;

    if !checks::is_valid_pull_secret(&cp.pull_secret) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            format!("{PATH}.pullSecret"),
            "The provided pull secret is invalid.",
        ));
    }

    if !checks::is_valid_domain_name(&cp.domain, ctx.is_create())
        || !checks::is_valid_domain_placement(&cp.domain, ctx.domain)
    {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            format!("{PATH}.domain"),
            format!("The provided domain '{}' is invalid.", cp.domain),
        ));
    }

    let rg = &cp.resource_group_id;
    let rg_target = format!("{PATH}.resourceGroupId");
    if !checks::is_valid_resource_group_id(rg) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            rg_target,
            format!("The provided resource group '{rg}' is invalid."),
        ));
    }
    if subscription_of(rg) != Some(ctx.resource.subscription_id.as_str()) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            rg_target,
            format!(
                "The provided resource group '{rg}' is invalid: must be in same subscription as cluster."
            ),
        ));
    }
    if equal_fold(rg, &ctx.resource.resource_group_id()) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            rg_target,
            format!(
                "The provided resource group '{rg}' is invalid: must be different from resourceGroup of the OpenShift cluster object."
            ),
        ));
    }

    match cp.fips_validated_modules.as_str() {
        FIPS_ENABLED | FIPS_DISABLED => Ok(()),
        other => Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            format!("{PATH}.fipsValidatedModules"),
            format!("The provided value '{other}' is invalid."),
        )),
    }
}

pub fn validate_console(ctx: &ValidationContext<'_>) -> Result<()> {
    let url = &ctx.cluster.properties.console_profile.url;
    if !url.is_empty() && !checks::is_valid_url(url) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            "properties.consoleProfile.url",
            format!("The provided console URL '{url}' is invalid."),
        ));
    }
    Ok(())
}

pub fn validate_service_principal(ctx: &ValidationContext<'_>) -> Result<()> {
    const SP_PATH: &str = "properties.servicePrincipalProfile";

    let empty = ServicePrincipalProfile::default();
    let spp = match &ctx.cluster.properties.service_principal_profile {
        Some(spp) => spp,
        None if ctx.api_version.requires_explicit_service_principal() => {
            return Err(CloudError::invalid_parameter(
                ErrorKind::MalformedInput,
                SP_PATH,
                "ServicePrincipalProfile cannot be nil in this API version.",
            ));
        }
        None => &empty,
    };

    if !checks::is_valid_guid(&spp.client_id) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            format!("{SP_PATH}.clientId"),
            format!("The provided client ID '{}' is invalid.", spp.client_id),
        ));
    }

    if spp.client_secret.is_empty() {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            format!("{SP_PATH}.clientSecret"),
            "The provided client secret is invalid.",
        ));
    }

    Ok(())
}
