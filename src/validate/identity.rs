//! Resource identity and provisioning state.
//!
//! The id, name and type must agree with the request path, and the location
//! with the region serving the request. All comparisons ignore case.

use super::ValidationContext;
use crate::api::{provisioning_state, qualified_resource_type};
use crate::error::{CloudError, CloudErrorCode, ErrorKind, Result};
use crate::immutable::equal_fold;

pub fn validate(ctx: &ValidationContext<'_>) -> Result<()> {
    let oc = ctx.cluster;

    if !equal_fold(&oc.id, ctx.resource_id) {
        return Err(CloudError::bad_request(
            CloudErrorCode::MismatchingResourceId,
            ErrorKind::ReferentialMismatch,
            "id",
            format!(
                "The provided resource ID '{}' did not match the name in the Url '{}'.",
                oc.id, ctx.resource_id
            ),
        ));
    }

    if !equal_fold(&oc.name, &ctx.resource.resource_name) {
        return Err(CloudError::bad_request(
            CloudErrorCode::MismatchingResourceName,
            ErrorKind::ReferentialMismatch,
            "name",
            format!(
                "The provided resource name '{}' did not match the name in the Url '{}'.",
                oc.name, ctx.resource.resource_name
            ),
        ));
    }

    let expected_type = qualified_resource_type();
    if !equal_fold(&oc.resource_type, &expected_type) {
        return Err(CloudError::bad_request(
            CloudErrorCode::MismatchingResourceType,
            ErrorKind::ReferentialMismatch,
            "type",
            format!(
                "The provided resource type '{}' did not match the name in the Url '{}'.",
                oc.resource_type, expected_type
            ),
        ));
    }

    if !equal_fold(&oc.location, ctx.location) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            "location",
            format!("The provided location '{}' is invalid.", oc.location),
        ));
    }

    Ok(())
}

pub fn validate_provisioning_state(ctx: &ValidationContext<'_>) -> Result<()> {
    use provisioning_state::*;

    let state = ctx.cluster.properties.provisioning_state.as_str();
    let valid = match state {
        CREATING | UPDATING | ADMIN_UPDATING | DELETING | SUCCEEDED | FAILED => true,
        CANCELED => ctx.api_version.accepts_canceled_state(),
        _ => false,
    };

    if !valid {
        return Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            "properties.provisioningState",
            format!("The provided provisioning state '{state}' is invalid."),
        ));
    }

    Ok(())
}
