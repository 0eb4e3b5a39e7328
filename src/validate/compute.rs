//! Master and worker profiles.

use super::{ValidationContext, checks};
use crate::api::resource_id::{split_subnet, subscription_of};
use crate::api::{
    ENCRYPTION_AT_HOST_DISABLED, ENCRYPTION_AT_HOST_ENABLED, MasterProfile, WorkerProfile,
};
use crate::error::{CloudError, ErrorKind, Result};
use crate::immutable::equal_fold;
use crate::vms::VmRole;

/// Only worker pool name accepted on create.
pub const WORKER_PROFILE_NAME: &str = "worker";

pub const MIN_WORKER_DISK_SIZE_GB: i32 = 128;
pub const MIN_WORKER_COUNT: i32 = 2;
pub const MAX_WORKER_COUNT: i32 = 50;

fn validate_encryption_at_host(target: String, value: &str) -> Result<()> {
    match value {
        ENCRYPTION_AT_HOST_ENABLED | ENCRYPTION_AT_HOST_DISABLED => Ok(()),
        other => Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            target,
            format!("The provided value '{other}' is invalid."),
        )),
    }
}

pub fn validate_master(ctx: &ValidationContext<'_>) -> Result<()> {
    const PATH: &str = "properties.masterProfile";
    let mp = &ctx.cluster.properties.master_profile;

    if !ctx.catalog.is_valid_for_request(
        &mp.vm_size,
        VmRole::Master,
        ctx.require_d2s_workers,
        ctx.platform_version.as_ref(),
    ) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            format!("{PATH}.vmSize"),
            format!("The provided master VM size '{}' is invalid.", mp.vm_size),
        ));
    }

    if !checks::is_valid_subnet_id(&mp.subnet_id) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            format!("{PATH}.subnetId"),
            format!("The provided master VM subnet '{}' is invalid.", mp.subnet_id),
        ));
    }
    if subscription_of(&mp.subnet_id) != Some(ctx.resource.subscription_id.as_str()) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            format!("{PATH}.subnetId"),
            format!(
                "The provided master VM subnet '{}' is invalid: must be in same subscription as cluster.",
                mp.subnet_id
            ),
        ));
    }

    validate_encryption_at_host(format!("{PATH}.encryptionAtHost"), &mp.encryption_at_host)?;

    let des = &mp.disk_encryption_set_id;
    if !des.is_empty() {
        if !checks::is_valid_disk_encryption_set_id(des) {
            return Err(CloudError::invalid_parameter(
                ErrorKind::MalformedInput,
                format!("{PATH}.diskEncryptionSetId"),
                format!("The provided master disk encryption set '{des}' is invalid."),
            ));
        }
        if subscription_of(des) != Some(ctx.resource.subscription_id.as_str()) {
            return Err(CloudError::invalid_parameter(
                ErrorKind::ReferentialMismatch,
                format!("{PATH}.diskEncryptionSetId"),
                format!(
                    "The provided master disk encryption set '{des}' is invalid: must be in same subscription as cluster."
                ),
            ));
        }
    }

    Ok(())
}

/// Worker pools of a create request. Exactly one pool is accepted, and it
/// must not come with observed status.
pub fn validate_workers(ctx: &ValidationContext<'_>) -> Result<()> {
    let props = &ctx.cluster.properties;

    if ctx.api_version.has_worker_profiles_status() && !props.worker_profiles_status().is_empty() {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ImmutabilityViolation,
            "properties.workerProfilesStatus",
            "Worker Profile Status must be set to nil.",
        ));
    }

    let [worker] = props.worker_profiles() else {
        return Err(CloudError::invalid_parameter(
            ErrorKind::OutOfRange,
            "properties.workerProfiles",
            "There should be exactly one worker profile.",
        ));
    };

    let path = format!("properties.workerProfiles['{}']", worker.name);
    validate_worker(ctx, &path, worker, &props.master_profile)
}

fn validate_worker(
    ctx: &ValidationContext<'_>,
    path: &str,
    wp: &WorkerProfile,
    mp: &MasterProfile,
) -> Result<()> {
    if wp.name != WORKER_PROFILE_NAME {
        return Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            format!("{path}.name"),
            format!("The provided worker name '{}' is invalid.", wp.name),
        ));
    }

    if !ctx.catalog.is_valid_for_request(
        &wp.vm_size,
        VmRole::Worker,
        ctx.require_d2s_workers,
        ctx.platform_version.as_ref(),
    ) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::UnsupportedCapability,
            format!("{path}.vmSize"),
            format!("The provided worker VM size '{}' is invalid.", wp.vm_size),
        ));
    }

    if wp.disk_size_gb < MIN_WORKER_DISK_SIZE_GB {
        return Err(CloudError::invalid_parameter(
            ErrorKind::OutOfRange,
            format!("{path}.diskSizeGB"),
            format!("The provided worker disk size '{}' is invalid.", wp.disk_size_gb),
        ));
    }

    let subnet_target = format!("{path}.subnetId");
    if !checks::is_valid_subnet_id(&wp.subnet_id) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::MalformedInput,
            subnet_target,
            format!("The provided worker VM subnet '{}' is invalid.", wp.subnet_id),
        ));
    }

    validate_encryption_at_host(format!("{path}.encryptionAtHost"), &wp.encryption_at_host)?;

    let malformed = |e: crate::api::ResourceIdError| {
        CloudError::invalid_parameter(ErrorKind::MalformedInput, subnet_target.clone(), e.to_string())
    };
    let (worker_vnet, _) = split_subnet(&wp.subnet_id).map_err(malformed)?;
    let (master_vnet, _) = split_subnet(&mp.subnet_id).map_err(malformed)?;

    if !equal_fold(master_vnet, worker_vnet) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            subnet_target,
            format!(
                "The provided worker VM subnet '{}' is invalid: must be in the same vnet as master VM subnet '{}'.",
                wp.subnet_id, mp.subnet_id
            ),
        ));
    }
    if equal_fold(&mp.subnet_id, &wp.subnet_id) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            subnet_target,
            format!(
                "The provided worker VM subnet '{}' is invalid: must be different to master VM subnet '{}'.",
                wp.subnet_id, mp.subnet_id
            ),
        ));
    }

    if !(MIN_WORKER_COUNT..=MAX_WORKER_COUNT).contains(&wp.count) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::OutOfRange,
            format!("{path}.count"),
            format!("The provided worker count '{}' is invalid.", wp.count),
        ));
    }

    if !equal_fold(&mp.disk_encryption_set_id, &wp.disk_encryption_set_id) {
        return Err(CloudError::invalid_parameter(
            ErrorKind::ReferentialMismatch,
            subnet_target,
            format!(
                "The provided worker disk encryption set '{}' is invalid: must be the same as master disk encryption set '{}'.",
                wp.disk_encryption_set_id, mp.disk_encryption_set_id
            ),
        ));
    }

    Ok(())
}
