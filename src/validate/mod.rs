//! Static admission checks for cluster create and update requests.
//!
//! Rules run in a fixed order and the first violation is returned:
//! - identity (id, name, type, location) and provisioning state
//! - cluster, console and service principal profiles
//! - network and load balancer profiles
//! - master profile and API server profile
//! - on create: worker and ingress profiles
//! - on update: immutability of the whole resource

pub mod checks;
mod cluster_profile;
mod compute;
mod delta;
mod exposure;
mod identity;
mod network;

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{ApiVersion, ArchitectureVersion, OpenShiftCluster, ResourceId};
use crate::error::{CloudError, ErrorKind, Result};
use crate::version::Version;
use crate::vms::VmSizeCatalog;

/// Validator settings shared by every request of a deployment.
#[derive(Clone, Debug)]
pub struct StaticValidator {
    catalog: Arc<VmSizeCatalog>,
    location: String,
    domain: String,
    require_d2s_workers: bool,
    api_version: ApiVersion,
}

impl StaticValidator {
    /// Validator for the region `location` managing clusters under `domain`
    /// (for example `eastus.aroapp.io`).
    pub fn new(
        catalog: Arc<VmSizeCatalog>,
        location: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            location: location.into(),
            domain: domain.into(),
            require_d2s_workers: false,
            api_version: ApiVersion::default(),
        }
    }

    /// Restrict workers to the small D2s sizes.
    pub fn with_require_d2s_workers(mut self, require: bool) -> Self {
        self.require_d2s_workers = require;
        self
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Check a request.
    ///
    /// `resource_id` is the id from the request path. `current` is the stored
    /// resource on update and `None` on create; `install_architecture_version`
    /// only applies to creates.
    pub fn validate(
        &self,
        resource_id: &str,
        cluster: &OpenShiftCluster,
        current: Option<&OpenShiftCluster>,
        install_architecture_version: ArchitectureVersion,
    ) -> Result<()> {
        let resource = ResourceId::parse(resource_id).map_err(|e| {
            CloudError::invalid_parameter(ErrorKind::MalformedInput, "id", e.to_string())
        })?;

        let ctx = ValidationContext::new(
            self,
            resource_id,
            resource,
            cluster,
            current,
            install_architecture_version,
        );

        debug!(
            resource_id = %resource_id,
            api_version = %self.api_version,
            mode = if ctx.is_create() { "create" } else { "update" },
            architecture_version = %ctx.architecture_version,
            "Validating cluster"
        );

        validate_all(&ctx).inspect_err(|e| {
            info!(
                resource_id = %resource_id,
                code = %e.code,
                target = %e.target,
                "Rejected cluster request"
            );
        })
    }
}

/// Inputs of a single validation run
pub struct ValidationContext<'a> {
    pub location: &'a str,
    pub domain: &'a str,
    pub require_d2s_workers: bool,
    pub api_version: ApiVersion,
    pub catalog: &'a VmSizeCatalog,
    /// Resource id from the request path, as given
    pub resource_id: &'a str,
    pub resource: ResourceId,
    /// The requested resource
    pub cluster: &'a OpenShiftCluster,
    /// The stored resource (for updates)
    pub current: Option<&'a OpenShiftCluster>,
    /// Stored architecture on update, install parameter on create
    pub architecture_version: ArchitectureVersion,
    /// Platform version gating VM sizes, if known
    pub platform_version: Option<Version>,
}

impl<'a> ValidationContext<'a> {
    fn new(
        validator: &'a StaticValidator,
        resource_id: &'a str,
        resource: ResourceId,
        cluster: &'a OpenShiftCluster,
        current: Option<&'a OpenShiftCluster>,
        install_architecture_version: ArchitectureVersion,
    ) -> Self {
        let architecture_version = match current {
            Some(current) => current
                .properties
                .architecture_version
                .unwrap_or_default(),
            None => install_architecture_version,
        };

        let version_source = current.unwrap_or(cluster);
        let platform_version = version_source
            .properties
            .cluster_profile
            .version
            .parse::<Version>()
            .ok();

        Self {
            location: &validator.location,
            domain: &validator.domain,
            require_d2s_workers: validator.require_d2s_workers,
            api_version: validator.api_version,
            catalog: &validator.catalog,
            resource_id,
            resource,
            cluster,
            current,
            architecture_version,
            platform_version,
        }
    }

    /// Check if this is a CREATE operation
    pub fn is_create(&self) -> bool {
        self.current.is_none()
    }
}

/// Run all rule groups in order
pub fn validate_all(ctx: &ValidationContext<'_>) -> Result<()> {
    identity::validate(ctx)?;
    identity::validate_provisioning_state(ctx)?;

    cluster_profile::validate(ctx)?;
    cluster_profile::validate_console(ctx)?;
    cluster_profile::validate_service_principal(ctx)?;

    network::validate(ctx)?;
    network::validate_load_balancer(ctx)?;

    compute::validate_master(ctx)?;
    exposure::validate_api_server(ctx)?;

    if ctx.is_create() {
        compute::validate_workers(ctx)?;
        exposure::validate_ingress(ctx)?;
        return Ok(());
    }

    delta::validate(ctx)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::get_unwrap
)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;
    use std::sync::{Arc, LazyLock};

    use super::StaticValidator;
    use crate::api::*;
    use crate::vms::VmSizeCatalog;

    pub const SUBSCRIPTION_ID: &str = "00000000-0000-0000-0000-000000000000";
    pub const LOCATION: &str = "location";
    pub const RP_DOMAIN: &str = "location.aroapp.io";

    static CATALOG: LazyLock<Arc<VmSizeCatalog>> = LazyLock::new(|| Arc::new(VmSizeCatalog::new()));

    pub fn resource_id() -> String {
        format!(
            "/subscriptions/{SUBSCRIPTION_ID}/resourcegroups/resourceGroup/providers/microsoft.redhatopenshift/openshiftclusters/resourceName"
        )
    }

    pub fn subnet_id(name: &str) -> String {
        format!(
            "/subscriptions/{SUBSCRIPTION_ID}/resourceGroups/vnet/providers/Microsoft.Network/virtualNetworks/test-vnet/subnets/{name}"
        )
    }

    pub fn validator() -> StaticValidator {
        StaticValidator::new(Arc::clone(&CATALOG), LOCATION, RP_DOMAIN)
    }

    /// A cluster that passes create validation.
    pub fn valid_cluster() -> OpenShiftCluster {
        OpenShiftCluster {
            id: resource_id(),
            name: "resourceName".to_string(),
            resource_type: "Microsoft.RedHatOpenShift/openShiftClusters".to_string(),
            location: LOCATION.to_string(),
            system_data: None,
            tags: BTreeMap::from([("key".to_string(), "value".to_string())]),
            properties: OpenShiftClusterProperties {
                provisioning_state: provisioning_state::SUCCEEDED.to_string(),
                architecture_version: None,
                cluster_profile: ClusterProfile {
                    pull_secret: r#"{"auths":{"registry.connect.redhat.com":{"auth":""},"registry.redhat.io":{"auth":""}}}"#.to_string(),
                    domain: "cluster.location.aroapp.io".to_string(),
                    version: "4.10.0".to_string(),
                    resource_group_id: format!(
                        "/subscriptions/{SUBSCRIPTION_ID}/resourceGroups/test-cluster"
                    ),
                    fips_validated_modules: FIPS_DISABLED.to_string(),
                },
                console_profile: ConsoleProfile::default(),
                service_principal_profile: Some(ServicePrincipalProfile {
                    client_id: "11111111-1111-1111-1111-111111111111".to_string(),
                    client_secret: "clientSecret".to_string(),
                }),
                network_profile: NetworkProfile {
                    pod_cidr: "10.128.0.0/14".to_string(),
                    service_cidr: "172.30.0.0/16".to_string(),
                    outbound_type: OUTBOUND_TYPE_LOADBALANCER.to_string(),
                    load_balancer_profile: Some(LoadBalancerProfile {
                        managed_outbound_ips: Some(ManagedOutboundIps { count: 1 }),
                        effective_outbound_ips: None,
                    }),
                },
                master_profile: MasterProfile {
                    vm_size: "Standard_D8s_v3".to_string(),
                    subnet_id: subnet_id("master"),
                    encryption_at_host: ENCRYPTION_AT_HOST_DISABLED.to_string(),
                    disk_encryption_set_id: String::new(),
                },
                worker_profiles: Some(vec![WorkerProfile {
                    name: "worker".to_string(),
                    vm_size: "Standard_D4s_v3".to_string(),
                    disk_size_gb: 128,
                    subnet_id: subnet_id("worker"),
                    count: 3,
                    encryption_at_host: ENCRYPTION_AT_HOST_DISABLED.to_string(),
                    disk_encryption_set_id: String::new(),
                }]),
                worker_profiles_status: None,
                api_server_profile: ApiServerProfile {
                    visibility: VISIBILITY_PUBLIC.to_string(),
                    url: String::new(),
                    ip: String::new(),
                },
                ingress_profiles: Some(vec![IngressProfile {
                    name: "default".to_string(),
                    visibility: VISIBILITY_PUBLIC.to_string(),
                    ip: String::new(),
                }]),
            },
        }
    }

    /// The stored form of [`valid_cluster`] after provisioning.
    pub fn provisioned_cluster() -> OpenShiftCluster {
        let mut oc = valid_cluster();
        oc.system_data = Some(SystemData {
            created_by: SUBSCRIPTION_ID.to_string(),
            created_by_type: created_by_type::APPLICATION.to_string(),
            created_at: "2021-01-23T12:34:54Z".parse().ok(),
            ..SystemData::default()
        });
        oc.properties.console_profile.url =
            "https://console-openshift-console.apps.cluster.location.aroapp.io/".to_string();
        oc.properties.api_server_profile.url =
            "https://api.cluster.location.aroapp.io:6443/".to_string();
        oc.properties.api_server_profile.ip = "1.2.3.4".to_string();
        if let Some(ingress) = oc.properties.ingress_profiles.as_mut() {
            ingress[0].ip = "1.2.3.4".to_string();
        }
        oc
    }

    /// Message and target of a create rejection.
    pub fn create_error(oc: &OpenShiftCluster) -> Option<(String, String)> {
        validator()
            .validate(&resource_id(), oc, None, ArchitectureVersion::V2)
            .err()
            .map(|e| (e.target, e.message))
    }

    /// Message and target of an update rejection against `current`.
    pub fn update_error(oc: &OpenShiftCluster, current: &OpenShiftCluster) -> Option<(String, String)> {
        validator()
            .validate(&resource_id(), oc, Some(current), ArchitectureVersion::V2)
            .err()
            .map(|e| (e.target, e.message))
    }

    pub fn expect(target: &str, message: &str) -> Option<(String, String)> {
        Some((target.to_string(), message.to_string()))
    }
}
