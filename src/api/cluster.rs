//! OpenShift cluster resource as exchanged on the wire.
//!
//! Each type implements [`Walk`] so updates can be checked field by field.
//! Field order in the `walk` implementations follows declaration order, and
//! the keys match the serialized names.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ArchitectureVersion;
use crate::immutable::{Annotation, Field, Node, Walk};

/// A managed OpenShift cluster.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftCluster {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resource type, `Microsoft.RedHatOpenShift/openShiftClusters`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Creation and modification metadata, set by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub properties: OpenShiftClusterProperties,
}

impl Walk for OpenShiftCluster {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::annotated("id", Annotation::CASE_INSENSITIVE, &self.id),
            Field::annotated("name", Annotation::CASE_INSENSITIVE, &self.name),
            Field::annotated("type", Annotation::CASE_INSENSITIVE, &self.resource_type),
            Field::new("location", &self.location),
            Field::annotated("systemData", Annotation::READ_ONLY, &self.system_data),
            Field::annotated("tags", Annotation::MUTABLE, &self.tags),
            Field::new("properties", &self.properties),
        ])
    }
}

/// Cluster properties.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftClusterProperties {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provisioning_state: String,

    /// Network architecture of an existing cluster. Only meaningful on the
    /// stored resource and ignored when comparing updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_version: Option<ArchitectureVersion>,

    #[serde(default)]
    pub cluster_profile: ClusterProfile,

    #[serde(default)]
    pub console_profile: ConsoleProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,

    #[serde(default)]
    pub network_profile: NetworkProfile,

    #[serde(default)]
    pub master_profile: MasterProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_profiles: Option<Vec<WorkerProfile>>,

    /// Observed worker pools, reported by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_profiles_status: Option<Vec<WorkerProfile>>,

    #[serde(default, rename = "apiserverProfile")]
    pub api_server_profile: ApiServerProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_profiles: Option<Vec<IngressProfile>>,
}

impl OpenShiftClusterProperties {
    pub fn worker_profiles(&self) -> &[WorkerProfile] {
        self.worker_profiles.as_deref().unwrap_or_default()
    }

    pub fn worker_profiles_status(&self) -> &[WorkerProfile] {
        self.worker_profiles_status.as_deref().unwrap_or_default()
    }

    pub fn ingress_profiles(&self) -> &[IngressProfile] {
        self.ingress_profiles.as_deref().unwrap_or_default()
    }
}

impl Walk for OpenShiftClusterProperties {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("provisioningState", &self.provisioning_state),
            Field::new("clusterProfile", &self.cluster_profile),
            Field::new("consoleProfile", &self.console_profile),
            Field::new("servicePrincipalProfile", &self.service_principal_profile),
            Field::new("networkProfile", &self.network_profile),
            Field::new("masterProfile", &self.master_profile),
            Field::new("workerProfiles", &self.worker_profiles),
            Field::annotated(
                "workerProfilesStatus",
                Annotation::READ_ONLY,
                &self.worker_profiles_status,
            ),
            Field::new("apiserverProfile", &self.api_server_profile),
            Field::new("ingressProfiles", &self.ingress_profiles),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProfile {
    /// Red Hat pull secret JSON.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pull_secret: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,

    /// OpenShift version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Managed resource group holding the cluster's infrastructure.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_group_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fips_validated_modules: String,
}

impl Walk for ClusterProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("pullSecret", &self.pull_secret),
            Field::new("domain", &self.domain),
            Field::new("version", &self.version),
            Field::new("resourceGroupId", &self.resource_group_id),
            Field::new("fipsValidatedModules", &self.fips_validated_modules),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Walk for ConsoleProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![Field::annotated("url", Annotation::READ_ONLY, &self.url)])
    }
}

/// Credentials the cluster uses against the cloud API. Rotatable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
}

impl Walk for ServicePrincipalProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::annotated("clientId", Annotation::MUTABLE, &self.client_id),
            Field::annotated("clientSecret", Annotation::MUTABLE, &self.client_secret),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pod_cidr: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub outbound_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_profile: Option<LoadBalancerProfile>,
}

impl Walk for NetworkProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("podCidr", &self.pod_cidr),
            Field::new("serviceCidr", &self.service_cidr),
            Field::new("outboundType", &self.outbound_type),
            Field::new("loadBalancerProfile", &self.load_balancer_profile),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_outbound_ips: Option<ManagedOutboundIps>,

    /// Outbound addresses in use, reported by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_outbound_ips: Option<Vec<EffectiveOutboundIp>>,
}

impl Walk for LoadBalancerProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::annotated(
                "managedOutboundIps",
                Annotation::MUTABLE,
                &self.managed_outbound_ips,
            ),
            Field::annotated(
                "effectiveOutboundIps",
                Annotation::READ_ONLY,
                &self.effective_outbound_ips,
            ),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedOutboundIps {
    #[serde(default)]
    pub count: i32,
}

impl Walk for ManagedOutboundIps {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![Field::new("count", &self.count)])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveOutboundIp {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

impl Walk for EffectiveOutboundIp {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![Field::new("id", &self.id)])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encryption_at_host: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub disk_encryption_set_id: String,
}

impl Walk for MasterProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("vmSize", &self.vm_size),
            Field::new("subnetId", &self.subnet_id),
            Field::new("encryptionAtHost", &self.encryption_at_host),
            Field::new("diskEncryptionSetId", &self.disk_encryption_set_id),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(default, rename = "diskSizeGB")]
    pub disk_size_gb: i32,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,

    #[serde(default)]
    pub count: i32,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encryption_at_host: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub disk_encryption_set_id: String,
}

impl Walk for WorkerProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("name", &self.name),
            Field::new("vmSize", &self.vm_size),
            Field::new("diskSizeGB", &self.disk_size_gb),
            Field::new("subnetId", &self.subnet_id),
            Field::new("count", &self.count),
            Field::new("encryptionAtHost", &self.encryption_at_host),
            Field::new("diskEncryptionSetId", &self.disk_encryption_set_id),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServerProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visibility: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

impl Walk for ApiServerProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("visibility", &self.visibility),
            Field::annotated("url", Annotation::READ_ONLY, &self.url),
            Field::annotated("ip", Annotation::READ_ONLY, &self.ip),
        ])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visibility: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

impl Walk for IngressProfile {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("name", &self.name),
            Field::new("visibility", &self.visibility),
            Field::annotated("ip", Annotation::READ_ONLY, &self.ip),
        ])
    }
}

/// Resource metadata maintained by the platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_modified_by: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_modified_by_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<Timestamp>,
}

impl Walk for SystemData {
    fn walk(&self) -> Node<'_> {
        Node::Record(vec![
            Field::new("createdBy", &self.created_by),
            Field::new("createdByType", &self.created_by_type),
            Field::new("createdAt", &self.created_at),
            Field::new("lastModifiedBy", &self.last_modified_by),
            Field::new("lastModifiedByType", &self.last_modified_by_type),
            Field::new("lastModifiedAt", &self.last_modified_at),
        ])
    }
}
