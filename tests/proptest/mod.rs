// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Property-based tests for aro-admission.
//!
//! Uses proptest to generate random inputs and verify invariants.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use aro_admission::api::*;
use aro_admission::immutable;
use aro_admission::vms::tooling::biased_shuffle;
use aro_admission::{StaticValidator, Version, VmSizeCatalog};

const SUB: &str = "00000000-0000-0000-0000-000000000000";

fn resource_id() -> String {
    format!(
        "/subscriptions/{SUB}/resourcegroups/resourceGroup/providers/microsoft.redhatopenshift/openshiftclusters/resourceName"
    )
}

fn subnet(name: &str) -> String {
    format!(
        "/subscriptions/{SUB}/resourceGroups/vnet/providers/Microsoft.Network/virtualNetworks/test-vnet/subnets/{name}"
    )
}

fn validator() -> StaticValidator {
    StaticValidator::new(Arc::new(VmSizeCatalog::new()), "location", "location.aroapp.io")
}

fn cluster() -> OpenShiftCluster {
    OpenShiftCluster {
        id: resource_id(),
        name: "resourceName".to_string(),
        resource_type: qualified_resource_type(),
        location: "location".to_string(),
        system_data: None,
        tags: BTreeMap::new(),
        properties: OpenShiftClusterProperties {
            provisioning_state: provisioning_state::SUCCEEDED.to_string(),
            architecture_version: Some(ArchitectureVersion::V2),
            cluster_profile: ClusterProfile {
                pull_secret: String::new(),
                domain: "cluster.location.aroapp.io".to_string(),
                version: "4.10.0".to_string(),
                resource_group_id: format!("/subscriptions/{SUB}/resourceGroups/test-cluster"),
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
                subnet_id: subnet("master"),
                encryption_at_host: ENCRYPTION_AT_HOST_DISABLED.to_string(),
                disk_encryption_set_id: String::new(),
            },
            worker_profiles: Some(vec![WorkerProfile {
                name: "worker".to_string(),
                vm_size: "Standard_D4s_v3".to_string(),
                disk_size_gb: 128,
                subnet_id: subnet("worker"),
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

fn create_target(oc: &OpenShiftCluster) -> Option<String> {
    validator()
        .validate(&resource_id(), oc, None, ArchitectureVersion::V2)
        .err()
        .map(|e| e.target)
}

/// Strategy for generating tag maps.
fn tags() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9]{0,8}", 0..5)
}

/// Strategy for generating version strings with optional suffixes.
fn version() -> impl Strategy<Value = Version> {
    (0u32..6, 0u32..25, 0u32..40, prop_oneof![Just(""), Just("-rc.1"), Just("-ec.2")])
        .prop_map(|(major, minor, patch, suffix)| {
            format!("{major}.{minor}.{patch}{suffix}").parse().unwrap()
        })
}

/// Strategy for flipping the case of some ASCII letters.
fn recase(s: String) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), s.len()).prop_map(move |flips| {
        s.chars()
            .zip(flips)
            .map(|(c, upper)| {
                if upper {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}

proptest! {
    /// Property: a resource never differs from itself.
    #[test]
    fn identical_resources_pass(tags in tags(), count in 1i32..=20) {
        let mut oc = cluster();
        oc.tags = tags;
        if let Some(lb) = oc.properties.network_profile.load_balancer_profile.as_mut() {
            lb.managed_outbound_ips = Some(ManagedOutboundIps { count });
        }
        prop_assert!(immutable::validate("", &oc, &oc.clone()).is_ok());
    }

    /// Property: differences confined to mutable fields pass.
    #[test]
    fn mutable_only_differences_pass(
        new_tags in tags(),
        old_tags in tags(),
        secret in "[a-zA-Z0-9]{1,16}",
        count in 1i32..=20,
    ) {
        let mut current = cluster();
        current.tags = old_tags;

        let mut oc = cluster();
        oc.tags = new_tags;
        if let Some(spp) = oc.properties.service_principal_profile.as_mut() {
            spp.client_secret = secret;
        }
        if let Some(lb) = oc.properties.network_profile.load_balancer_profile.as_mut() {
            lb.managed_outbound_ips = Some(ManagedOutboundIps { count });
        }

        prop_assert!(immutable::validate("", &oc, &current).is_ok());
        prop_assert!(
            validator()
                .validate(&resource_id(), &oc, Some(&current), ArchitectureVersion::V2)
                .is_ok()
        );
    }

    /// Property: case-only changes to id, name and type pass.
    #[test]
    fn case_only_identity_changes_pass(
        id in recase(resource_id()),
        name in recase("resourceName".to_string()),
        resource_type in recase(qualified_resource_type()),
    ) {
        let current = cluster();
        let mut oc = cluster();
        oc.id = id;
        oc.name = name;
        oc.resource_type = resource_type;
        prop_assert!(immutable::validate("", &oc, &current).is_ok());
    }

    /// Property: any change to an immutable string is reported at its path.
    #[test]
    fn immutable_change_reports_path(domain in "[a-z]{1,10}") {
        prop_assume!(domain != "cluster");
        let current = cluster();
        let mut oc = cluster();
        oc.properties.cluster_profile.domain = format!("{domain}.location.aroapp.io");
        let err = immutable::validate("", &oc, &current).unwrap_err();
        prop_assert_eq!(err.target, "properties.clusterProfile.domain");
    }

    /// Property: lt, gt and eq are mutually consistent.
    #[test]
    fn version_ordering_consistent(a in version(), b in version()) {
        prop_assert_eq!(a.lt(&b), b.gt(&a));
        prop_assert!(!(a.lt(&b) && a.gt(&b)));
        if a.eq(&b) {
            prop_assert!(!a.lt(&b) && !a.gt(&b));
        }
        if !a.lt(&b) && !a.gt(&b) {
            prop_assert_eq!(a.eq(&b), a.suffix() == b.suffix());
        }
    }

    /// Property: worker count is accepted exactly within [2, 50].
    #[test]
    fn worker_count_boundaries(count in -5i32..60) {
        let mut oc = cluster();
        oc.properties.worker_profiles.as_mut().unwrap()[0].count = count;
        let accepted = create_target(&oc).is_none();
        prop_assert_eq!(accepted, (2..=50).contains(&count));
    }

    /// Property: pod CIDR prefix is accepted exactly up to /18.
    #[test]
    fn pod_cidr_prefix_boundaries(prefix in 8u8..=30) {
        let mut oc = cluster();
        oc.properties.network_profile.pod_cidr = format!("10.0.0.0/{prefix}");
        let target = create_target(&oc);
        if prefix <= 18 {
            prop_assert_eq!(target, None);
        } else {
            prop_assert_eq!(target.as_deref(), Some("properties.networkProfile.podCidr"));
        }
    }

    /// Property: service CIDR prefix is accepted exactly up to /22.
    #[test]
    fn service_cidr_prefix_boundaries(prefix in 12u8..=30) {
        let mut oc = cluster();
        oc.properties.network_profile.service_cidr = format!("172.16.0.0/{prefix}");
        let target = create_target(&oc);
        if prefix <= 22 {
            prop_assert_eq!(target, None);
        } else {
            prop_assert_eq!(target.as_deref(), Some("properties.networkProfile.serviceCidr"));
        }
    }

    /// Property: worker disks are accepted from 128 GB.
    #[test]
    fn worker_disk_size_boundaries(size in 0i32..2048) {
        let mut oc = cluster();
        oc.properties.worker_profiles.as_mut().unwrap()[0].disk_size_gb = size;
        prop_assert_eq!(create_target(&oc).is_none(), size >= 128);
    }

    /// Property: the biased shuffle is a permutation.
    #[test]
    fn biased_shuffle_is_permutation(
        items in prop::collection::vec(any::<u16>(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut shuffled = items.clone();
        biased_shuffle(&mut shuffled, &mut StdRng::seed_from_u64(seed));
        let mut expected = items;
        expected.sort_unstable();
        shuffled.sort_unstable();
        prop_assert_eq!(shuffled, expected);
    }
}
