//! Unit tests for aro-admission.
//!
//! These tests exercise the public API end to end: wire JSON in, admission
//! decision out.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::get_unwrap
)]

mod common {
    use std::sync::Arc;

    use aro_admission::{ArchitectureVersion, CloudError, OpenShiftCluster, StaticValidator, VmSizeCatalog};

    pub const RESOURCE_ID: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourcegroups/resourceGroup/providers/microsoft.redhatopenshift/openshiftclusters/resourceName";

    pub const CREATE_REQUEST: &str = r#"{
        "id": "/subscriptions/00000000-0000-0000-0000-000000000000/resourcegroups/resourceGroup/providers/microsoft.redhatopenshift/openshiftclusters/resourceName",
        "name": "resourceName",
        "type": "Microsoft.RedHatOpenShift/openShiftClusters",
        "location": "location",
        "tags": {"key": "value"},
        "properties": {
            "provisioningState": "Succeeded",
            "clusterProfile": {
                "pullSecret": "{\"auths\":{\"registry.connect.redhat.com\":{\"auth\":\"\"},\"registry.redhat.io\":{\"auth\":\"\"}}}",
                "domain": "cluster.location.aroapp.io",
                "version": "4.10.0",
                "resourceGroupId": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/test-cluster",
                "fipsValidatedModules": "Disabled"
            },
            "servicePrincipalProfile": {
                "clientId": "11111111-1111-1111-1111-111111111111",
                "clientSecret": "clientSecret"
            },
            "networkProfile": {
                "podCidr": "10.128.0.0/14",
                "serviceCidr": "172.30.0.0/16",
                "outboundType": "Loadbalancer",
                "loadBalancerProfile": {"managedOutboundIps": {"count": 1}}
            },
            "masterProfile": {
                "vmSize": "Standard_D8s_v3",
                "subnetId": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/vnet/providers/Microsoft.Network/virtualNetworks/test-vnet/subnets/master",
                "encryptionAtHost": "Disabled"
            },
            "workerProfiles": [{
                "name": "worker",
                "vmSize": "Standard_D4s_v3",
                "diskSizeGB": 128,
                "subnetId": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/vnet/providers/Microsoft.Network/virtualNetworks/test-vnet/subnets/worker",
                "count": 3,
                "encryptionAtHost": "Disabled"
            }],
            "apiserverProfile": {"visibility": "Public"},
            "ingressProfiles": [{"name": "default", "visibility": "Public"}]
        }
    }"#;

    pub fn request() -> OpenShiftCluster {
        serde_json::from_str(CREATE_REQUEST).unwrap()
    }

    /// What the provider stores after the create above succeeds.
    pub fn stored() -> OpenShiftCluster {
        let mut value: serde_json::Value = serde_json::from_str(CREATE_REQUEST).unwrap();
        value["systemData"] = serde_json::json!({
            "createdBy": "00000000-0000-0000-0000-000000000000",
            "createdByType": "Application",
            "createdAt": "2021-01-23T12:34:54Z"
        });
        let props = &mut value["properties"];
        props["architectureVersion"] = serde_json::json!("V2");
        props["consoleProfile"]["url"] =
            "https://console-openshift-console.apps.cluster.location.aroapp.io/".into();
        props["apiserverProfile"]["url"] = "https://api.cluster.location.aroapp.io:6443/".into();
        props["apiserverProfile"]["ip"] = "1.2.3.4".into();
        props["ingressProfiles"][0]["ip"] = "1.2.3.4".into();
        serde_json::from_value(value).unwrap()
    }

    pub fn validator() -> StaticValidator {
        StaticValidator::new(Arc::new(VmSizeCatalog::new()), "location", "location.aroapp.io")
    }

    pub fn create(oc: &OpenShiftCluster) -> Result<(), CloudError> {
        validator().validate(RESOURCE_ID, oc, None, ArchitectureVersion::V2)
    }

    pub fn update(oc: &OpenShiftCluster, current: &OpenShiftCluster) -> Result<(), CloudError> {
        validator().validate(RESOURCE_ID, oc, Some(current), ArchitectureVersion::V2)
    }
}

mod create_tests {
    use super::common::*;
    use aro_admission::{CloudErrorCode, ErrorKind};

    #[test]
    fn test_valid_request_is_admitted() {
        assert!(create(&request()).is_ok());
    }

    #[test]
    fn test_rejection_envelope() {
        let mut oc = request();
        oc.properties.worker_profiles.as_mut().unwrap()[0].count = 1;
        let err = create(&oc).unwrap_err();

        assert_eq!(err.status_code, 400);
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(
            serde_json::to_value(err.envelope()).unwrap(),
            serde_json::json!({
                "error": {
                    "code": "InvalidParameter",
                    "message": "The provided worker count '1' is invalid.",
                    "target": "properties.workerProfiles['worker'].count",
                }
            })
        );
        assert_eq!(
            err.to_string(),
            "400: InvalidParameter: properties.workerProfiles['worker'].count: The provided worker count '1' is invalid."
        );
    }

    #[test]
    fn test_first_violation_in_rule_order() {
        let mut oc = request();
        oc.location = "elsewhere".to_string();
        oc.properties.network_profile.pod_cidr = "bogus".to_string();
        oc.properties.worker_profiles = None;

        let err = create(&oc).unwrap_err();
        assert_eq!(err.target, "location");

        oc.location = "location".to_string();
        let err = create(&oc).unwrap_err();
        assert_eq!(err.target, "properties.networkProfile.podCidr");

        oc.properties.network_profile.pod_cidr = "10.128.0.0/14".to_string();
        let err = create(&oc).unwrap_err();
        assert_eq!(err.target, "properties.workerProfiles");
    }

    #[test]
    fn test_output_only_fields_rejected() {
        let mut oc = request();
        oc.properties.worker_profiles_status = oc.properties.worker_profiles.clone();
        let err = create(&oc).unwrap_err();
        assert_eq!(err.target, "properties.workerProfilesStatus");
        assert_eq!(err.kind(), ErrorKind::ImmutabilityViolation);
    }

    #[test]
    fn test_cidr_codes() {
        let mut oc = request();
        oc.properties.network_profile.service_cidr = "100.88.0.0/16".to_string();
        assert_eq!(create(&oc).unwrap_err().code, CloudErrorCode::InvalidCidrRange);

        oc.properties.network_profile.service_cidr = "172.30.0.5/16".to_string();
        assert_eq!(create(&oc).unwrap_err().code, CloudErrorCode::InvalidNetworkAddress);
    }
}

mod update_tests {
    use super::common::*;
    use aro_admission::{CloudErrorCode, ErrorKind};

    #[test]
    fn test_resubmitting_stored_resource_is_admitted() {
        assert!(update(&stored(), &stored()).is_ok());
    }

    #[test]
    fn test_omitting_output_only_fields_is_admitted() {
        assert!(update(&request(), &stored()).is_ok());
    }

    #[test]
    fn test_change_is_relabelled() {
        let mut oc = request();
        oc.properties.master_profile.vm_size = "Standard_D16s_v3".to_string();
        let err = update(&oc, &stored()).unwrap_err();
        assert_eq!(err.code, CloudErrorCode::PropertyChangeNotAllowed);
        assert_eq!(err.kind(), ErrorKind::ImmutabilityViolation);
        assert_eq!(err.target, "properties.masterProfile.vmSize");
        assert_eq!(
            err.message,
            "Changing property 'properties.masterProfile.vmSize' is not allowed."
        );
    }

    #[test]
    fn test_tag_change_path() {
        let mut oc = request();
        oc.tags.insert("key".to_string(), "other".to_string());
        assert!(update(&oc, &stored()).is_ok());
    }

    #[test]
    fn test_static_rules_still_apply() {
        let mut oc = stored();
        oc.properties.api_server_profile.visibility = "Hidden".to_string();
        let err = update(&oc, &stored()).unwrap_err();
        assert_eq!(err.code, CloudErrorCode::InvalidParameter);
        assert_eq!(err.target, "properties.apiserverProfile.visibility");
    }

    #[test]
    fn test_legacy_domain_grandfathered() {
        let mut oc = request();
        oc.properties.cluster_profile.domain = "4k7f9clk".to_string();
        assert_eq!(
            create(&oc).unwrap_err().message,
            "The provided domain '4k7f9clk' is invalid."
        );

        let mut current = stored();
        current.properties.cluster_profile.domain = "4k7f9clk".to_string();
        assert!(update(&oc, &current).is_ok());
    }

    #[test]
    fn test_architecture_version_from_stored_resource() {
        let mut oc = request();
        oc.properties
            .network_profile
            .load_balancer_profile
            .as_mut()
            .unwrap()
            .managed_outbound_ips
            .as_mut()
            .unwrap()
            .count = 5;
        assert!(update(&oc, &stored()).is_ok());

        let mut v1 = stored();
        v1.properties.architecture_version = None;
        let err = update(&oc, &v1).unwrap_err();
        assert_eq!(
            err.target,
            "properties.networkProfile.loadBalancerProfile.managedOutboundIps.count"
        );
    }
}

mod vms_tests {
    use aro_admission::vms::tooling::{biased_shuffle, min_sizes_for_role};
    use aro_admission::vms::{Audience, VmRole, VmSizeCatalog};
    use aro_admission::Version;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_lookup() {
        let catalog = VmSizeCatalog::new();
        let info = catalog.lookup("Standard_D8s_v3").unwrap();
        assert_eq!(info.core_count, 8);
        assert!(catalog.lookup("Standard_Nope").is_none());
    }

    #[test]
    fn test_version_gate() {
        let catalog = VmSizeCatalog::new();
        let old: Version = "4.18.9".parse().unwrap();
        let new: Version = "4.19.0".parse().unwrap();
        assert!(!catalog.is_supported("Standard_D8s_v6", VmRole::Master, Audience::Public, Some(&old)));
        assert!(catalog.is_supported("Standard_D8s_v6", VmRole::Master, Audience::Public, Some(&new)));
    }

    #[test]
    fn test_min_sizes_sorted() {
        let catalog = VmSizeCatalog::new();
        let sizes = min_sizes_for_role(&catalog, VmRole::Worker);
        let cores: Vec<u32> = sizes
            .iter()
            .map(|name| catalog.lookup(name).unwrap().core_count)
            .collect();
        assert!(cores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_biased_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..10).collect();
        biased_shuffle(&mut items, &mut rng);
        items.sort_unstable();
        assert_eq!(items, (0..10).collect::<Vec<_>>());
    }
}

mod version_tests {
    use aro_admission::Version;

    #[test]
    fn test_suffix_ordering() {
        let release: Version = "4.14.16".parse().unwrap();
        let candidate: Version = "4.14.16-rc.1".parse().unwrap();
        assert!(!release.lt(&candidate));
        assert!(!release.gt(&candidate));
        assert!(!release.eq(&candidate));
        assert!(release.eq(&"4.14.16".parse::<Version>().unwrap()));
    }

    #[test]
    fn test_parse_errors() {
        assert!("4.14".parse::<Version>().is_err());
        assert!("latest".parse::<Version>().is_err());
    }
}
