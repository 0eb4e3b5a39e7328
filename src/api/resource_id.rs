//! Azure resource identifier parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing an Azure resource identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    #[error("invalid resource ID '{0}': expected /subscriptions/<id>/resourceGroups/<name>/providers/<namespace>/<type>/<name>")]
    Malformed(String),

    #[error("invalid subnet ID '{0}'")]
    Subnet(String),
}

/// Components of a provider-scoped resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub provider: String,
    pub resource_type: String,
    pub resource_name: String,
}

impl ResourceId {
    /// Parse `/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}`.
    ///
    /// Segment keys are matched case-insensitively, values are kept as given.
    pub fn parse(id: &str) -> Result<Self, ResourceIdError> {
        let malformed = || ResourceIdError::Malformed(id.to_string());

        let rest = id.strip_prefix('/').ok_or_else(malformed)?;
        let parts: Vec<&str> = rest.split('/').collect();
        let [subs, sub, groups, rg, providers, provider, resource_type, name] = parts.as_slice()
        else {
            return Err(malformed());
        };

        if !subs.eq_ignore_ascii_case("subscriptions")
            || !groups.eq_ignore_ascii_case("resourceGroups")
            || !providers.eq_ignore_ascii_case("providers")
        {
            return Err(malformed());
        }
        if [sub, rg, provider, resource_type, name]
            .iter()
            .any(|s| s.is_empty())
        {
            return Err(malformed());
        }

        Ok(Self {
            subscription_id: sub.to_string(),
            resource_group: rg.to_string(),
            provider: provider.to_string(),
            resource_type: resource_type.to_string(),
            resource_name: name.to_string(),
        })
    }

    /// Resource group id, `/subscriptions/{sub}/resourceGroups/{rg}`.
    pub fn resource_group_id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, self.resource_group
        )
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}/{}",
            self.subscription_id,
            self.resource_group,
            self.provider,
            self.resource_type,
            self.resource_name
        )
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceId::parse(s)
    }
}

/// Subscription segment of any `/subscriptions/{sub}/...` id.
pub fn subscription_of(id: &str) -> Option<&str> {
    let mut parts = id.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(""), Some(key), Some(sub)) if key.eq_ignore_ascii_case("subscriptions") => Some(sub),
        _ => None,
    }
}

/// Split a subnet id into its virtual network id and subnet name.
pub fn split_subnet(subnet_id: &str) -> Result<(&str, &str), ResourceIdError> {
    let parts: Vec<&str> = subnet_id.split('/').collect();
    if parts.len() != 11 {
        return Err(ResourceIdError::Subnet(subnet_id.to_string()));
    }
    match subnet_id.rsplitn(3, '/').collect::<Vec<_>>().as_slice() {
        [name, _, vnet] => Ok((*vnet, *name)),
        _ => Err(ResourceIdError::Subnet(subnet_id.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ID: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourcegroups/resourceGroup/providers/microsoft.redhatopenshift/openshiftclusters/resourceName";

    #[test]
    fn test_parse_resource_id() {
        let r = ResourceId::parse(ID).unwrap();
        assert_eq!(r.subscription_id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(r.resource_group, "resourceGroup");
        assert_eq!(r.provider, "microsoft.redhatopenshift");
        assert_eq!(r.resource_type, "openshiftclusters");
        assert_eq!(r.resource_name, "resourceName");
        assert_eq!(
            r.resource_group_id(),
            "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resourceGroup"
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for id in [
            "",
            "subscriptions/a/resourceGroups/b/providers/c/d/e",
            "/subscriptions/a/resourceGroups/b",
            "/subscriptions/a/resourceGroups/b/providers/c/d/e/f",
            "/subscriptions//resourceGroups/b/providers/c/d/e",
            "/tenants/a/resourceGroups/b/providers/c/d/e",
        ] {
            assert!(ResourceId::parse(id).is_err(), "{id} should not parse");
        }
    }

    #[test]
    fn test_subscription_of() {
        assert_eq!(subscription_of("/subscriptions/abc/resourceGroups/x"), Some("abc"));
        assert_eq!(subscription_of("/Subscriptions/abc"), Some("abc"));
        assert_eq!(subscription_of("subscriptions/abc"), None);
    }

    #[test]
    fn test_split_subnet() {
        let id = "/subscriptions/sub/resourceGroups/vnet/providers/Microsoft.Network/virtualNetworks/test-vnet/subnets/master";
        let (vnet, name) = split_subnet(id).unwrap();
        assert_eq!(
            vnet,
            "/subscriptions/sub/resourceGroups/vnet/providers/Microsoft.Network/virtualNetworks/test-vnet"
        );
        assert_eq!(name, "master");
        assert!(split_subnet("/subscriptions/sub/subnets/master").is_err());
    }
}
