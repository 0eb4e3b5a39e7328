//! Compute size policy.
//!
//! A [`VmSizeCatalog`] is built once at startup from the static tables in
//! [`sizes`] and handed to whoever needs it. Nothing mutates it afterwards,
//! so it can be shared across threads behind a plain reference or `Arc`.

mod sizes;
pub mod tooling;

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::version::Version;

/// Node role a size is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VmRole {
    Master,
    Worker,
}

impl fmt::Display for VmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmRole::Master => write!(f, "master"),
            VmRole::Worker => write!(f, "worker"),
        }
    }
}

/// Which catalog applies to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Audience {
    /// Regular customer subscriptions.
    #[default]
    Public,
    /// Internal and test subscriptions, which may also use smaller sizes.
    Internal,
}

/// Quota family a size is billed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VmFamily {
    DSv3,
    DSv4,
    DSv5,
    DSv6,
    DASv4,
    DASv5,
    DDSv5,
    DDSv6,
    ESv3,
    ESv4,
    ESv5,
    EASv4,
    EASv5,
    EISv4,
    EIDSv4,
    EISv5,
    EDSv5,
    EIDSv5,
    FSv2,
    MS,
    LSv2,
    LSv3,
    LSv4,
    DLSv6,
    DLDSv6,
    NCASv3T4,
    NCSv3,
}

impl VmFamily {
    /// Family name as reported by the compute usage API.
    pub fn as_str(&self) -> &'static str {
        match self {
            VmFamily::DSv3 => "standardDSv3Family",
            VmFamily::DSv4 => "standardDSv4Family",
            VmFamily::DSv5 => "standardDSv5Family",
            VmFamily::DSv6 => "standardDSv6Family",
            VmFamily::DASv4 => "standardDASv4Family",
            VmFamily::DASv5 => "standardDASv5Family",
            VmFamily::DDSv5 => "standardDDSv5Family",
            VmFamily::DDSv6 => "standardDDSv6Family",
            VmFamily::ESv3 => "standardESv3Family",
            VmFamily::ESv4 => "standardESv4Family",
            VmFamily::ESv5 => "standardESv5Family",
            VmFamily::EASv4 => "standardEASv4Family",
            VmFamily::EASv5 => "standardEASv5Family",
            VmFamily::EISv4 => "standardEISv4Family",
            VmFamily::EIDSv4 => "standardEIDSv4Family",
            VmFamily::EISv5 => "standardEISv5Family",
            VmFamily::EDSv5 => "standardEDSv5Family",
            VmFamily::EIDSv5 => "standardEIDSv5Family",
            VmFamily::FSv2 => "standardFSv2Family",
            VmFamily::MS => "standardMSFamily",
            VmFamily::LSv2 => "standardLsv2Family",
            VmFamily::LSv3 => "standardLsv3Family",
            VmFamily::LSv4 => "standardLsv4Family",
            VmFamily::DLSv6 => "standardDLSv6Family",
            VmFamily::DLDSv6 => "standardDLDSv6Family",
            // the usage API formats the GPU families differently
            VmFamily::NCASv3T4 => "Standard NCASv3_T4 Family",
            VmFamily::NCSv3 => "Standard NCSv3 Family",
        }
    }
}

impl fmt::Display for VmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named compute size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmSizeInfo {
    pub name: &'static str,
    pub core_count: u32,
    pub family: VmFamily,
    /// Oldest platform version that can run on this size, if restricted.
    pub minimum_version: Option<Version>,
}

impl VmSizeInfo {
    /// Whether a cluster at `version` may use this size.
    ///
    /// An unknown cluster version is not gated.
    pub fn available_for(&self, version: Option<&Version>) -> bool {
        match (&self.minimum_version, version) {
            (Some(minimum), Some(version)) => version.at_least(minimum),
            _ => true,
        }
    }
}

type SizeMap = BTreeMap<&'static str, VmSizeInfo>;

/// Role-scoped size catalogs.
#[derive(Debug, Clone)]
pub struct VmSizeCatalog {
    master: SizeMap,
    worker: SizeMap,
    internal_master: SizeMap,
    internal_worker: SizeMap,
    small_worker: SizeMap,
    min_master: SizeMap,
    min_worker: SizeMap,
}

impl VmSizeCatalog {
    /// Build every catalog from the static size tables.
    pub fn new() -> Self {
        let index: BTreeMap<&'static str, &VmSizeInfo> =
            sizes::ALL_SIZES.iter().map(|s| (s.name, s)).collect();

        let pick = |names: &[&'static str]| -> SizeMap {
            names
                .iter()
                .filter_map(|name| index.get(name).map(|info| (*name, (*info).clone())))
                .collect()
        };

        let master = pick(sizes::MASTER_SIZES);
        let worker = pick(sizes::WORKER_SIZES);
        let small_worker = pick(sizes::INTERNAL_WORKER_EXTRAS);

        let mut internal_master = pick(sizes::INTERNAL_MASTER_EXTRAS);
        internal_master.extend(master.iter().map(|(k, v)| (*k, v.clone())));
        let mut internal_worker = small_worker.clone();
        internal_worker.extend(worker.iter().map(|(k, v)| (*k, v.clone())));

        let catalog = Self {
            master,
            worker,
            internal_master,
            internal_worker,
            small_worker,
            min_master: pick(sizes::MIN_MASTER_SIZES),
            min_worker: pick(sizes::MIN_WORKER_SIZES),
        };

        debug!(
            master = catalog.master.len(),
            worker = catalog.worker.len(),
            internal_master = catalog.internal_master.len(),
            internal_worker = catalog.internal_worker.len(),
            "Built VM size catalog"
        );

        catalog
    }

    /// Sizes supported for a role and audience.
    pub fn supported(&self, role: VmRole, audience: Audience) -> &BTreeMap<&'static str, VmSizeInfo> {
        match (role, audience) {
            (VmRole::Master, Audience::Public) => &self.master,
            (VmRole::Worker, Audience::Public) => &self.worker,
            (VmRole::Master, Audience::Internal) => &self.internal_master,
            (VmRole::Worker, Audience::Internal) => &self.internal_worker,
        }
    }

    /// Small worker sizes required for subscriptions flagged to use them.
    pub fn small_worker_sizes(&self) -> &BTreeMap<&'static str, VmSizeInfo> {
        &self.small_worker
    }

    /// Cheapest size per family, used only by CI tooling.
    pub fn minimal_sizes(&self, role: VmRole) -> &BTreeMap<&'static str, VmSizeInfo> {
        match role {
            VmRole::Master => &self.min_master,
            VmRole::Worker => &self.min_worker,
        }
    }

    /// Find a size by name across all catalogs.
    ///
    /// Search order is worker, master, internal worker, internal master.
    pub fn lookup(&self, name: &str) -> Option<&VmSizeInfo> {
        [
            &self.worker,
            &self.master,
            &self.internal_worker,
            &self.internal_master,
        ]
        .into_iter()
        .find_map(|catalog| catalog.get(name))
    }

    /// Whether `name` is in the audience's catalog for `role` and usable at
    /// `version`.
    pub fn is_supported(
        &self,
        name: &str,
        role: VmRole,
        audience: Audience,
        version: Option<&Version>,
    ) -> bool {
        self.supported(role, audience)
            .get(name)
            .is_some_and(|info| info.available_for(version))
    }

    /// Eligibility check used when admitting a cluster request.
    ///
    /// Subscriptions that require D2s workers may only use the small worker
    /// sizes; the flag has no effect on masters.
    pub fn is_valid_for_request(
        &self,
        name: &str,
        role: VmRole,
        require_d2s_workers: bool,
        version: Option<&Version>,
    ) -> bool {
        let catalog = match role {
            VmRole::Master => &self.master,
            VmRole::Worker if require_d2s_workers => &self.small_worker,
            VmRole::Worker => &self.worker,
        };
        catalog
            .get(name)
            .is_some_and(|info| info.available_for(version))
    }
}

impl Default for VmSizeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
