//! Compute size tables.
//!
//! Public catalogs list the sizes customers may request per role. The
//! internal extras are small sizes only available to internal and test
//! subscriptions. The minimal sets pick the cheapest general purpose size of
//! each D-series family for CI tooling.

use super::{VmFamily, VmSizeInfo};
use crate::version::Version;

const VERSION_4_19: Version = Version::new(4, 19, 0);

const fn size(name: &'static str, core_count: u32, family: VmFamily) -> VmSizeInfo {
    VmSizeInfo {
        name,
        core_count,
        family,
        minimum_version: None,
    }
}

const fn size_419(name: &'static str, core_count: u32, family: VmFamily) -> VmSizeInfo {
    VmSizeInfo {
        name,
        core_count,
        family,
        minimum_version: Some(VERSION_4_19),
    }
}

/// Every size known to the provider.
pub(crate) static ALL_SIZES: &[VmSizeInfo] = &[
    size("Standard_D2s_v3", 2, VmFamily::DSv3),
    size("Standard_D4s_v3", 4, VmFamily::DSv3),
    size("Standard_D8s_v3", 8, VmFamily::DSv3),
    size("Standard_D16s_v3", 16, VmFamily::DSv3),
    size("Standard_D32s_v3", 32, VmFamily::DSv3),
    size("Standard_D2s_v4", 2, VmFamily::DSv4),
    size("Standard_D4s_v4", 4, VmFamily::DSv4),
    size("Standard_D8s_v4", 8, VmFamily::DSv4),
    size("Standard_D16s_v4", 16, VmFamily::DSv4),
    size("Standard_D32s_v4", 32, VmFamily::DSv4),
    size("Standard_D64s_v4", 64, VmFamily::DSv4),
    size("Standard_D2s_v5", 2, VmFamily::DSv5),
    size("Standard_D4s_v5", 4, VmFamily::DSv5),
    size("Standard_D8s_v5", 8, VmFamily::DSv5),
    size("Standard_D16s_v5", 16, VmFamily::DSv5),
    size("Standard_D32s_v5", 32, VmFamily::DSv5),
    size("Standard_D64s_v5", 64, VmFamily::DSv5),
    size("Standard_D96s_v5", 96, VmFamily::DSv5),
    size("Standard_D4as_v4", 4, VmFamily::DASv4),
    size("Standard_D8as_v4", 8, VmFamily::DASv4),
    size("Standard_D16as_v4", 16, VmFamily::DASv4),
    size("Standard_D32as_v4", 32, VmFamily::DASv4),
    size("Standard_D64as_v4", 64, VmFamily::DASv4),
    size("Standard_D96as_v4", 96, VmFamily::DASv4),
    size("Standard_D4as_v5", 4, VmFamily::DASv5),
    size("Standard_D8as_v5", 8, VmFamily::DASv5),
    size("Standard_D16as_v5", 16, VmFamily::DASv5),
    size("Standard_D32as_v5", 32, VmFamily::DASv5),
    size("Standard_D64as_v5", 64, VmFamily::DASv5),
    size("Standard_D96as_v5", 96, VmFamily::DASv5),
    size("Standard_D4ds_v5", 4, VmFamily::DDSv5),
    size("Standard_D8ds_v5", 8, VmFamily::DDSv5),
    size("Standard_D16ds_v5", 16, VmFamily::DDSv5),
    size("Standard_D32ds_v5", 32, VmFamily::DDSv5),
    size("Standard_D64ds_v5", 64, VmFamily::DDSv5),
    size("Standard_D96ds_v5", 96, VmFamily::DDSv5),
    size_419("Standard_D2s_v6", 2, VmFamily::DSv6),
    size_419("Standard_D4s_v6", 4, VmFamily::DSv6),
    size_419("Standard_D8s_v6", 8, VmFamily::DSv6),
    size_419("Standard_D16s_v6", 16, VmFamily::DSv6),
    size_419("Standard_D32s_v6", 32, VmFamily::DSv6),
    size_419("Standard_D48s_v6", 48, VmFamily::DSv6),
    size_419("Standard_D64s_v6", 64, VmFamily::DSv6),
    size_419("Standard_D96s_v6", 96, VmFamily::DSv6),
    size_419("Standard_D4ds_v6", 4, VmFamily::DDSv6),
    size_419("Standard_D8ds_v6", 8, VmFamily::DDSv6),
    size_419("Standard_D16ds_v6", 16, VmFamily::DDSv6),
    size_419("Standard_D32ds_v6", 32, VmFamily::DDSv6),
    size_419("Standard_D48ds_v6", 48, VmFamily::DDSv6),
    size_419("Standard_D64ds_v6", 64, VmFamily::DDSv6),
    size_419("Standard_D96ds_v6", 96, VmFamily::DDSv6),
    size("Standard_E4s_v3", 4, VmFamily::ESv3),
    size("Standard_E8s_v3", 8, VmFamily::ESv3),
    size("Standard_E16s_v3", 16, VmFamily::ESv3),
    size("Standard_E32s_v3", 32, VmFamily::ESv3),
    size("Standard_E2s_v4", 2, VmFamily::ESv4),
    size("Standard_E4s_v4", 4, VmFamily::ESv4),
    size("Standard_E8s_v4", 8, VmFamily::ESv4),
    size("Standard_E16s_v4", 16, VmFamily::ESv4),
    size("Standard_E20s_v4", 20, VmFamily::ESv4),
    size("Standard_E32s_v4", 32, VmFamily::ESv4),
    size("Standard_E48s_v4", 48, VmFamily::ESv4),
    size("Standard_E64s_v4", 64, VmFamily::ESv4),
    size("Standard_E2s_v5", 2, VmFamily::ESv5),
    size("Standard_E4s_v5", 4, VmFamily::ESv5),
    size("Standard_E8s_v5", 8, VmFamily::ESv5),
    size("Standard_E16s_v5", 16, VmFamily::ESv5),
    size("Standard_E20s_v5", 20, VmFamily::ESv5),
    size("Standard_E32s_v5", 32, VmFamily::ESv5),
    size("Standard_E48s_v5", 48, VmFamily::ESv5),
    size("Standard_E64s_v5", 64, VmFamily::ESv5),
    size("Standard_E96s_v5", 96, VmFamily::ESv5),
    size("Standard_E4as_v4", 4, VmFamily::EASv4),
    size("Standard_E8as_v4", 8, VmFamily::EASv4),
    size("Standard_E16as_v4", 16, VmFamily::EASv4),
    size("Standard_E20as_v4", 20, VmFamily::EASv4),
    size("Standard_E32as_v4", 32, VmFamily::EASv4),
    size("Standard_E48as_v4", 48, VmFamily::EASv4),
    size("Standard_E64as_v4", 64, VmFamily::EASv4),
    size("Standard_E96as_v4", 96, VmFamily::EASv4),
    size("Standard_E8as_v5", 8, VmFamily::EASv5),
    size("Standard_E16as_v5", 16, VmFamily::EASv5),
    size("Standard_E20as_v5", 20, VmFamily::EASv5),
    size("Standard_E32as_v5", 32, VmFamily::EASv5),
    size("Standard_E48as_v5", 48, VmFamily::EASv5),
    size("Standard_E64as_v5", 64, VmFamily::EASv5),
    size("Standard_E96as_v5", 96, VmFamily::EASv5),
    size("Standard_E64is_v3", 64, VmFamily::ESv3),
    size("Standard_E80is_v4", 80, VmFamily::EISv4),
    size("Standard_E80ids_v4", 80, VmFamily::EIDSv4),
    size("Standard_E96ds_v5", 96, VmFamily::EDSv5),
    size("Standard_E104is_v5", 104, VmFamily::EISv5),
    size("Standard_E104ids_v5", 104, VmFamily::EIDSv5),
    size("Standard_F4s_v2", 4, VmFamily::FSv2),
    size("Standard_F8s_v2", 8, VmFamily::FSv2),
    size("Standard_F16s_v2", 16, VmFamily::FSv2),
    size("Standard_F32s_v2", 32, VmFamily::FSv2),
    size("Standard_F72s_v2", 72, VmFamily::FSv2),
    size("Standard_M128ms", 128, VmFamily::MS),
    size("Standard_L4s", 4, VmFamily::LSv2),
    size("Standard_L8s", 8, VmFamily::LSv2),
    size("Standard_L16s", 16, VmFamily::LSv2),
    size("Standard_L32s", 32, VmFamily::LSv2),
    size("Standard_L8s_v2", 8, VmFamily::LSv2),
    size("Standard_L16s_v2", 16, VmFamily::LSv2),
    size("Standard_L32s_v2", 32, VmFamily::LSv2),
    size("Standard_L48s_v2", 48, VmFamily::LSv2),
    size("Standard_L64s_v2", 64, VmFamily::LSv2),
    size("Standard_L8s_v3", 8, VmFamily::LSv3),
    size("Standard_L16s_v3", 16, VmFamily::LSv3),
    size("Standard_L32s_v3", 32, VmFamily::LSv3),
    size("Standard_L48s_v3", 48, VmFamily::LSv3),
    size("Standard_L64s_v3", 64, VmFamily::LSv3),
    size_419("Standard_L4s_v4", 4, VmFamily::LSv4),
    size_419("Standard_L8s_v4", 8, VmFamily::LSv4),
    size_419("Standard_L16s_v4", 16, VmFamily::LSv4),
    size_419("Standard_L32s_v4", 32, VmFamily::LSv4),
    size_419("Standard_L48s_v4", 48, VmFamily::LSv4),
    size_419("Standard_L64s_v4", 64, VmFamily::LSv4),
    size_419("Standard_L80s_v4", 80, VmFamily::LSv4),
    size_419("Standard_D4ls_v6", 4, VmFamily::DLSv6),
    size_419("Standard_D8ls_v6", 8, VmFamily::DLSv6),
    size_419("Standard_D16ls_v6", 16, VmFamily::DLSv6),
    size_419("Standard_D32ls_v6", 32, VmFamily::DLSv6),
    size_419("Standard_D48ls_v6", 48, VmFamily::DLSv6),
    size_419("Standard_D64ls_v6", 64, VmFamily::DLSv6),
    size_419("Standard_D96ls_v6", 96, VmFamily::DLSv6),
    size_419("Standard_D4lds_v6", 4, VmFamily::DLDSv6),
    size_419("Standard_D8lds_v6", 8, VmFamily::DLDSv6),
    size_419("Standard_D16lds_v6", 16, VmFamily::DLDSv6),
    size_419("Standard_D32lds_v6", 32, VmFamily::DLDSv6),
    size_419("Standard_D48lds_v6", 48, VmFamily::DLDSv6),
    size_419("Standard_D64lds_v6", 64, VmFamily::DLDSv6),
    size_419("Standard_D96lds_v6", 96, VmFamily::DLDSv6),
    size("Standard_NC4as_T4_v3", 4, VmFamily::NCASv3T4),
    size("Standard_NC8as_T4_v3", 8, VmFamily::NCASv3T4),
    size("Standard_NC16as_T4_v3", 16, VmFamily::NCASv3T4),
    size("Standard_NC64as_T4_v3", 64, VmFamily::NCASv3T4),
    size("Standard_NC6s_v3", 6, VmFamily::NCSv3),
    size("Standard_NC12s_v3", 12, VmFamily::NCSv3),
    size("Standard_NC24s_v3", 24, VmFamily::NCSv3),
    size("Standard_NC24rs_v3", 24, VmFamily::NCSv3),
];

pub(crate) static MASTER_SIZES: &[&str] = &[
    "Standard_D8s_v3",
    "Standard_D16s_v3",
    "Standard_D32s_v3",
    "Standard_D8s_v4",
    "Standard_D16s_v4",
    "Standard_D32s_v4",
    "Standard_D8s_v5",
    "Standard_D16s_v5",
    "Standard_D32s_v5",
    "Standard_D8as_v4",
    "Standard_D16as_v4",
    "Standard_D32as_v4",
    "Standard_D8as_v5",
    "Standard_D16as_v5",
    "Standard_D32as_v5",
    "Standard_D8ds_v5",
    "Standard_D16ds_v5",
    "Standard_D32ds_v5",
    "Standard_E8s_v3",
    "Standard_E16s_v3",
    "Standard_E32s_v3",
    "Standard_E8s_v4",
    "Standard_E16s_v4",
    "Standard_E20s_v4",
    "Standard_E32s_v4",
    "Standard_E48s_v4",
    "Standard_E64s_v4",
    "Standard_E8s_v5",
    "Standard_E16s_v5",
    "Standard_E20s_v5",
    "Standard_E32s_v5",
    "Standard_E48s_v5",
    "Standard_E64s_v5",
    "Standard_E96s_v5",
    "Standard_E4as_v4",
    "Standard_E8as_v4",
    "Standard_E16as_v4",
    "Standard_E20as_v4",
    "Standard_E32as_v4",
    "Standard_E48as_v4",
    "Standard_E64as_v4",
    "Standard_E96as_v4",
    "Standard_E8as_v5",
    "Standard_E16as_v5",
    "Standard_E20as_v5",
    "Standard_E32as_v5",
    "Standard_E48as_v5",
    "Standard_E64as_v5",
    "Standard_E96as_v5",
    "Standard_E64is_v3",
    "Standard_E80is_v4",
    "Standard_E80ids_v4",
    "Standard_E104is_v5",
    "Standard_E104ids_v5",
    "Standard_F72s_v2",
    "Standard_M128ms",
    "Standard_D4s_v6",
    "Standard_D8s_v6",
    "Standard_D16s_v6",
    "Standard_D32s_v6",
    "Standard_D48s_v6",
    "Standard_D64s_v6",
    "Standard_D96s_v6",
    "Standard_D4ds_v6",
    "Standard_D8ds_v6",
    "Standard_D16ds_v6",
    "Standard_D32ds_v6",
    "Standard_D48ds_v6",
    "Standard_D64ds_v6",
    "Standard_D96ds_v6",
];

pub(crate) static WORKER_SIZES: &[&str] = &[
    "Standard_D4s_v3",
    "Standard_D8s_v3",
    "Standard_D16s_v3",
    "Standard_D32s_v3",
    "Standard_D4s_v4",
    "Standard_D8s_v4",
    "Standard_D16s_v4",
    "Standard_D32s_v4",
    "Standard_D64s_v4",
    "Standard_D4s_v5",
    "Standard_D8s_v5",
    "Standard_D16s_v5",
    "Standard_D32s_v5",
    "Standard_D64s_v5",
    "Standard_D96s_v5",
    "Standard_D4as_v4",
    "Standard_D8as_v4",
    "Standard_D16as_v4",
    "Standard_D32as_v4",
    "Standard_D64as_v4",
    "Standard_D96as_v4",
    "Standard_D4as_v5",
    "Standard_D8as_v5",
    "Standard_D16as_v5",
    "Standard_D32as_v5",
    "Standard_D64as_v5",
    "Standard_D96as_v5",
    "Standard_D4ds_v5",
    "Standard_D8ds_v5",
    "Standard_D16ds_v5",
    "Standard_D32ds_v5",
    "Standard_D64ds_v5",
    "Standard_D96ds_v5",
    "Standard_E4s_v3",
    "Standard_E8s_v3",
    "Standard_E16s_v3",
    "Standard_E32s_v3",
    "Standard_E2s_v4",
    "Standard_E4s_v4",
    "Standard_E8s_v4",
    "Standard_E16s_v4",
    "Standard_E20s_v4",
    "Standard_E32s_v4",
    "Standard_E48s_v4",
    "Standard_E64s_v4",
    "Standard_E2s_v5",
    "Standard_E4s_v5",
    "Standard_E8s_v5",
    "Standard_E16s_v5",
    "Standard_E20s_v5",
    "Standard_E32s_v5",
    "Standard_E48s_v5",
    "Standard_E64s_v5",
    "Standard_E96s_v5",
    "Standard_E4as_v4",
    "Standard_E8as_v4",
    "Standard_E16as_v4",
    "Standard_E20as_v4",
    "Standard_E32as_v4",
    "Standard_E48as_v4",
    "Standard_E64as_v4",
    "Standard_E96as_v4",
    "Standard_E8as_v5",
    "Standard_E16as_v5",
    "Standard_E20as_v5",
    "Standard_E32as_v5",
    "Standard_E48as_v5",
    "Standard_E64as_v5",
    "Standard_E96as_v5",
    "Standard_E64is_v3",
    "Standard_E80is_v4",
    "Standard_E80ids_v4",
    "Standard_E104is_v5",
    "Standard_E104ids_v5",
    "Standard_F4s_v2",
    "Standard_F8s_v2",
    "Standard_F16s_v2",
    "Standard_F32s_v2",
    "Standard_F72s_v2",
    "Standard_M128ms",
    "Standard_L4s",
    "Standard_L8s",
    "Standard_L16s",
    "Standard_L32s",
    "Standard_L8s_v2",
    "Standard_L16s_v2",
    "Standard_L32s_v2",
    "Standard_L48s_v2",
    "Standard_L64s_v2",
    "Standard_L8s_v3",
    "Standard_L16s_v3",
    "Standard_L32s_v3",
    "Standard_L48s_v3",
    "Standard_L64s_v3",
    "Standard_L4s_v4",
    "Standard_L8s_v4",
    "Standard_L16s_v4",
    "Standard_L32s_v4",
    "Standard_L48s_v4",
    "Standard_L64s_v4",
    "Standard_L80s_v4",
    "Standard_NC4as_T4_v3",
    "Standard_NC8as_T4_v3",
    "Standard_NC16as_T4_v3",
    "Standard_NC64as_T4_v3",
    "Standard_NC6s_v3",
    "Standard_NC12s_v3",
    "Standard_NC24s_v3",
    "Standard_NC24rs_v3",
    "Standard_D4s_v6",
    "Standard_D8s_v6",
    "Standard_D16s_v6",
    "Standard_D32s_v6",
    "Standard_D48s_v6",
    "Standard_D64s_v6",
    "Standard_D96s_v6",
    "Standard_D4ds_v6",
    "Standard_D8ds_v6",
    "Standard_D16ds_v6",
    "Standard_D32ds_v6",
    "Standard_D48ds_v6",
    "Standard_D64ds_v6",
    "Standard_D96ds_v6",
    "Standard_D4ls_v6",
    "Standard_D8ls_v6",
    "Standard_D16ls_v6",
    "Standard_D32ls_v6",
    "Standard_D48ls_v6",
    "Standard_D64ls_v6",
    "Standard_D96ls_v6",
    "Standard_D4lds_v6",
    "Standard_D8lds_v6",
    "Standard_D16lds_v6",
    "Standard_D32lds_v6",
    "Standard_D48lds_v6",
    "Standard_D64lds_v6",
    "Standard_D96lds_v6",
];

pub(crate) static INTERNAL_MASTER_EXTRAS: &[&str] = &[
    "Standard_D4s_v3",
    "Standard_D4s_v4",
    "Standard_D4s_v5",
    "Standard_D4s_v6",
];

/// Also the only worker sizes allowed for subscriptions that require D2s workers.
pub(crate) static INTERNAL_WORKER_EXTRAS: &[&str] = &[
    "Standard_D2s_v3",
    "Standard_D2s_v4",
    "Standard_D2s_v5",
    "Standard_D2s_v6",
];

pub(crate) static MIN_MASTER_SIZES: &[&str] = &[
    "Standard_D8s_v3",
    "Standard_D8s_v4",
    "Standard_D8s_v5",
    "Standard_D8as_v4",
    "Standard_D8as_v5",
    "Standard_D8ds_v5",
];

pub(crate) static MIN_WORKER_SIZES: &[&str] = &[
    "Standard_D2s_v5",
    "Standard_D4s_v3",
    "Standard_D4s_v4",
    "Standard_D4s_v5",
    "Standard_D4as_v4",
    "Standard_D4as_v5",
    "Standard_D4ds_v5",
];
