//! Size selection for CI and development tooling.
//!
//! Not used when admitting customer requests. Test pipelines start many
//! clusters in parallel, so candidates are spread over families to avoid
//! exhausting the quota of a single one.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{VmRole, VmSizeCatalog};

/// Number of leading entries kept as the preferred picks after shuffling.
pub const PREFERRED_HEAD: usize = 3;

/// Minimal sizes for a role, smallest core count first, ties by name.
pub fn min_sizes_for_role(catalog: &VmSizeCatalog, role: VmRole) -> Vec<&'static str> {
    let mut entries: Vec<_> = catalog
        .minimal_sizes(role)
        .values()
        .map(|info| (info.core_count, info.name))
        .collect();
    entries.sort_unstable();
    entries.into_iter().map(|(_, name)| name).collect()
}

/// Shuffle `items`, then shuffle everything past the first
/// [`PREFERRED_HEAD`] entries again on its own.
pub fn biased_shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
    if let Some(tail) = items.get_mut(PREFERRED_HEAD..)
        && !tail.is_empty()
    {
        tail.shuffle(rng);
    }
}

/// Candidate sizes for a role in randomized order.
pub fn ci_candidate_sizes_with<R: Rng + ?Sized>(
    catalog: &VmSizeCatalog,
    role: VmRole,
    rng: &mut R,
) -> Vec<&'static str> {
    let mut sizes: Vec<&'static str> = catalog.minimal_sizes(role).keys().copied().collect();
    biased_shuffle(&mut sizes, rng);
    sizes
}

pub fn ci_candidate_master_sizes(catalog: &VmSizeCatalog) -> Vec<&'static str> {
    ci_candidate_sizes_with(catalog, VmRole::Master, &mut rand::thread_rng())
}

pub fn ci_candidate_worker_sizes(catalog: &VmSizeCatalog) -> Vec<&'static str> {
    ci_candidate_sizes_with(catalog, VmRole::Worker, &mut rand::thread_rng())
}
