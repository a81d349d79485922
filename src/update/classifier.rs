//! Upgrade risk classification
//!
//! Compares a declared constraint with the best known candidate for the
//! constrained package. Pure and total over its inputs.

use crate::domain::{NuGetVersion, Package, UpgradeAction, VersionSpec};

/// Classify the risk of moving `spec` to `candidate`
///
/// - no candidate: `Unknown`
/// - candidate satisfies the spec: `MinVersion` when the spec's minimum lies
///   below the candidate, otherwise `None`
/// - candidate outside the spec: `ReleaseTo*` when the spec was capped by an
///   inclusive release maximum, `PrereleaseTo*` otherwise; the suffix follows
///   the candidate's own release state
pub fn classify(spec: &VersionSpec, candidate: Option<&Package>) -> UpgradeAction {
    let Some(candidate) = candidate else {
        return UpgradeAction::Unknown;
    };

    if spec.satisfies(&candidate.version) {
        return if is_min_upgradeable(spec, candidate) {
            UpgradeAction::MinVersion
        } else {
            UpgradeAction::None
        };
    }

    match (depends_on_release(spec), candidate.is_release_version()) {
        (true, true) => UpgradeAction::ReleaseToRelease,
        (true, false) => UpgradeAction::ReleaseToPrerelease,
        (false, true) => UpgradeAction::PrereleaseToRelease,
        (false, false) => UpgradeAction::PrereleaseToPrerelease,
    }
}

fn is_min_upgradeable(spec: &VersionSpec, candidate: &Package) -> bool {
    spec.min_version().is_some_and(|min| *min < candidate.version)
}

// Pinned below an inclusive release maximum, as opposed to unbounded or
// already tolerating prereleases at the top.
fn depends_on_release(spec: &VersionSpec) -> bool {
    spec.is_max_inclusive() && spec.max_version().is_some_and(NuGetVersion::is_release)
}
