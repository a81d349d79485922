//! Run-level tallies of classified upgrades

use crate::domain::{PackageUpgrade, UpgradeAction};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall summary of a visualization run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSummary {
    /// Number of packages visualized
    pub packages: usize,
    /// Number of upgrade records per action
    pub actions: BTreeMap<UpgradeAction, usize>,
    /// Dependency ids missing from the catalog, in first-seen order
    pub missing: IndexSet<String>,
}

impl UpgradeSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visualized package and its upgrade records
    pub fn record(&mut self, upgrades: &[PackageUpgrade]) {
        self.packages += 1;
        for upgrade in upgrades {
            *self.actions.entry(upgrade.action).or_default() += 1;
            if upgrade.is_missing() {
                self.missing.insert(upgrade.dependency.id.clone());
            }
        }
    }

    /// Returns the number of records classified as `action`
    pub fn count(&self, action: UpgradeAction) -> usize {
        self.actions.get(&action).copied().unwrap_or(0)
    }

    /// Returns the total number of upgrade records
    pub fn total_upgrades(&self) -> usize {
        self.actions.values().sum()
    }

    /// Returns the number of records that call for a change
    pub fn actionable(&self) -> usize {
        self.total_upgrades() - self.count(UpgradeAction::None)
    }

    /// Returns true if any dependency could not be resolved
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}
