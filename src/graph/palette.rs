//! Colors used when drawing upgrade graphs
//!
//! Color values are diagram color names (`ForestGreen`) or `#RRGGBB` strings;
//! they are passed through to the output format unchanged.

use crate::domain::UpgradeAction;
use serde::{Deserialize, Serialize};

/// Link stroke color for every upgrade action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPalette {
    pub none: String,
    pub min_version: String,
    pub release_to_release: String,
    pub prerelease_to_release: String,
    pub prerelease_to_prerelease: String,
    pub release_to_prerelease: String,
    pub unknown: String,
}

impl Default for ActionPalette {
    fn default() -> Self {
        Self {
            none: "Black".to_string(),
            min_version: "ForestGreen".to_string(),
            release_to_release: "Goldenrod".to_string(),
            prerelease_to_release: "DarkOrange".to_string(),
            prerelease_to_prerelease: "OrangeRed".to_string(),
            release_to_prerelease: "Firebrick".to_string(),
            unknown: "DarkGray".to_string(),
        }
    }
}

impl ActionPalette {
    /// Returns the stroke color for `action`
    pub fn color(&self, action: UpgradeAction) -> &str {
        match action {
            UpgradeAction::None => &self.none,
            UpgradeAction::MinVersion => &self.min_version,
            UpgradeAction::ReleaseToRelease => &self.release_to_release,
            UpgradeAction::PrereleaseToRelease => &self.prerelease_to_release,
            UpgradeAction::PrereleaseToPrerelease => &self.prerelease_to_prerelease,
            UpgradeAction::ReleaseToPrerelease => &self.release_to_prerelease,
            UpgradeAction::Unknown => &self.unknown,
        }
    }
}

/// Link and node styling for upgrade graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphPalette {
    pub actions: ActionPalette,
    /// Background of nodes for prerelease packages
    pub prerelease_background: String,
    /// Stroke of nodes for dependencies missing from the catalog
    pub missing_package_stroke: String,
    pub missing_package_stroke_thickness: f64,
}

impl Default for GraphPalette {
    fn default() -> Self {
        Self {
            actions: ActionPalette::default(),
            prerelease_background: "Gainsboro".to_string(),
            missing_package_stroke: "Red".to_string(),
            missing_package_stroke_thickness: 2.0,
        }
    }
}
