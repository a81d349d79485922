//! Core domain models for upgraph
//!
//! This module contains the fundamental types used throughout the application:
//! - NuGet versions and their parsing
//! - Version range constraints
//! - Packages, dependency declarations and target frameworks
//! - Upgrade classification results

mod dependency;
mod framework;
mod package;
mod upgrade;
mod version;
mod version_spec;

pub use dependency::{DependencyGroup, PackageDependency};
pub use framework::TargetFramework;
pub use package::Package;
pub use upgrade::{PackageUpgrade, UpgradeAction};
pub use version::{parse_version, NuGetVersion};
pub use version_spec::VersionSpec;
