//! Upgrade classification for package dependencies
//!
//! This module provides:
//! - The classifier that rates the risk of moving a constraint to a candidate
//! - The walker that resolves every dependency of a package against a catalog
//! - Run-level summary counts

mod classifier;
mod summary;
mod walker;

pub use classifier::classify;
pub use summary::UpgradeSummary;
pub use walker::UpgradeWalker;
