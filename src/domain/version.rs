//! NuGet versions
//!
//! A NuGet version is a SemVer 2.0 version with an optional fourth numeric
//! component (`1.0.0.1`), still published by many legacy packages. Short
//! forms (`1`, `1.0`) are padded. Ordering follows SemVer precedence with the
//! revision sorted right after the patch number; build metadata never takes
//! part in comparisons.

use crate::error::VersionSpecError;
use semver::Prerelease;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A package version as published on a NuGet feed
#[derive(Debug, Clone)]
pub struct NuGetVersion {
    /// Major, minor and patch plus the prerelease and metadata labels
    version: semver::Version,
    revision: u64,
}

impl NuGetVersion {
    /// Creates a release version without revision
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            version: semver::Version::new(major, minor, patch),
            revision: 0,
        }
    }

    /// Set the fourth version component (builder pattern)
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Prerelease label, empty for releases
    pub fn prerelease(&self) -> &str {
        self.version.pre.as_str()
    }

    /// Build metadata, empty when absent
    pub fn metadata(&self) -> &str {
        self.version.build.as_str()
    }

    /// Returns true if the version carries no prerelease label
    pub fn is_release(&self) -> bool {
        self.version.pre.is_empty()
    }

    /// The normalized version followed by its build metadata, if any
    pub fn to_full_string(&self) -> String {
        if self.version.build.is_empty() {
            self.to_string()
        } else {
            format!("{}+{}", self, self.version.build)
        }
    }

    fn precedence(&self) -> (u64, u64, u64, u64, &Prerelease) {
        (
            self.version.major,
            self.version.minor,
            self.version.patch,
            self.revision,
            &self.version.pre,
        )
    }
}

impl PartialEq for NuGetVersion {
    fn eq(&self, other: &Self) -> bool {
        self.precedence() == other.precedence()
    }
}

impl Eq for NuGetVersion {}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// `Prerelease` orders an empty label above any non-empty one
impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl Hash for NuGetVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.precedence().hash(state);
    }
}

impl From<semver::Version> for NuGetVersion {
    fn from(version: semver::Version) -> Self {
        Self {
            version,
            revision: 0,
        }
    }
}

/// Normalized form: a zero revision and the build metadata are left out
impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        )?;
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        if !self.version.pre.is_empty() {
            write!(f, "-{}", self.version.pre)?;
        }
        Ok(())
    }
}

impl FromStr for NuGetVersion {
    type Err = VersionSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

impl Serialize for NuGetVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_full_string())
    }
}

impl<'de> Deserialize<'de> for NuGetVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_version(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a version with one to four numeric components and a leading `v` allowed
pub fn parse_version(value: &str) -> Result<NuGetVersion, VersionSpecError> {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(VersionSpecError::invalid_version(value, "empty version"));
    }

    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, labels) = trimmed.split_at(split_at);
    let numbers = core
        .split('.')
        .map(|part| {
            if part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse::<u64>().ok()
            } else {
                None
            }
        })
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(|| {
            VersionSpecError::invalid_version(value, "version components must be numbers")
        })?;

    let (major, minor, patch, revision) = match numbers.as_slice() {
        [major] => (*major, 0, 0, 0),
        [major, minor] => (*major, *minor, 0, 0),
        [major, minor, patch] => (*major, *minor, *patch, 0),
        [major, minor, patch, revision] => (*major, *minor, *patch, *revision),
        _ => {
            return Err(VersionSpecError::invalid_version(
                value,
                "expected at most four version components",
            ))
        }
    };

    // semver validates the prerelease and metadata labels
    let version = semver::Version::parse(&format!("{}.{}.{}{}", major, minor, patch, labels))
        .map_err(|e| VersionSpecError::invalid_version(value, e.to_string()))?;

    Ok(NuGetVersion { version, revision })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn v(s: &str) -> NuGetVersion {
        parse_version(s).unwrap()
    }

    #[test]
    fn test_parse_full_version() {
        assert_eq!(v("1.2.3"), NuGetVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_pads_short_versions() {
        assert_eq!(v("1"), NuGetVersion::new(1, 0, 0));
        assert_eq!(v("1.5"), NuGetVersion::new(1, 5, 0));
    }

    #[test]
    fn test_parse_pads_short_prerelease() {
        let version = v("2.0-beta");
        assert_eq!(version.to_string(), "2.0.0-beta");
        assert_eq!(version.prerelease(), "beta");
        assert!(!version.is_release());
    }

    #[test]
    fn test_parse_strips_v_prefix() {
        assert_eq!(v("v3.1.0"), NuGetVersion::new(3, 1, 0));
    }

    #[test]
    fn test_parse_four_part_version() {
        let version = v("1.0.0.1");
        assert_eq!(version, NuGetVersion::new(1, 0, 0).with_revision(1));
        assert_eq!(version.revision(), 1);
        assert_eq!(version.to_string(), "1.0.0.1");
        assert!(version.is_release());
    }

    #[test]
    fn test_zero_revision_is_normalized_away() {
        let version = v("4.0.0.0");
        assert_eq!(version, NuGetVersion::new(4, 0, 0));
        assert_eq!(version.to_string(), "4.0.0");
    }

    #[test]
    fn test_four_part_prerelease() {
        let version = v("2.1.0.3-preview1");
        assert_eq!(version.to_string(), "2.1.0.3-preview1");
        assert!(version < v("2.1.0.3"));
        assert!(version > v("2.1.0.2"));
    }

    #[test]
    fn test_revision_orders_between_patches() {
        assert!(v("1.0.0") < v("1.0.0.1"));
        assert!(v("1.0.0.1") < v("1.0.0.2"));
        assert!(v("1.0.0.9") < v("1.0.1"));
    }

    #[test]
    fn test_build_metadata_is_ignored_in_comparisons() {
        let tagged = v("1.0.0+sha.abc");
        assert_eq!(tagged, v("1.0.0"));
        assert_eq!(tagged.cmp(&v("1.0.0+other")), Ordering::Equal);
        assert!(tagged < v("1.0.1"));

        let set: HashSet<NuGetVersion> = [v("1.0.0"), tagged].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_build_metadata_kept_in_full_string() {
        let tagged = v("1.0.0-rc.1+sha.abc");
        assert_eq!(tagged.metadata(), "sha.abc");
        assert_eq!(tagged.to_string(), "1.0.0-rc.1");
        assert_eq!(tagged.to_full_string(), "1.0.0-rc.1+sha.abc");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["one.two", "1..0", "-beta", "1.0.0.0.1", "1.0.0-"] {
            let err = parse_version(input).unwrap_err();
            assert!(
                matches!(err, VersionSpecError::InvalidVersion { .. }),
                "expected InvalidVersion for {input}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_version("  ").is_err());
    }

    #[test]
    fn test_prerelease_ordering() {
        assert!(v("1.0.0-alpha") < v("1.0.0-beta"));
        assert!(v("1.0.0-beta") < v("1.0.0"));
        assert!(v("1.0.0-beta.2") < v("1.0.0-beta.11"));
    }

    #[test]
    fn test_from_semver() {
        let version = NuGetVersion::from(semver::Version::new(2, 0, 0));
        assert_eq!(version, v("2.0"));
        assert_eq!(version.revision(), 0);
    }

    #[test]
    fn test_serde_keeps_metadata() {
        let json = serde_json::to_string(&v("1.0.0.5+build.7")).unwrap();
        assert_eq!(json, "\"1.0.0.5+build.7\"");
        let parsed: NuGetVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metadata(), "build.7");
        assert_eq!(parsed.revision(), 5);
    }
}
