//! Version range constraints
//!
//! A `VersionSpec` is an interval over NuGet versions with optional,
//! independently inclusive bounds. It reads and prints the NuGet interval
//! notation:
//! - `1.0.0`: at least 1.0.0
//! - `[1.0.0]`: exactly 1.0.0
//! - `[1.0.0, 2.0.0)`: at least 1.0.0, below 2.0.0
//! - `(, 1.0.0]`: at most 1.0.0

use super::version::{parse_version, NuGetVersion};
use crate::error::VersionSpecError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A version constraint with optional lower and upper bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VersionSpec {
    min_version: Option<NuGetVersion>,
    max_version: Option<NuGetVersion>,
    is_min_inclusive: bool,
    is_max_inclusive: bool,
}

impl VersionSpec {
    /// A spec accepting every version
    pub fn any() -> Self {
        Self::default()
    }

    /// A spec accepting exactly one version (`[v]`)
    pub fn exact(version: NuGetVersion) -> Self {
        Self {
            min_version: Some(version.clone()),
            max_version: Some(version),
            is_min_inclusive: true,
            is_max_inclusive: true,
        }
    }

    /// A spec accepting the version and everything above it (`v`)
    pub fn at_least(version: NuGetVersion) -> Self {
        Self {
            min_version: Some(version),
            max_version: None,
            is_min_inclusive: true,
            is_max_inclusive: false,
        }
    }

    /// A spec with explicit bounds
    ///
    /// Fails when the bounds describe an empty interval.
    pub fn range(
        min_version: Option<NuGetVersion>,
        max_version: Option<NuGetVersion>,
        is_min_inclusive: bool,
        is_max_inclusive: bool,
    ) -> Result<Self, VersionSpecError> {
        let spec = Self {
            min_version,
            max_version,
            is_min_inclusive,
            is_max_inclusive,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn min_version(&self) -> Option<&NuGetVersion> {
        self.min_version.as_ref()
    }

    pub fn max_version(&self) -> Option<&NuGetVersion> {
        self.max_version.as_ref()
    }

    pub fn is_min_inclusive(&self) -> bool {
        self.is_min_inclusive
    }

    pub fn is_max_inclusive(&self) -> bool {
        self.is_max_inclusive
    }

    /// Returns true if the version lies within the bounds, honoring inclusivity
    pub fn satisfies(&self, version: &NuGetVersion) -> bool {
        let above_min = match &self.min_version {
            Some(min) if self.is_min_inclusive => version >= min,
            Some(min) => version > min,
            None => true,
        };
        let below_max = match &self.max_version {
            Some(max) if self.is_max_inclusive => version <= max,
            Some(max) => version < max,
            None => true,
        };
        above_min && below_max
    }

    fn validate(&self) -> Result<(), VersionSpecError> {
        if let (Some(min), Some(max)) = (&self.min_version, &self.max_version) {
            if min > max {
                return Err(VersionSpecError::invalid_range(
                    self.to_string(),
                    "minimum version exceeds maximum version",
                ));
            }
            if min == max && !(self.is_min_inclusive && self.is_max_inclusive) {
                return Err(VersionSpecError::invalid_range(
                    self.to_string(),
                    "equal bounds must both be inclusive",
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = &self.min_version {
            if self.is_min_inclusive && self.max_version.is_none() && !self.is_max_inclusive {
                return write!(f, "{}", min);
            }
            if self.max_version.as_ref() == Some(min)
                && self.is_min_inclusive
                && self.is_max_inclusive
            {
                return write!(f, "[{}]", min);
            }
        }

        let open = if self.is_min_inclusive { '[' } else { '(' };
        let close = if self.is_max_inclusive { ']' } else { ')' };
        let min = self
            .min_version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let max = self
            .max_version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        write!(f, "{}{}, {}{}", open, min, max, close)
    }
}

impl FromStr for VersionSpec {
    type Err = VersionSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Ok(Self::any());
        }

        let is_min_inclusive = match trimmed.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => {
                let version = parse_version(trimmed)
                    .map_err(|e| VersionSpecError::invalid_range(value, e.to_string()))?;
                return Ok(Self::at_least(version));
            }
        };
        let is_max_inclusive = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => {
                return Err(VersionSpecError::invalid_range(
                    value,
                    "missing closing bracket",
                ))
            }
        };

        let inner = &trimmed[1..trimmed.len() - 1];
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let bound = |part: &str| -> Result<Option<NuGetVersion>, VersionSpecError> {
            if part.is_empty() {
                Ok(None)
            } else {
                parse_version(part)
                    .map(Some)
                    .map_err(|e| VersionSpecError::invalid_range(value, e.to_string()))
            }
        };

        match parts.as_slice() {
            [single] => {
                if !(is_min_inclusive && is_max_inclusive) {
                    return Err(VersionSpecError::invalid_range(
                        value,
                        "an exact version must use square brackets",
                    ));
                }
                match bound(single)? {
                    Some(version) => Ok(Self::exact(version)),
                    None => Err(VersionSpecError::invalid_range(value, "empty exact version")),
                }
            }
            [min, max] => {
                let min_version = bound(min)?;
                let max_version = bound(max)?;
                if min_version.is_none() && max_version.is_none() {
                    return Err(VersionSpecError::invalid_range(
                        value,
                        "at least one bound is required",
                    ));
                }
                Self::range(min_version, max_version, is_min_inclusive, is_max_inclusive)
                    .map_err(|e| match e {
                        VersionSpecError::InvalidRange { message, .. } => {
                            VersionSpecError::invalid_range(value, message)
                        }
                        other => other,
                    })
            }
            _ => Err(VersionSpecError::invalid_range(
                value,
                "expected at most two bounds",
            )),
        }
    }
}

impl Serialize for VersionSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
