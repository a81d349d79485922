//! Target framework monikers used to filter dependency groups
//!
//! Only the .NET Framework, .NET Standard and .NET (Core) lines are
//! understood for compatibility; other monikers match only themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moniker matching every framework
const ANY_FRAMEWORK: &str = "any";

/// A target framework moniker such as `net8.0` or `netstandard2.0`
///
/// Monikers compare case-insensitively. Long framework names as found in
/// feed metadata (`.NETStandard2.0`, `.NETFramework4.5`) are folded into
/// their short form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TargetFramework(String);

impl TargetFramework {
    /// Creates a framework from a moniker
    pub fn new(moniker: impl AsRef<str>) -> Self {
        Self(normalize(moniker.as_ref()))
    }

    /// The framework that every dependency group is compatible with
    pub fn any() -> Self {
        Self(ANY_FRAMEWORK.to_string())
    }

    /// Returns true if this is the catch-all framework
    pub fn is_any(&self) -> bool {
        self.0 == ANY_FRAMEWORK
    }

    /// The normalized moniker
    pub fn moniker(&self) -> &str {
        &self.0
    }
}

impl TargetFramework {
    /// Returns true if a package built for `group` can be consumed by a
    /// project targeting this framework
    ///
    /// Within a family a group applies to every later version; `netstandard`
    /// groups also apply to the .NET Framework and .NET (Core) versions that
    /// implement them. Unrecognized monikers only match themselves.
    pub fn supports(&self, group: &TargetFramework) -> bool {
        self.affinity(group).is_some()
    }

    /// The group framework a project targeting this framework should use
    ///
    /// Groups of the project's own family win over `netstandard` ones, then
    /// the highest compatible version wins.
    pub fn nearest<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a TargetFramework>,
    ) -> Option<&'a TargetFramework> {
        groups
            .into_iter()
            .filter_map(|group| self.affinity(group).map(|rank| (rank, group)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, group)| group)
    }

    // Higher is nearer; `None` when incompatible
    fn affinity(&self, group: &TargetFramework) -> Option<(u8, FrameworkVersion)> {
        if self == group {
            return Some((3, EXACT_MATCH));
        }
        let (Some(project), Some(candidate)) = (Moniker::parse(&self.0), Moniker::parse(&group.0))
        else {
            return None;
        };
        if candidate.platform.is_some() && candidate.platform != project.platform {
            return None;
        }

        if candidate.family == project.family {
            return (candidate.version <= project.version).then_some((2, candidate.version));
        }
        if candidate.family == Family::NetStandard {
            let implemented = project.implemented_netstandard()?;
            return (candidate.version <= implemented).then_some((1, candidate.version));
        }
        None
    }
}

/// `(major, minor, patch)` of a framework version
type FrameworkVersion = (u32, u32, u32);

const EXACT_MATCH: FrameworkVersion = (u32::MAX, u32::MAX, u32::MAX);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    NetFramework,
    NetStandard,
    // .NET Core and .NET 5 onwards
    NetCoreApp,
}

#[derive(Debug, PartialEq, Eq)]
struct Moniker<'a> {
    family: Family,
    version: FrameworkVersion,
    platform: Option<&'a str>,
}

impl<'a> Moniker<'a> {
    fn parse(moniker: &'a str) -> Option<Self> {
        let (base, platform) = match moniker.split_once('-') {
            Some((base, platform)) => (base, Some(platform)),
            None => (moniker, None),
        };

        let (family, version) = if let Some(rest) = base.strip_prefix("netstandard") {
            (Family::NetStandard, dotted(rest)?)
        } else if let Some(rest) = base.strip_prefix("netcoreapp") {
            (Family::NetCoreApp, dotted(rest)?)
        } else if let Some(rest) = base.strip_prefix("net") {
            if rest.contains('.') {
                let version = dotted(rest)?;
                let family = if version.0 >= 5 {
                    Family::NetCoreApp
                } else {
                    Family::NetFramework
                };
                (family, version)
            } else {
                (Family::NetFramework, compact(rest)?)
            }
        } else {
            return None;
        };

        Some(Self {
            family,
            version,
            platform,
        })
    }

    /// Highest netstandard version this framework implements
    fn implemented_netstandard(&self) -> Option<FrameworkVersion> {
        let v = self.version;
        match self.family {
            Family::NetStandard => Some(v),
            Family::NetCoreApp if v >= (3, 0, 0) => Some((2, 1, 0)),
            Family::NetCoreApp if v >= (2, 0, 0) => Some((2, 0, 0)),
            Family::NetCoreApp => Some((1, 6, 0)),
            Family::NetFramework if v >= (4, 6, 1) => Some((2, 0, 0)),
            Family::NetFramework if v >= (4, 6, 0) => Some((1, 3, 0)),
            Family::NetFramework if v >= (4, 5, 1) => Some((1, 2, 0)),
            Family::NetFramework if v >= (4, 5, 0) => Some((1, 1, 0)),
            Family::NetFramework => None,
        }
    }
}

// "2.0", "8.0", "3.1.2"
fn dotted(version: &str) -> Option<FrameworkVersion> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let major = parts.next()??;
    let minor = parts.next().unwrap_or(Some(0))?;
    let patch = parts.next().unwrap_or(Some(0))?;
    parts.next().is_none().then_some((major, minor, patch))
}

// "45", "472", "48": one digit per component
fn compact(version: &str) -> Option<FrameworkVersion> {
    let digits: Vec<u32> = version.chars().map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    match digits.as_slice() {
        [major] => Some((*major, 0, 0)),
        [major, minor] => Some((*major, *minor, 0)),
        [major, minor, patch] => Some((*major, *minor, *patch)),
        _ => None,
    }
}

fn normalize(moniker: &str) -> String {
    let lower = moniker.trim().to_ascii_lowercase();
    if let Some(version) = lower.strip_prefix(".netframework") {
        return format!("net{}", version.replace('.', ""));
    }
    for family in ["netstandard", "netcoreapp"] {
        if let Some(version) = lower.strip_prefix(&format!(".{}", family)) {
            return format!("{}{}", family, version);
        }
    }
    lower
}

impl From<String> for TargetFramework {
    fn from(moniker: String) -> Self {
        Self::new(moniker)
    }
}

impl From<TargetFramework> for String {
    fn from(framework: TargetFramework) -> Self {
        framework.0
    }
}

impl FromStr for TargetFramework {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
