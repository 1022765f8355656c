use crate::error::{IncverError, Result};
use std::fmt;

/// A project version with two or three numeric components.
///
/// Versions are plain dotted integers (major.minor or major.minor.patch).
/// Parsing keeps the component count, so a two-component version formats back
/// to exactly the string it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl Version {
    /// Create a new three-component version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Parse a dotted version string (e.g., "1.2.3" or "1.2")
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(IncverError::version(format!(
                "Invalid version format: '{}' - expected X.Y or X.Y.Z",
                text
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| IncverError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| IncverError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = match parts.get(2) {
            Some(p) => Some(
                p.parse::<u32>()
                    .map_err(|_| IncverError::version(format!("Invalid patch version: {}", p)))?,
            ),
            None => None,
        };

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump the version according to the bump kind.
    ///
    /// - Major: increment major, reset minor and patch to 0
    /// - Minor: increment minor, reset patch to 0
    /// - Patch: increment patch (a missing patch component counts as 0)
    pub fn bump(&self, kind: BumpKind) -> Self {
        match kind {
            BumpKind::Major => Version {
                major: self.major + 1,
                minor: 0,
                patch: self.patch.map(|_| 0),
            },
            BumpKind::Minor => Version {
                major: self.major,
                minor: self.minor + 1,
                patch: self.patch.map(|_| 0),
            },
            BumpKind::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: Some(self.patch.unwrap_or(0) + 1),
            },
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Which version component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpKind {
    Major,
    Minor,
    #[default]
    Patch,
}
