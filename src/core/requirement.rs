//! Dependent-side compatibility requirements
//!
//! A [`Requirement`] is what a binding or plugin asks of the library:
//! a major version and a minimum minor version. Checking it against a
//! [`VersionInfo`] yields a [`Compatibility`] verdict; deciding what to do
//! with an incompatible verdict is left to the caller.

use super::error::{VersionError, VersionResult};
use super::version::{parse_component, split_components, VersionInfo};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Required `major` plus minimum `minor`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Requirement {
    pub major: u32,
    pub minor: u32,
}

/// Outcome of checking a [`Requirement`] against a build
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Compatibility {
    Compatible,
    /// Majors differ; any difference is breaking
    MajorMismatch { required: u32, found: u32 },
    /// Same major but the build predates the required additions
    MinorTooOld { required: u32, found: u32 },
}

impl Requirement {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn check(&self, info: &VersionInfo) -> Compatibility {
        let verdict = if info.major() != self.major {
            Compatibility::MajorMismatch {
                required: self.major,
                found: info.major(),
            }
        } else if info.minor() < self.minor {
            Compatibility::MinorTooOld {
                required: self.minor,
                found: info.minor(),
            }
        } else {
            Compatibility::Compatible
        };
        log::debug!("Requirement {} against {}: {}", self, info, verdict);
        verdict
    }

    pub fn is_satisfied_by(&self, info: &VersionInfo) -> bool {
        self.check(info).is_compatible()
    }
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Compatibility::Compatible)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::Compatible => write!(f, "compatible"),
            Compatibility::MajorMismatch { required, found } => write!(
                f,
                "incompatible: major version {} required, found {}",
                required, found
            ),
            Compatibility::MinorTooOld { required, found } => write!(
                f,
                "incompatible: minor version {} or newer required, found {}",
                required, found
            ),
        }
    }
}

/// Accepts `MAJOR`, `MAJOR.MINOR` or `MAJOR.MINOR.MICRO`.
///
/// A missing minor means any minor; a micro is validated and then ignored.
impl FromStr for Requirement {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_components(s)?;
        if parts.len() > 3 {
            return Err(VersionError::TooManyComponents { count: parts.len() });
        }

        let major = parse_component("major", parts[0])?;
        let minor = match parts.get(1) {
            Some(value) => parse_component("minor", value)?,
            None => 0,
        };
        if let Some(value) = parts.get(2) {
            parse_component("micro", value)?;
        }
        Ok(Self::new(major, minor))
    }
}

/// Parse and check in one step
pub fn check_requirement(requirement: &str, info: &VersionInfo) -> VersionResult<Compatibility> {
    Ok(requirement.parse::<Requirement>()?.check(info))
}
