//! Build version descriptor and compatibility queries.
//!
//! The numeric triple, the short and long version strings and the platform
//! executable suffix are generated by the build script into `version.rs` and
//! included here, so this module is the single source of truth for the
//! library's identity. Everything below is a pure function over those
//! constants.
//!
//! ```
//! use vips_version::core::version::{self, BUILD_INFO};
//!
//! let (major, minor, _micro) = version::get_version_triple();
//! assert!(version::is_compatible_with(major, minor));
//! assert!(BUILD_INFO.version_string(true).starts_with(BUILD_INFO.version_string(false)));
//! ```

use super::error::{VersionError, VersionResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Separator between the short version and the build tag in the long string
const BUILD_TAG_SEPARATOR: char = '-';

/// A `major.minor.micro` version triple.
///
/// Ordering is lexicographic over `(major, minor, micro)`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    pub const fn triple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.micro)
    }

    /// Same major, and at least the required minor. Micro never matters.
    pub const fn satisfies(&self, required_major: u32, required_minor: u32) -> bool {
        self.major == required_major && self.minor >= required_minor
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from((major, minor, micro): (u32, u32, u32)) -> Self {
        Self::new(major, minor, micro)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_components(s)?;
        if parts.len() != 3 {
            return Err(VersionError::ComponentCount {
                expected: 3,
                count: parts.len(),
            });
        }
        Ok(Self::new(
            parse_component("major", parts[0])?,
            parse_component("minor", parts[1])?,
            parse_component("micro", parts[2])?,
        ))
    }
}

/// Split a dotted version string into its raw components
pub(crate) fn split_components(s: &str) -> VersionResult<Vec<&str>> {
    let s = s.trim();
    if s.is_empty() {
        return Err(VersionError::Empty);
    }
    Ok(s.split('.').collect())
}

/// Parse one decimal component: digits only, no sign, no leading zeros
pub(crate) fn parse_component(component: &'static str, value: &str) -> VersionResult<u32> {
    let invalid = || VersionError::InvalidComponent {
        component,
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if value.len() > 1 && value.starts_with('0') {
        return Err(invalid());
    }
    value.parse::<u32>().map_err(|_| invalid())
}

/// Identity of a library build.
///
/// The short and long strings are always derived from the numeric triple;
/// there is no way to set them independently. Equality, ordering and hashing
/// consider the triple only, so two descriptors with different build tags
/// compare equal when their versions match.
#[derive(Clone, Debug)]
pub struct VersionInfo {
    version: Version,
    short: Cow<'static, str>,
    long: Cow<'static, str>,
    exec_suffix: Cow<'static, str>,
}

/// The descriptor of this build, fixed at compile time
pub static BUILD_INFO: VersionInfo = VersionInfo {
    version: Version::new(VERSION_MAJOR, VERSION_MINOR, VERSION_MICRO),
    short: Cow::Borrowed(VERSION),
    long: Cow::Borrowed(VERSION_STRING),
    exec_suffix: Cow::Borrowed(EXEEXT),
};

impl VersionInfo {
    /// Describe a build other than this one.
    ///
    /// The long string is `"<short>-<build_tag>"`; the tag is kept verbatim.
    pub fn with_build_tag(
        version: Version,
        build_tag: impl AsRef<str>,
        exec_suffix: impl Into<String>,
    ) -> Self {
        let short = version.to_string();
        let long = format!("{}{}{}", short, BUILD_TAG_SEPARATOR, build_tag.as_ref());
        Self {
            version,
            short: Cow::Owned(short),
            long: Cow::Owned(long),
            exec_suffix: Cow::Owned(exec_suffix.into()),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn major(&self) -> u32 {
        self.version.major
    }

    pub fn minor(&self) -> u32 {
        self.version.minor
    }

    pub fn micro(&self) -> u32 {
        self.version.micro
    }

    pub fn triple(&self) -> (u32, u32, u32) {
        self.version.triple()
    }

    /// Short `"a.b.c"` string, or the long timestamped string when `verbose`
    pub fn version_string(&self, verbose: bool) -> &str {
        if verbose {
            &self.long
        } else {
            &self.short
        }
    }

    /// Opaque text following `"<short>-"` in the long string.
    ///
    /// Usually a build timestamp; its format is not stable and must not be parsed.
    pub fn build_tag(&self) -> &str {
        self.long
            .strip_prefix(&*self.short)
            .and_then(|rest| rest.strip_prefix(BUILD_TAG_SEPARATOR))
            .unwrap_or("")
    }

    pub fn platform_exec_suffix(&self) -> &str {
        &self.exec_suffix
    }

    /// Name of a generated executable on the target platform
    pub fn executable_name(&self, base: &str) -> String {
        format!("{}{}", base, self.exec_suffix)
    }

    pub fn is_compatible_with(&self, required_major: u32, required_minor: u32) -> bool {
        self.version.satisfies(required_major, required_minor)
    }

    pub fn compare(&self, other: &VersionInfo) -> Ordering {
        self.version.cmp(&other.version)
    }

    /// Component by index, as libvips' `vips_version()` exposes it
    pub fn component(&self, flag: usize) -> Option<u32> {
        match flag {
            0 => Some(self.version.major),
            1 => Some(self.version.minor),
            2 => Some(self.version.micro),
            _ => None,
        }
    }
}

impl PartialEq for VersionInfo {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for VersionInfo {}

impl PartialOrd for VersionInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for VersionInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short)
    }
}

impl Serialize for VersionInfo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Descriptor<'a> {
            major: u32,
            minor: u32,
            micro: u32,
            version: &'a str,
            version_string: &'a str,
            exec_suffix: &'a str,
        }

        Descriptor {
            major: self.version.major,
            minor: self.version.minor,
            micro: self.version.micro,
            version: &self.short,
            version_string: &self.long,
            exec_suffix: &self.exec_suffix,
        }
        .serialize(serializer)
    }
}

/// The build's `(major, minor, micro)`
pub fn get_version_triple() -> (u32, u32, u32) {
    BUILD_INFO.triple()
}

pub fn get_version_string(verbose: bool) -> &'static str {
    BUILD_INFO.version_string(verbose)
}

pub fn get_platform_exec_suffix() -> &'static str {
    BUILD_INFO.platform_exec_suffix()
}

pub fn is_compatible_with(required_major: u32, required_minor: u32) -> bool {
    BUILD_INFO.is_compatible_with(required_major, required_minor)
}

/// Order this build relative to `other`
pub fn compare(other: &VersionInfo) -> Ordering {
    BUILD_INFO.compare(other)
}

pub fn version_component(flag: usize) -> Option<u32> {
    BUILD_INFO.component(flag)
}

/// Compile-time form of [`is_compatible_with`], usable in `const` items.
pub const fn is_compatible(required_major: u32, required_minor: u32) -> bool {
    Version::new(VERSION_MAJOR, VERSION_MINOR, VERSION_MICRO)
        .satisfies(required_major, required_minor)
}

/// Fail compilation unless this library satisfies `major.minor`.
///
/// ```
/// vips_version::require_version!(7, 0);
/// ```
///
/// ```compile_fail
/// vips_version::require_version!(99, 0);
/// ```
#[macro_export]
macro_rules! require_version {
    ($major:expr, $minor:expr) => {
        const _: () = assert!(
            $crate::core::version::is_compatible($major, $minor),
            "linked vips-version does not satisfy the required major.minor"
        );
    };
}
