//! Platform version parsing and ordering.
//!
//! Versions look like `major.minor.patch[suffix]`, e.g. `4.10.0` or
//! `4.10.0-rc1`. Ordering only looks at the numeric triple; equality also
//! requires the canonical strings to match, so a pre-release and its final
//! release order the same but are not equal.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use thiserror::Error;

/// Error returned when a version string does not have the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not parse version '{0}'")]
pub struct ParseVersionError(pub String);

/// A parsed platform version.
#[derive(Debug, Clone, Default, Hash)]
pub struct Version {
    triple: [u32; 3],
    suffix: String,
}

impl Version {
    /// Build a version from its numeric parts with no suffix.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            triple: [major, minor, patch],
            suffix: String::new(),
        }
    }

    /// Parse `major.minor.patch[suffix]`.
    pub fn parse(s: &str) -> Result<Self, ParseVersionError> {
        static VERSION_RE: LazyLock<Option<regex::Regex>> =
            LazyLock::new(|| regex::Regex::new(r"^(\d+)\.(\d+)\.(\d+)(.*)$").ok());

        let caps = VERSION_RE
            .as_ref()
            .and_then(|re| re.captures(s))
            .ok_or_else(|| ParseVersionError(s.to_string()))?;

        let mut triple = [0u32; 3];
        for (slot, group) in triple.iter_mut().zip(1..=3) {
            *slot = caps
                .get(group)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| ParseVersionError(s.to_string()))?;
        }

        Ok(Self {
            triple,
            suffix: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    pub fn major(&self) -> u32 {
        self.triple[0]
    }

    pub fn minor(&self) -> u32 {
        self.triple[1]
    }

    pub fn patch(&self) -> u32 {
        self.triple[2]
    }

    /// Free-text suffix following the patch number (may be empty).
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Strictly older, comparing only the numeric triple.
    pub fn lt(&self, other: &Version) -> bool {
        self.triple < other.triple
    }

    /// Strictly newer, comparing only the numeric triple.
    pub fn gt(&self, other: &Version) -> bool {
        self.triple > other.triple
    }

    /// Major and minor only, e.g. `4.10`.
    pub fn minor_version(&self) -> String {
        format!("{}.{}", self.major(), self.minor())
    }

    /// True when this version is at least `minimum` by triple.
    pub fn at_least(&self, minimum: &Version) -> bool {
        !self.lt(minimum)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch] = self.triple;
        write!(f, "{major}.{minor}.{patch}{}", self.suffix)
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

/// Same triple and same canonical string, suffix included. Unlike `lt` and
/// `gt`, the suffix matters here.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.triple == other.triple && self.to_string() == other.to_string()
    }
}

impl Eq for Version {}
