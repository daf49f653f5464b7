//! Version string comparison
//!
//! Parses version-like strings (`1.2`, `v2.0.1`, `1.0.0-rc.1+build.7`) into a
//! [`Version`] with a total order.
//!
//! Parsing rule:
//!
//! - an optional leading `v` or `V`
//! - one or more dot separated release components, each an unsigned integer
//! - an optional `-` followed by dot separated pre-release identifiers
//!   (`[0-9A-Za-z-]+`)
//! - an optional `+` followed by build metadata, which is ignored
//!
//! Trailing zero release components do not take part in comparison, so `1.0`
//! and `1.0.0` are equal. Pre-release ordering follows semantic versioning: a
//! pre-release sorts before its release, numeric identifiers compare by value
//! and sort before alphanumeric ones, and a shorter identifier list sorts first
//! when it is a prefix of the longer one.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A single pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Identifier {
    Numeric(u64),
    Alphanumeric(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alphanumeric(s) => f.write_str(s),
        }
    }
}

/// A parsed version
#[derive(Debug, Clone)]
pub struct Version {
    /// Release components with trailing zeros removed
    release: Vec<u64>,
    pre: Vec<Identifier>,
    /// Number of release components as written, for display
    width: usize,
}

impl Version {
    /// Parse a version string
    pub fn parse(input: &str) -> Result<Self, SharedError> {
        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        // Build metadata never affects ordering.
        let body = match body.split_once('+') {
            Some((head, build)) => {
                if build.is_empty() {
                    return Err(SharedError::parse(input, "empty build metadata"));
                }
                head
            }
            None => body,
        };

        let (release_part, pre_part) = match body.split_once('-') {
            Some((release, pre)) => (release, Some(pre)),
            None => (body, None),
        };

        if release_part.is_empty() {
            return Err(SharedError::parse(input, "missing release number"));
        }

        let mut release = Vec::new();
        for component in release_part.split('.') {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SharedError::parse(
                    input,
                    format!("release component '{}' is not a number", component),
                ));
            }
            let value = component
                .parse::<u64>()
                .map_err(|_| SharedError::parse(input, "release component out of range"))?;
            release.push(value);
        }
        let width = release.len();
        while release.last() == Some(&0) {
            release.pop();
        }

        let mut pre = Vec::new();
        if let Some(pre_part) = pre_part {
            for ident in pre_part.split('.') {
                if ident.is_empty()
                    || !ident.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
                {
                    return Err(SharedError::parse(
                        input,
                        format!("invalid pre-release identifier '{}'", ident),
                    ));
                }
                if ident.bytes().all(|b| b.is_ascii_digit()) {
                    let value = ident.parse::<u64>().map_err(|_| {
                        SharedError::parse(input, "pre-release number out of range")
                    })?;
                    pre.push(Identifier::Numeric(value));
                } else {
                    pre.push(Identifier::Alphanumeric(ident.to_string()));
                }
            }
        }

        Ok(Self {
            release,
            pre,
            width,
        })
    }
}

impl FromStr for Version {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = (0..self.width.max(1))
            .map(|i| self.release.get(i).copied().unwrap_or(0).to_string())
            .collect();
        f.write_str(&parts.join("."))?;
        if !self.pre.is_empty() {
            let pre: Vec<String> = self.pre.iter().map(|p| p.to_string()).collect();
            write!(f, "-{}", pre.join("."))?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release.cmp(&other.release).then_with(|| {
            match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            }
        })
    }
}

/// Result of comparing two versions, as reported over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    Greater,
    Less,
    Equal,
}

impl From<Ordering> for VersionOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => VersionOrdering::Greater,
            Ordering::Less => VersionOrdering::Less,
            Ordering::Equal => VersionOrdering::Equal,
        }
    }
}

/// Compare two version strings
///
/// Fails with [`SharedError::ParseError`] if either side is malformed.
///
/// ```rust
/// use std::cmp::Ordering;
/// use docvault::shared::version::compare_versions;
///
/// assert_eq!(compare_versions("1.10", "1.9").unwrap(), Ordering::Greater);
/// assert_eq!(compare_versions("1.0", "1.0.0").unwrap(), Ordering::Equal);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, SharedError> {
    let a = Version::parse(a)?;
    let b = Version::parse(b)?;
    Ok(a.cmp(&b))
}
