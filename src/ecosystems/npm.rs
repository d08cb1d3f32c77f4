//! npm ecosystem.
//!
//! Delegates to the `node-semver` crate, a direct port of npm's own
//! `node-semver` JavaScript package, for both version parsing and the full
//! range grammar (`||` OR, comma/space AND, caret, tilde, hyphen ranges,
//! `x`/`*` wildcards). Re-implementing that grammar by hand would just be a
//! worse copy of what the crate already gets right, and the teacher
//! workspace already reaches for it in `deps-npm`.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Version {
    inner: node_semver::Version,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let inner = node_semver::Version::from_str(trimmed)
            .map_err(|e| ParseError::invalid_format(trimmed, e.to_string()))?;
        Ok(Self {
            inner,
            original: input.to_string(),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
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
        self.inner.cmp(&other.inner)
    }
}

#[derive(Debug, Clone)]
pub struct Range {
    inner: node_semver::Range,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let inner = node_semver::Range::parse(trimmed)
            .map_err(|e| ParseError::malformed_range(trimmed, e.to_string()))?;
        Ok(Self {
            inner,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.inner.satisfies(&version.inner)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_admits_minor_and_patch_bumps() {
        let range = Range::parse("^1.2.3").unwrap();
        assert!(range.contains(&Version::parse("1.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.0").unwrap()));
    }

    #[test]
    fn tilde_admits_patch_bumps_only() {
        let range = Range::parse("~1.2.3").unwrap();
        assert!(range.contains(&Version::parse("1.2.4").unwrap()));
        assert!(!range.contains(&Version::parse("1.3.0").unwrap()));
    }

    #[test]
    fn or_groups_via_pipe() {
        let range = Range::parse("1.x || >=2.0.0 <3.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.9.9").unwrap()));
        assert!(range.contains(&Version::parse("2.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("3.0.0").unwrap()));
    }

    #[test]
    fn hyphen_range() {
        let range = Range::parse("1.2.3 - 2.3.4").unwrap();
        assert!(range.contains(&Version::parse("2.0.0").unwrap()));
        assert!(!range.contains(&Version::parse("2.3.5").unwrap()));
    }
}
