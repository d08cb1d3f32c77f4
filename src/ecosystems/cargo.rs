//! Cargo (crates.io) ecosystem.
//!
//! Cargo's version grammar is SemVer 2.0.0 verbatim, so this module reuses
//! [`super::semver::Version`] rather than re-implementing precedence. Its
//! range grammar — caret by default, `~`, wildcards, comma-separated AND,
//! comparators — is exactly what `semver::VersionReq` already parses and
//! evaluates (including the prerelease-exclusion rule from spec.md §4.3),
//! so the range side delegates to it directly. This mirrors how heavily the
//! teacher workspace leaned on the `semver` crate for all things Cargo.

pub use super::semver::Version;
use crate::error::{trim_and_check, ParseError};

pub fn parse_version(input: &str) -> Result<Version, ParseError> {
    Version::parse(input)
}

#[derive(Debug, Clone)]
pub struct Range {
    req: semver::VersionReq,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let req = semver::VersionReq::parse(trimmed)
            .map_err(|e| ParseError::malformed_range(trimmed, e.to_string()))?;
        Ok(Self {
            req,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.req.matches(&version.inner)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_range_basic() {
        let range = Range::parse("^1.2.3").unwrap();
        assert!(range.contains(&parse_version("1.5.0").unwrap()));
        assert!(!range.contains(&parse_version("2.0.0").unwrap()));
    }

    #[test]
    fn tilde_range_basic() {
        let range = Range::parse("~1.2.3").unwrap();
        assert!(range.contains(&parse_version("1.2.9").unwrap()));
        assert!(!range.contains(&parse_version("1.3.0").unwrap()));
    }

    #[test]
    fn comma_separated_and() {
        let range = Range::parse(">=1.0.0, <1.5.0").unwrap();
        assert!(range.contains(&parse_version("1.2.0").unwrap()));
        assert!(!range.contains(&parse_version("1.5.0").unwrap()));
    }

    #[test]
    fn rejects_malformed_range() {
        assert!(Range::parse(">=").is_err());
    }
}
