//! Go modules ecosystem.
//!
//! Release versions (`vX.Y.Z[-pre][+build]`) are SemVer 2.0.0 once the
//! leading `v` is stripped, including pseudo-versions: a pseudo-version's
//! `-0.<timestamp>-<hash>` or `-<timestamp>-<hash>` suffix is itself a
//! syntactically valid SemVer prerelease identifier, so standard SemVer
//! precedence already ranks it below the release it precedes and above any
//! lower patch release — which is exactly spec.md §3's pseudo-version
//! ordering rule. This module therefore reuses `semver::Version` for
//! comparison (as the teacher's `deps-go/src/version.rs` does internally
//! via its own `parse_semver` helper) and adds pseudo-version shape
//! detection on top, grounded on that same file's regex.

use crate::error::{trim_and_check, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

static PSEUDO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v[0-9]+\.(0\.0-|\d+\.\d+-([^+]*\.)?0\.)\d{14}-[0-9A-Za-z]+(\+.*)?$").unwrap()
});

#[derive(Debug, Clone)]
pub struct Version {
    inner: semver::Version,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let without_v = trimmed
            .strip_prefix('v')
            .ok_or_else(|| ParseError::invalid_format(trimmed, "Go module versions require a leading 'v'"))?;
        let inner = semver::Version::parse(without_v)
            .map_err(|e| ParseError::invalid_format(trimmed, e.to_string()))?;
        Ok(Self {
            inner,
            original: input.to_string(),
        })
    }

    /// Whether this version string is a pseudo-version (spec.md §3/§4.2).
    pub fn is_pseudo_version(&self) -> bool {
        PSEUDO_REGEX.is_match(&self.original)
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

/// Checks whether a raw version string (with leading `v`) is a pseudo-version.
pub fn is_pseudo_version(version: &str) -> bool {
    PSEUDO_REGEX.is_match(version)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn satisfied_by(self, ord: Ordering) -> bool {
        match self {
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
        }
    }
}

/// Space-separated AND of comparators; a bare version means equality
/// (spec.md §4.3: "Go modules: space-separated comparators (AND); a bare
/// version means `= V`").
#[derive(Debug, Clone)]
pub struct Range {
    constraints: Vec<(Op, Version)>,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let mut constraints = Vec::new();
        for atom in trimmed.split_whitespace() {
            let (op, rest) = if let Some(r) = atom.strip_prefix(">=") {
                (Op::Ge, r)
            } else if let Some(r) = atom.strip_prefix("<=") {
                (Op::Le, r)
            } else if let Some(r) = atom.strip_prefix("!=") {
                (Op::Ne, r)
            } else if let Some(r) = atom.strip_prefix('>') {
                (Op::Gt, r)
            } else if let Some(r) = atom.strip_prefix('<') {
                (Op::Lt, r)
            } else if let Some(r) = atom.strip_prefix('=') {
                (Op::Eq, r)
            } else {
                (Op::Eq, atom)
            };
            if rest.is_empty() {
                return Err(ParseError::missing_version(trimmed));
            }
            constraints.push((op, Version::parse(rest)?));
        }
        if constraints.is_empty() {
            return Err(ParseError::malformed_range(trimmed, "no constraints found"));
        }
        Ok(Self {
            constraints,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.constraints
            .iter()
            .all(|(op, bound)| op.satisfied_by(version.inner.cmp(&bound.inner)))
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
    fn pseudo_version_precedes_its_release() {
        let pseudo = Version::parse("v1.2.3-0.20170915032832-14c0d48ead0c").unwrap();
        let release = Version::parse("v1.2.3").unwrap();
        assert_eq!(pseudo.cmp(&release), Ordering::Less);
    }

    #[test]
    fn pseudo_detection() {
        assert!(is_pseudo_version("v0.0.0-20191109021931-daa7c04131f5"));
        assert!(!is_pseudo_version("v1.2.3"));
        assert!(!is_pseudo_version("v1.2.3-beta.1"));
    }

    #[test]
    fn incompatible_suffix_ignored_for_ordering() {
        let a = Version::parse("v2.0.0+incompatible").unwrap();
        let b = Version::parse("v2.0.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn requires_leading_v() {
        assert!(Version::parse("1.2.3").is_err());
    }

    #[test]
    fn range_bare_version_means_equality() {
        let range = Range::parse("v1.2.3").unwrap();
        assert!(range.contains(&Version::parse("v1.2.3").unwrap()));
        assert!(!range.contains(&Version::parse("v1.2.4").unwrap()));
    }

    #[test]
    fn range_space_separated_and() {
        let range = Range::parse(">=v1.0.0 <v2.0.0").unwrap();
        assert!(range.contains(&Version::parse("v1.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("v2.0.0").unwrap()));
    }
}
