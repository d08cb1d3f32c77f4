//! Generic SemVer 2.0.0 ecosystem.
//!
//! Version parsing and ordering are delegated to the `semver` crate, the
//! same dependency the teacher workspace pins for Cargo support. The range
//! grammar is *not* delegated: `semver::VersionReq` defaults a bare
//! comparator to Cargo's caret behavior, but spec.md §4.3 calls for this
//! ecosystem to accept only a flat, comma/space-separated AND of
//! comparators, with no caret/tilde/OR — so the range side is hand-rolled
//! here and reused by [`crate::ecosystems::rpm`]-style ecosystems that share
//! the same "plain comparator list" grammar.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

/// A parsed SemVer 2.0.0 version, plus its original source string.
#[derive(Debug, Clone)]
pub struct Version {
    pub(crate) inner: semver::Version,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let inner = semver::Version::parse(trimmed)
            .map_err(|e| ParseError::invalid_format(trimmed, e.to_string()))?;
        Ok(Self {
            inner,
            original: input.to_string(),
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.inner.pre.is_empty()
    }

    pub(crate) fn same_release(&self, other: &semver::Version) -> bool {
        self.inner.major == other.major
            && self.inner.minor == other.minor
            && self.inner.patch == other.patch
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
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

#[derive(Debug, Clone)]
pub struct Constraint {
    pub op: Op,
    pub version: Version,
}

/// A flat AND of comparator constraints; spec.md §4.3 gives generic SemVer
/// no OR and no caret/tilde.
#[derive(Debug, Clone)]
pub struct Range {
    constraints: Vec<Constraint>,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let mut constraints = Vec::new();
        for atom in trimmed.split(|c: char| c == ',' || c.is_whitespace()) {
            if atom.is_empty() {
                continue;
            }
            constraints.push(parse_comparator(trimmed, atom)?);
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
            .all(|c| constraint_satisfied(c, version))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

fn parse_comparator(whole: &str, atom: &str) -> Result<Constraint, ParseError> {
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
        return Err(ParseError::missing_version(whole));
    }
    Ok(Constraint {
        op,
        version: Version::parse(rest)?,
    })
}

/// Implements the "don't include a prerelease unless the bound shares its
/// major.minor.patch" exclusion rule from spec.md §4.3.
fn constraint_satisfied(c: &Constraint, candidate: &Version) -> bool {
    if candidate.is_prerelease()
        && !c.version.is_prerelease()
        && !candidate.same_release(&c.version.inner)
    {
        return false;
    }
    c.op.satisfied_by(candidate.inner.cmp(&c.version.inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_prereleases_below_release() {
        let mut versions: Vec<Version> = [
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.0-beta.11",
            "1.0.0-beta.2",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
        ]
        .iter()
        .map(|s| Version::parse(s).unwrap())
        .collect();
        versions.sort();
        let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "1.0.0-alpha",
                "1.0.0-alpha.1",
                "1.0.0-alpha.beta",
                "1.0.0-beta.2",
                "1.0.0-beta.11",
                "1.0.0-rc.1",
                "1.0.0",
            ]
        );
    }

    #[test]
    fn ignores_build_metadata_for_ordering() {
        let a = Version::parse("1.2.3+build1").unwrap();
        let b = Version::parse("1.2.3+build2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn range_is_plain_and_of_comparators() {
        let range = Range::parse(">=1.0.0, <2.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.0").unwrap()));
    }

    #[test]
    fn prerelease_excluded_unless_release_matches() {
        let range = Range::parse(">=1.0.0").unwrap();
        assert!(!range.contains(&Version::parse("1.2.3-alpha").unwrap()));
        let range = Range::parse(">=1.2.3-alpha").unwrap();
        assert!(range.contains(&Version::parse("1.2.3-beta").unwrap()));
    }

    #[test]
    fn rejects_empty_range() {
        assert!(Range::parse("   ").is_err());
    }
}
