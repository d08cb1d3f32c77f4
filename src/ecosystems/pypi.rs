//! PyPI (PEP 440) ecosystem.
//!
//! Both the version grammar and the specifier grammar (`==`, `!=`, `<=`,
//! `>=`, `<`, `>`, `~=`, `===`, comma-separated AND, trailing `.*` wildcard)
//! are exactly PEP 440, so this module wraps `pep440_rs` rather than
//! re-deriving epoch/release/pre/post/dev/local ordering by hand — the
//! teacher workspace pins the same crate in `deps-pypi`.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Version {
    pub(crate) inner: pep440_rs::Version,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let inner = pep440_rs::Version::from_str(trimmed)
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

/// PEP 440's specifier set is an implicit AND with no OR grouping, so this
/// range is always a single constraint group (spec.md §4.3).
#[derive(Debug, Clone)]
pub struct Range {
    inner: pep440_rs::VersionSpecifiers,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let inner = pep440_rs::VersionSpecifiers::from_str(trimmed)
            .map_err(|e| ParseError::malformed_range(trimmed, e.to_string()))?;
        Ok(Self {
            inner,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.inner.contains(&version.inner)
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
    fn epoch_dominates_release() {
        let low = Version::parse("1!0.1").unwrap();
        let high = Version::parse("0.99").unwrap();
        assert_eq!(low.cmp(&high), Ordering::Greater);
    }

    #[test]
    fn pre_release_precedes_release() {
        let pre = Version::parse("1.0.0a1").unwrap();
        let rel = Version::parse("1.0.0").unwrap();
        assert_eq!(pre.cmp(&rel), Ordering::Less);
    }

    #[test]
    fn dev_precedes_pre_and_release() {
        let dev = Version::parse("1.0.0.dev1").unwrap();
        let pre = Version::parse("1.0.0a1").unwrap();
        assert_eq!(dev.cmp(&pre), Ordering::Less);
    }

    #[test]
    fn post_follows_release() {
        let rel = Version::parse("1.0.0").unwrap();
        let post = Version::parse("1.0.0.post1").unwrap();
        assert_eq!(rel.cmp(&post), Ordering::Less);
    }

    #[test]
    fn specifier_and_containment() {
        let range = Range::parse(">=1.0,<2.0").unwrap();
        assert!(range.contains(&Version::parse("1.5").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }

    #[test]
    fn compatible_release_operator() {
        let range = Range::parse("~=1.4.2").unwrap();
        assert!(range.contains(&Version::parse("1.4.5").unwrap()));
        assert!(!range.contains(&Version::parse("1.5.0").unwrap()));
    }
}
