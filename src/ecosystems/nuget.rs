//! NuGet ecosystem.
//!
//! Versions are SemVer 2.0.0 plus an optional legacy fourth numeric
//! component (`Major.Minor.Patch.Revision`, the .NET `System.Version`
//! shape NuGet inherited before it adopted SemVer for the rest of the
//! grammar); the fourth component defaults to `0` and is compared
//! numerically after the first three, below prerelease/build metadata
//! rules which stay exactly SemVer's. Ranges are the bracket/interval
//! notation from the NuGet package version range grammar (`[1.0,2.0)`,
//! `(1.0,)`, `[1.0]` exact, and a bare version meaning `>=` it) — the same
//! shape as [`super::maven`]'s interval atoms, grounded on that module.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    revision: u64,
    pre: Vec<PreIdent>,
    original: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PreIdent {
    Numeric(u64),
    Alpha(String),
}

impl PartialOrd for PreIdent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for PreIdent {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PreIdent::Numeric(a), PreIdent::Numeric(b)) => a.cmp(b),
            (PreIdent::Alpha(a), PreIdent::Alpha(b)) => a.cmp(b),
            (PreIdent::Numeric(_), PreIdent::Alpha(_)) => Ordering::Less,
            (PreIdent::Alpha(_), PreIdent::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let (core, pre_str) = match trimmed.split_once('-') {
            Some((c, p)) => (c, Some(p)),
            None => (trimmed, None),
        };
        // Build metadata is ignored for ordering, same as SemVer.
        let core = core.split('+').next().unwrap_or(core);
        let pre_str = pre_str.map(|p| p.split('+').next().unwrap_or(p));

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(ParseError::invalid_format(trimmed, "expected 2 to 4 dot-separated numeric components"));
        }
        let mut nums = [0u64; 4];
        for (i, part) in parts.iter().enumerate() {
            nums[i] = part
                .parse::<u64>()
                .map_err(|_| ParseError::invalid_numeric(trimmed, *part))?;
        }

        let pre = pre_str
            .map(|p| {
                p.split('.')
                    .map(|ident| {
                        if ident.chars().all(|c| c.is_ascii_digit()) && !ident.is_empty() {
                            PreIdent::Numeric(ident.parse().unwrap_or(0))
                        } else {
                            PreIdent::Alpha(ident.to_string())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            major: nums[0],
            minor: nums[1],
            patch: nums[2],
            revision: nums[3],
            pre,
            original: input.to_string(),
        })
    }

    fn release_tuple(&self) -> (u64, u64, u64, u64) {
        (self.major, self.minor, self.patch, self.revision)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
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
        self.release_tuple().cmp(&other.release_tuple()).then_with(|| {
            match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            }
        })
    }
}

#[derive(Debug, Clone)]
enum Bound {
    Unbounded,
    Inclusive(Version),
    Exclusive(Version),
}

#[derive(Debug, Clone)]
pub struct Range {
    lower: Bound,
    upper: Bound,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        if !trimmed.starts_with(['[', '(']) {
            // Bare version means ">=" that version (spec.md §4.3).
            let version = Version::parse(trimmed)?;
            return Ok(Self {
                lower: Bound::Inclusive(version),
                upper: Bound::Unbounded,
                original: input.to_string(),
            });
        }
        let lower_inclusive = trimmed.starts_with('[');
        let upper_inclusive = trimmed.ends_with(']');
        if !trimmed.ends_with([')', ']']) {
            return Err(ParseError::malformed_range(trimmed, "unterminated interval"));
        }
        let body = &trimmed[1..trimmed.len() - 1];
        let (lower_str, upper_str) = body
            .split_once(',')
            .ok_or_else(|| ParseError::malformed_range(trimmed, "interval must contain a comma"))?;
        let lower_str = lower_str.trim();
        let upper_str = upper_str.trim();

        if lower_str.is_empty() && upper_str.is_empty() {
            return Err(ParseError::malformed_range(trimmed, "interval has no bounds"));
        }
        // `[1.0]` exact-match shorthand: single value, no comma semantics.
        if upper_str.is_empty() && lower_inclusive && upper_inclusive && !lower_str.is_empty() && !body.contains(',') {
            let version = Version::parse(lower_str)?;
            return Ok(Self {
                lower: Bound::Inclusive(version.clone()),
                upper: Bound::Inclusive(version),
                original: input.to_string(),
            });
        }

        let lower = if lower_str.is_empty() {
            Bound::Unbounded
        } else {
            let v = Version::parse(lower_str)?;
            if lower_inclusive {
                Bound::Inclusive(v)
            } else {
                Bound::Exclusive(v)
            }
        };
        let upper = if upper_str.is_empty() {
            Bound::Unbounded
        } else {
            let v = Version::parse(upper_str)?;
            if upper_inclusive {
                Bound::Inclusive(v)
            } else {
                Bound::Exclusive(v)
            }
        };
        Ok(Self {
            lower,
            upper,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        let lower_ok = match &self.lower {
            Bound::Unbounded => true,
            Bound::Inclusive(b) => version.cmp(b) != Ordering::Less,
            Bound::Exclusive(b) => version.cmp(b) == Ordering::Greater,
        };
        let upper_ok = match &self.upper {
            Bound::Unbounded => true,
            Bound::Inclusive(b) => version.cmp(b) != Ordering::Greater,
            Bound::Exclusive(b) => version.cmp(b) == Ordering::Less,
        };
        lower_ok && upper_ok
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
    fn four_component_ordering() {
        let a = Version::parse("1.0.0.1").unwrap();
        let b = Version::parse("1.0.0.2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn missing_revision_defaults_to_zero() {
        let a = Version::parse("1.0.0").unwrap();
        let b = Version::parse("1.0.0.0").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prerelease_precedes_release() {
        let pre = Version::parse("1.0.0-beta").unwrap();
        let rel = Version::parse("1.0.0").unwrap();
        assert_eq!(pre.cmp(&rel), Ordering::Less);
    }

    #[test]
    fn bare_version_means_minimum_inclusive() {
        let range = Range::parse("1.0.0").unwrap();
        assert!(range.contains(&Version::parse("5.0.0").unwrap()));
        assert!(!range.contains(&Version::parse("0.9.0").unwrap()));
    }

    #[test]
    fn half_open_interval() {
        let range = Range::parse("[1.0,2.0)").unwrap();
        assert!(range.contains(&Version::parse("1.5").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }

    #[test]
    fn exact_bracket() {
        let range = Range::parse("[1.0.0]").unwrap();
        assert!(range.contains(&Version::parse("1.0.0").unwrap()));
        assert!(!range.contains(&Version::parse("1.0.1").unwrap()));
    }

    #[test]
    fn unbounded_lower() {
        let range = Range::parse("(,2.0)").unwrap();
        assert!(range.contains(&Version::parse("0.1").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }
}
