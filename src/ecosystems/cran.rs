//! CRAN (R) ecosystem.
//!
//! Hand-rolled: CRAN versions are a `-`- or `.`-delimited list of
//! non-negative integers with no other grammar at all. `R`'s own
//! `compareVersion()` first rewrites every `-` to a `.` (so `1.0-1` and
//! `1.0.1` are the same version), then compares the integer lists
//! component-wise, with the longer list winning when one is a strict
//! prefix of the other (spec.md §4.2).

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<u64>,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let normalized = trimmed.replace('-', ".");
        let mut parts = Vec::new();
        for segment in normalized.split('.') {
            if segment.is_empty() {
                return Err(ParseError::invalid_format(trimmed, "empty version component"));
            }
            let n = segment
                .parse::<u64>()
                .map_err(|_| ParseError::invalid_numeric(trimmed, segment))?;
            parts.push(n);
        }
        if parts.len() < 2 {
            return Err(ParseError::invalid_format(trimmed, "version must have at least two components"));
        }
        Ok(Self {
            parts,
            original: input.to_string(),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in 0..self.parts.len().max(other.parts.len()) {
            match (self.parts.get(i), other.parts.get(i)) {
                (Some(a), Some(b)) => {
                    let ord = a.cmp(b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                // Longer list wins when the shared prefix is equal.
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => return Ordering::Equal,
            }
        }
        Ordering::Equal
    }
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

/// Comma-separated AND of comparators (spec.md §4.3).
#[derive(Debug, Clone)]
pub struct Range {
    constraints: Vec<(Op, Version)>,
    original: String,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let mut constraints = Vec::new();
        for atom in trimmed.split(',') {
            let atom = atom.trim();
            if atom.is_empty() {
                continue;
            }
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
            let rest = rest.trim();
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
        self.constraints.iter().all(|(op, bound)| {
            let ord = version.cmp(bound);
            match op {
                Op::Eq => ord == Ordering::Equal,
                Op::Ne => ord != Ordering::Equal,
                Op::Lt => ord == Ordering::Less,
                Op::Le => ord != Ordering::Greater,
                Op::Gt => ord == Ordering::Greater,
                Op::Ge => ord != Ordering::Less,
            }
        })
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
    fn dash_and_dot_are_equivalent() {
        let a = Version::parse("1.0-1").unwrap();
        let b = Version::parse("1.0.1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn longer_list_wins_on_equal_prefix() {
        let a = Version::parse("1.0").unwrap();
        let b = Version::parse("1.0.1").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn numeric_component_ordering() {
        let a = Version::parse("1.9").unwrap();
        let b = Version::parse("1.10").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn rejects_non_numeric_component() {
        assert!(Version::parse("1.0.a").is_err());
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">= 1.0.0, < 2.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.5-2").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.0").unwrap()));
    }
}
