//! Gentoo (Portage/ebuild) ecosystem.
//!
//! Hand-rolled per the Package Manager Specification's version grammar:
//! a dotted numeric run (the first component may carry a leading zero,
//! every later component is compared purely numerically), an optional
//! single trailing letter, zero or more ordered `_suffix[number]` groups
//! drawn from a fixed table (`alpha`/`beta`/`pre`/`rc` below "no suffix",
//! `p` above it), and an optional `-r<N>` ebuild revision (spec.md §4.2).
//! Structurally close to [`super::alpine`]'s suffix handling, but Gentoo's
//! suffix table is shorter and has no "unknown suffix" escape hatch — an
//! unrecognized suffix is a parse error, not a sort-last fallback.

use crate::error::{trim_and_check, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

const SUFFIX_ORDER: &[&str] = &["alpha", "beta", "pre", "rc", "p"];

fn suffix_weight(name: &str) -> Result<i32, ()> {
    match SUFFIX_ORDER.iter().position(|s| *s == name) {
        Some(idx) if idx < 4 => Ok(idx as i32 - 4),
        Some(idx) => Ok(idx as i32 - 3),
        None => Err(()),
    }
}

static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_([a-z]+)(\d*)").unwrap());
static REVISION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-r(\d+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
struct Suffix {
    weight: i32,
    number: u64,
}

impl Suffix {
    fn none() -> Self {
        Self { weight: 0, number: 0 }
    }
}

impl PartialOrd for Suffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Suffix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then_with(|| self.number.cmp(&other.number))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    numeric: Vec<u64>,
    letter: Option<char>,
    suffixes: Vec<Suffix>,
    revision: u64,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let (body, revision) = match REVISION_RE.captures(trimmed) {
            Some(caps) => {
                let rev: u64 = caps.get(1).unwrap().as_str().parse().unwrap_or(0);
                (&trimmed[..trimmed.len() - caps.get(0).unwrap().as_str().len()], rev)
            }
            None => (trimmed, 0),
        };

        let digit_end = body
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(body.len());
        let (numeric_str, mut tail) = body.split_at(digit_end);
        if numeric_str.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "missing numeric version"));
        }
        let mut numeric = Vec::new();
        for seg in numeric_str.split('.') {
            if seg.is_empty() {
                return Err(ParseError::invalid_format(trimmed, "empty numeric component"));
            }
            numeric.push(
                seg.parse::<u64>()
                    .map_err(|_| ParseError::invalid_numeric(trimmed, seg))?,
            );
        }

        let mut letter = None;
        if tail.chars().next().is_some_and(|c| c.is_ascii_lowercase()) && !tail.starts_with('_') {
            letter = tail.chars().next();
            tail = &tail[1..];
        }

        let mut suffixes = Vec::new();
        while let Some(caps) = SUFFIX_RE.captures(tail) {
            let name = caps.get(1).unwrap().as_str();
            let weight = suffix_weight(name)
                .map_err(|_| ParseError::invalid_format(trimmed, format!("unknown suffix '_{name}'")))?;
            let number = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().unwrap_or(0))
                .unwrap_or(0);
            suffixes.push(Suffix { weight, number });
            let consumed = caps.get(0).unwrap().as_str().len();
            tail = &tail[consumed..];
        }

        if !tail.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "trailing unparsed version text"));
        }

        Ok(Self {
            numeric,
            letter,
            suffixes,
            revision,
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
        for i in 0..self.numeric.len().max(other.numeric.len()) {
            let ord = match (self.numeric.get(i), other.numeric.get(i)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.letter
            .cmp(&other.letter)
            .then_with(|| {
                for i in 0..self.suffixes.len().max(other.suffixes.len()) {
                    let a = self.suffixes.get(i).cloned().unwrap_or_else(Suffix::none);
                    let b = other.suffixes.get(i).cloned().unwrap_or_else(Suffix::none);
                    let ord = a.cmp(&b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            })
            .then_with(|| self.revision.cmp(&other.revision))
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

/// Space-separated AND of comparators (spec.md §4.3).
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
    fn trailing_letter_breaks_ties() {
        let a = Version::parse("1.2").unwrap();
        let b = Version::parse("1.2a").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn prerelease_suffix_below_no_suffix() {
        let pre = Version::parse("1.2_alpha1").unwrap();
        let rel = Version::parse("1.2").unwrap();
        assert_eq!(pre.cmp(&rel), Ordering::Less);
    }

    #[test]
    fn patch_suffix_above_no_suffix() {
        let rel = Version::parse("1.2").unwrap();
        let patched = Version::parse("1.2_p1").unwrap();
        assert_eq!(rel.cmp(&patched), Ordering::Less);
    }

    #[test]
    fn revision_breaks_ties() {
        let a = Version::parse("1.2-r1").unwrap();
        let b = Version::parse("1.2-r2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn rejects_unknown_suffix() {
        assert!(Version::parse("1.2_unknown1").is_err());
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">=1.0 <2.0").unwrap();
        assert!(range.contains(&Version::parse("1.5").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }
}
