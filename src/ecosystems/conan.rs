//! Conan (C/C++) ecosystem.
//!
//! Hand-rolled: Conan recipe versions have no formal grammar beyond "dot
//! separated, optionally followed by a `-`-delimited prerelease", and are
//! compared with Conan's own loose/"natural" component comparison —
//! lowercased, component-by-component, numeric components compared as
//! numbers and everything else as text, with a present prerelease always
//! ranking below the same version with none (spec.md §4.2).

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Comp {
    Num(u64),
    /// A leading numeric prefix followed by a non-empty textual remainder
    /// (e.g. `10a`): compared by the prefix numerically first, then the
    /// remainder as text, per spec.md §4.2's mixed-alphanumeric rule.
    Mixed(u64, String),
    Str(String),
}

impl PartialOrd for Comp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Comp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Comp::Num(a), Comp::Num(b)) => a.cmp(b),
            // Numeric components sort below mixed and textual ones at the
            // same position.
            (Comp::Num(_), _) => Ordering::Less,
            (_, Comp::Num(_)) => Ordering::Greater,
            (Comp::Mixed(an, ar), Comp::Mixed(bn, br)) => an.cmp(bn).then_with(|| ar.cmp(br)),
            (Comp::Mixed(_, _), Comp::Str(_)) => Ordering::Less,
            (Comp::Str(_), Comp::Mixed(_, _)) => Ordering::Greater,
            (Comp::Str(a), Comp::Str(b)) => a.cmp(b),
        }
    }
}

fn parse_component(s: &str) -> Comp {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = s.parse::<u64>() {
            return Comp::Num(n);
        }
    }
    let digit_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digit_end > 0 && digit_end < s.len() {
        if let Ok(n) = s[..digit_end].parse::<u64>() {
            return Comp::Mixed(n, s[digit_end..].to_ascii_lowercase());
        }
    }
    Comp::Str(s.to_ascii_lowercase())
}

fn compare_components(a: &[Comp], b: &[Comp]) -> Ordering {
    for i in 0..a.len().max(b.len()) {
        match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => {
                let ord = x.cmp(y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
    Ordering::Equal
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    main: Vec<Comp>,
    prerelease: Option<Vec<Comp>>,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let (main_str, pre_str) = match trimmed.split_once('-') {
            Some((m, p)) => (m, Some(p)),
            None => (trimmed, None),
        };
        if main_str.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "empty main version component"));
        }
        let main = main_str.split('.').map(parse_component).collect();
        let prerelease = pre_str.map(|p| p.split(['.', '-']).map(parse_component).collect());
        Ok(Self {
            main,
            prerelease,
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
        compare_components(&self.main, &other.main).then_with(|| match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_components(a, b),
        })
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
    fn lowercases_text_components() {
        let a = Version::parse("1.0.Beta").unwrap();
        let b = Version::parse("1.0.beta").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn numeric_component_below_text_component() {
        let a = Version::parse("1.0.1").unwrap();
        let b = Version::parse("1.0.a").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn prerelease_below_release() {
        let pre = Version::parse("1.0.0-alpha").unwrap();
        let rel = Version::parse("1.0.0").unwrap();
        assert_eq!(pre.cmp(&rel), Ordering::Less);
    }

    #[test]
    fn numeric_component_ordering() {
        let a = Version::parse("1.9").unwrap();
        let b = Version::parse("1.10").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn mixed_alphanumeric_component_compares_numeric_prefix_first() {
        let a = Version::parse("1.10a").unwrap();
        let b = Version::parse("1.3a").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Greater);
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">=1.0.0, <2.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.5.2").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.0").unwrap()));
    }
}
