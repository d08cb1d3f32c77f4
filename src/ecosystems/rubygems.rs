//! RubyGems ecosystem.
//!
//! Hand-rolled: RubyGems' `Gem::Version` splits on `.`/`-` into alternating
//! numeric and alphabetic segments, strips trailing zero segments before
//! comparing, and — unlike every other ecosystem in this crate — ranks a
//! non-numeric segment *above* a numeric one at the same position (so
//! `1.0.a` > `1.0`). spec.md §9 calls this out explicitly as a wart to
//! preserve, not fix.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Alpha(String),
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Num(a), Segment::Num(b)) => a.cmp(b),
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            // A string segment always outranks a numeric one (spec.md §9).
            (Segment::Alpha(_), Segment::Num(_)) => Ordering::Greater,
            (Segment::Num(_), Segment::Alpha(_)) => Ordering::Less,
        }
    }
}

fn split_segments(input: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    for part in input.split(['.', '-']) {
        if part.is_empty() {
            continue;
        }
        let mut run = String::new();
        let mut run_is_digit = part.chars().next().is_some_and(|c| c.is_ascii_digit());
        let flush = |run: &mut String, run_is_digit: bool, out: &mut Vec<Segment>| {
            if run.is_empty() {
                return;
            }
            if run_is_digit {
                out.push(Segment::Num(run.parse().unwrap_or(0)));
            } else {
                out.push(Segment::Alpha(run.clone()));
            }
            run.clear();
        };
        for ch in part.chars() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ParseError::invalid_char(input, ch, "version segment"));
            }
            let is_digit = ch.is_ascii_digit();
            if is_digit != run_is_digit {
                flush(&mut run, run_is_digit, &mut segments);
                run_is_digit = is_digit;
            }
            run.push(ch);
        }
        flush(&mut run, run_is_digit, &mut segments);
    }
    if segments.is_empty() {
        return Err(ParseError::invalid_format(input, "no version segments found"));
    }
    Ok(segments)
}

/// Strips trailing zero-numeric segments, the way `Gem::Version#<=>` does
/// before comparing two segment lists (so `1.0.0` and `1` are equal).
fn canonical(segments: &[Segment]) -> &[Segment] {
    let mut end = segments.len();
    while end > 0 {
        match &segments[end - 1] {
            Segment::Num(0) => end -= 1,
            _ => break,
        }
    }
    &segments[..end]
}

fn compare_segments(a: &[Segment], b: &[Segment]) -> Ordering {
    let a = canonical(a);
    let b = canonical(b);
    for i in 0..a.len().max(b.len()) {
        let sa = a.get(i);
        let sb = b.get(i);
        let ord = match (sa, sb) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(Segment::Num(n)), None) => {
                if *n == 0 {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Some(Segment::Alpha(_)), None) => Ordering::Greater,
            (None, Some(Segment::Num(n))) => {
                if *n == 0 {
                    Ordering::Equal
                } else {
                    Ordering::Less
                }
            }
            (None, Some(Segment::Alpha(_))) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<Segment>,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let segments = split_segments(trimmed)?;
        Ok(Self {
            segments,
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
        compare_segments(&self.segments, &other.segments)
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
    /// `~>`: pessimistic constraint, admits patch/minor bumps only.
    Pessimistic,
}

/// Comma-separated AND of requirements (spec.md §4.3).
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
            let (op, rest) = if let Some(r) = atom.strip_prefix("~>") {
                (Op::Pessimistic, r)
            } else if let Some(r) = atom.strip_prefix(">=") {
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
        self.constraints.iter().all(|(op, bound)| match op {
            Op::Eq => version.cmp(bound) == Ordering::Equal,
            Op::Ne => version.cmp(bound) != Ordering::Equal,
            Op::Lt => version.cmp(bound) == Ordering::Less,
            Op::Le => version.cmp(bound) != Ordering::Greater,
            Op::Gt => version.cmp(bound) == Ordering::Greater,
            Op::Ge => version.cmp(bound) != Ordering::Less,
            Op::Pessimistic => pessimistic_matches(version, bound),
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// `~> 2.2.3` admits `>= 2.2.3, < 2.3.0`; `~> 2.2` admits `>= 2.2, < 3.0`:
/// the upper bound drops the last named segment of the bound.
fn pessimistic_matches(version: &Version, bound: &Version) -> bool {
    if version.cmp(bound) == Ordering::Less {
        return false;
    }
    let prefix_len = bound.segments.len().saturating_sub(1).max(1);
    let bound_prefix: Vec<Segment> = bound.segments.iter().take(prefix_len).cloned().collect();
    let version_prefix: Vec<Segment> = version.segments.iter().take(prefix_len).cloned().collect();
    compare_segments(&version_prefix, &bound_prefix) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_zero_segments_are_equal() {
        let a = Version::parse("1.0").unwrap();
        let b = Version::parse("1.0.0").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn alpha_segment_outranks_numeric() {
        let a = Version::parse("1.0.a").unwrap();
        let b = Version::parse("1.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Greater);
    }

    #[test]
    fn numeric_ordering() {
        let a = Version::parse("1.9").unwrap();
        let b = Version::parse("1.10").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn pessimistic_operator_patch_level() {
        let range = Range::parse("~> 2.2.3").unwrap();
        assert!(range.contains(&Version::parse("2.2.9").unwrap()));
        assert!(!range.contains(&Version::parse("2.3.0").unwrap()));
    }

    #[test]
    fn pessimistic_operator_minor_level() {
        let range = Range::parse("~> 2.2").unwrap();
        assert!(range.contains(&Version::parse("2.9.0").unwrap()));
        assert!(!range.contains(&Version::parse("3.0.0").unwrap()));
    }

    #[test]
    fn and_of_constraints() {
        let range = Range::parse(">= 1.0, < 2.0").unwrap();
        assert!(range.contains(&Version::parse("1.5").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }
}
