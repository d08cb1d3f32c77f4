//! Alpine (`apk`) ecosystem.
//!
//! Hand-rolled port of `apk-tools`' `apk_version_compare` grammar: a dotted,
//! leading-zero-aware numeric run, an optional single trailing letter, zero
//! or more ordered `_suffix[number]` groups, and an optional `-r<N>` package
//! revision. Two compatibility quirks from spec.md §4.2/§9 are preserved
//! rather than cleaned up:
//!
//! - a numeric segment where either side has a leading zero is compared as
//!   a plain string, not as an integer (so `1.01` and `1.1` are distinct
//!   and `1.01 < 1.1` falls out of string order rather than numeric order);
//! - a version string apk-tools can tokenize only partway through (trailing
//!   garbage after the last recognized suffix) falls back to whole-string
//!   comparison instead of being rejected outright.

use crate::error::{trim_and_check, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Suffixes ordered ascending; pre-release ones sort below "no suffix",
/// post-release ones sort above it. Unknown suffixes sort after all known
/// ones and compare lexicographically among themselves.
const KNOWN_SUFFIXES: &[&str] = &["alpha", "beta", "pre", "rc", "cvs", "svn", "git", "hg", "p"];

fn suffix_weight(name: &str) -> i32 {
    match KNOWN_SUFFIXES.iter().position(|s| *s == name) {
        Some(idx) if idx < 4 => idx as i32 - 4, // alpha/beta/pre/rc: negative, pre-release
        Some(idx) => idx as i32 - 3,            // cvs/svn/git/hg/p: positive, post-release
        None => 1000,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Suffix {
    name: String,
    number: u64,
}

impl Suffix {
    fn none() -> Self {
        Self {
            name: String::new(),
            number: 0,
        }
    }

    fn weight(&self) -> i32 {
        if self.name.is_empty() {
            0
        } else {
            suffix_weight(&self.name)
        }
    }
}

impl PartialOrd for Suffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suffix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight()).then_with(|| {
            if self.weight() == 1000 {
                self.name.cmp(&other.name).then(self.number.cmp(&other.number))
            } else {
                self.number.cmp(&other.number)
            }
        })
    }
}

static REVISION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-r(\d+)$").unwrap());
static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_([a-zA-Z]+)(\d*)").unwrap());
static LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum NumPart {
    Plain(u64),
    /// Present when either side of a comparison had a leading zero; the
    /// raw digit string is kept so comparison falls back to string order.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parsed {
    numeric: Vec<NumPart>,
    letter: Option<char>,
    suffixes: Vec<Suffix>,
    revision: u64,
}

fn parse_numeric(s: &str) -> Vec<NumPart> {
    s.split('.')
        .map(|seg| {
            if seg.len() > 1 && seg.starts_with('0') {
                NumPart::Raw(seg.to_string())
            } else {
                NumPart::Plain(seg.parse().unwrap_or(0))
            }
        })
        .collect()
}

fn compare_num_part(a: &NumPart, b: &NumPart) -> Ordering {
    match (a, b) {
        (NumPart::Plain(x), NumPart::Plain(y)) => x.cmp(y),
        (NumPart::Raw(x), NumPart::Raw(y)) => x.cmp(y),
        (NumPart::Raw(x), NumPart::Plain(y)) => x.as_str().cmp(y.to_string().as_str()),
        (NumPart::Plain(x), NumPart::Raw(y)) => x.to_string().as_str().cmp(y.as_str()),
    }
}

fn parse_body(body: &str, original: &str) -> Result<Parsed, ParseError> {
    let mut rest = body;
    let dot_end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    let (numeric_str, mut tail) = rest.split_at(dot_end);
    if numeric_str.is_empty() || numeric_str.split('.').any(|s| s.is_empty()) {
        return Err(ParseError::invalid_format(original, "missing numeric version component"));
    }
    let numeric = parse_numeric(numeric_str);

    let mut letter = None;
    if LETTER_RE.is_match(tail) {
        letter = tail.chars().next();
        tail = &tail[1..];
    }

    let mut suffixes = Vec::new();
    while let Some(caps) = SUFFIX_RE.captures(tail) {
        let name = caps.get(1).unwrap().as_str().to_ascii_lowercase();
        let number = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap_or(0))
            .unwrap_or(0);
        suffixes.push(Suffix { name, number });
        let consumed = caps.get(0).unwrap().as_str().len();
        tail = &tail[consumed..];
    }

    if !tail.is_empty() {
        return Err(ParseError::invalid_format(original, "trailing unparsed version text"));
    }
    rest = "";
    let _ = rest;

    Ok(Parsed {
        numeric,
        letter,
        suffixes,
        revision: 0,
    })
}

#[derive(Debug, Clone)]
pub struct Version {
    parsed: Option<Parsed>,
    /// Set instead of `parsed` when apk-tools would only partially
    /// tokenize the string; comparison then falls back to the raw text.
    raw_fallback: Option<String>,
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
        match parse_body(body, trimmed) {
            Ok(mut parsed) => {
                parsed.revision = revision;
                Ok(Self {
                    parsed: Some(parsed),
                    raw_fallback: None,
                    original: input.to_string(),
                })
            }
            Err(_) => Ok(Self {
                parsed: None,
                raw_fallback: Some(trimmed.to_string()),
                original: input.to_string(),
            }),
        }
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
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => {
                for i in 0..a.numeric.len().max(b.numeric.len()) {
                    let ord = match (a.numeric.get(i), b.numeric.get(i)) {
                        (Some(x), Some(y)) => compare_num_part(x, y),
                        (Some(_), None) => Ordering::Greater,
                        (None, Some(_)) => Ordering::Less,
                        (None, None) => Ordering::Equal,
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.letter
                    .cmp(&b.letter)
                    .then_with(|| {
                        for i in 0..a.suffixes.len().max(b.suffixes.len()) {
                            let sa = a.suffixes.get(i).cloned().unwrap_or_else(Suffix::none);
                            let sb = b.suffixes.get(i).cloned().unwrap_or_else(Suffix::none);
                            let ord = sa.cmp(&sb);
                            if ord != Ordering::Equal {
                                return ord;
                            }
                        }
                        Ordering::Equal
                    })
                    .then_with(|| a.revision.cmp(&b.revision))
            }
            // A fallback-compared version is never equal/ordered against a
            // fully parsed one beyond plain string comparison of the whole
            // input, matching apk-tools' degrade-to-strcmp behavior.
            _ => self.sort_key().cmp(&other.sort_key()),
        }
    }
}

impl Version {
    fn sort_key(&self) -> String {
        self.raw_fallback.clone().unwrap_or_else(|| self.original.clone())
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
    fn leading_zero_falls_back_to_string_order() {
        let a = Version::parse("1.01").unwrap();
        let b = Version::parse("1.1").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_ne!(a, b);
    }

    #[test]
    fn trailing_letter_breaks_ties() {
        let a = Version::parse("1.2.3").unwrap();
        let b = Version::parse("1.2.3a").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn prerelease_suffix_below_no_suffix() {
        let pre = Version::parse("1.2.3_alpha1").unwrap();
        let rel = Version::parse("1.2.3").unwrap();
        assert_eq!(pre.cmp(&rel), Ordering::Less);
    }

    #[test]
    fn postrelease_suffix_above_no_suffix() {
        let rel = Version::parse("1.2.3").unwrap();
        let post = Version::parse("1.2.3_git20210101").unwrap();
        assert_eq!(rel.cmp(&post), Ordering::Less);
    }

    #[test]
    fn revision_breaks_ties() {
        let a = Version::parse("1.2.3-r1").unwrap();
        let b = Version::parse("1.2.3-r2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn unparsable_tail_falls_back_to_raw_comparison() {
        let v = Version::parse("1.2.3+weird~~garbage").unwrap();
        assert!(v.raw_fallback.is_some());
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">=1.0.0 <2.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.0").unwrap()));
    }
}
