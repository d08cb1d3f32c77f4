//! Maven ecosystem.
//!
//! Hand-rolled: no crate in the retrieval pack implements Maven's
//! `ComparableVersion` tokenizer, so this follows spec.md §4.2 directly —
//! split on `.`/`-` and on numeric/alpha transitions, map alphabetic
//! qualifiers through a fixed weight table, and right-strip trailing
//! zero-valued tokens before comparing position by position.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

/// Known qualifier weights, lowest to highest; aliases collapse onto the
/// canonical name ("" stands in for "ga"/"final", the release marker).
const KNOWN_QUALIFIERS: &[&str] = &["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

fn normalize_qualifier(q: &str) -> String {
    match q.to_ascii_lowercase().as_str() {
        "ga" | "final" | "release" => String::new(),
        "cr" => "rc".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Qualifier {
    Known(usize),
    Unknown(String),
}

fn qualifier_rank(raw: &str) -> Qualifier {
    let normalized = normalize_qualifier(raw);
    match KNOWN_QUALIFIERS.iter().position(|k| *k == normalized) {
        Some(idx) => Qualifier::Known(idx),
        None => Qualifier::Unknown(normalized),
    }
}

fn empty_qualifier_rank() -> Qualifier {
    qualifier_rank("")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Num(NumTok),
    Qual(Qualifier),
}

/// A numeric token; falls back to (length, lexicographic) comparison for
/// digit runs too long for `u64`, per spec.md §9's large-numeric-segment
/// policy, after leading zeros are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumTok {
    normalized: String,
}

impl NumTok {
    fn new(raw: &str) -> Self {
        let trimmed = raw.trim_start_matches('0');
        Self {
            normalized: if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    fn zero() -> Self {
        Self {
            normalized: "0".to_string(),
        }
    }

    fn is_zero(&self) -> bool {
        self.normalized == "0"
    }
}

impl PartialOrd for NumTok {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumTok {
    fn cmp(&self, other: &Self) -> Ordering {
        match (
            self.normalized.parse::<u128>(),
            other.normalized.parse::<u128>(),
        ) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => self
                .normalized
                .len()
                .cmp(&other.normalized.len())
                .then_with(|| self.normalized.cmp(&other.normalized)),
        }
    }
}

fn tokenize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit: Option<bool> = None;
    let mut flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if current.is_empty() {
            return;
        }
        let token = if current.chars().all(|c| c.is_ascii_digit()) {
            Token::Num(NumTok::new(current))
        } else {
            Token::Qual(qualifier_rank(current))
        };
        tokens.push(token);
        current.clear();
    };
    for c in s.chars() {
        if c == '.' || c == '-' {
            flush(&mut current, &mut tokens);
            current_is_digit = None;
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if let Some(prev) = current_is_digit {
            if prev != is_digit {
                flush(&mut current, &mut tokens);
            }
        }
        current.push(c);
        current_is_digit = Some(is_digit);
    }
    flush(&mut current, &mut tokens);
    tokens
}

/// Right-strips trailing tokens that normalize away to nothing: zero
/// numerics, and the empty ("release") qualifier.
fn normalize(tokens: &mut Vec<Token>) {
    while tokens.len() > 1 {
        let should_pop = match tokens.last().unwrap() {
            Token::Num(n) => n.is_zero(),
            Token::Qual(q) => *q == empty_qualifier_rank(),
        };
        if should_pop {
            tokens.pop();
        } else {
            break;
        }
    }
}

fn compare_token(a: Option<&Token>, b: Option<&Token>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(Token::Num(x)), None) => x.cmp(&NumTok::zero()),
        (None, Some(Token::Num(y))) => NumTok::zero().cmp(y),
        (Some(Token::Qual(x)), None) => x.cmp(&empty_qualifier_rank()),
        (None, Some(Token::Qual(y))) => empty_qualifier_rank().cmp(y),
        (Some(Token::Num(x)), Some(Token::Num(y))) => x.cmp(y),
        (Some(Token::Qual(x)), Some(Token::Qual(y))) => x.cmp(y),
        (Some(Token::Num(_)), Some(Token::Qual(_))) => Ordering::Greater,
        (Some(Token::Qual(_)), Some(Token::Num(_))) => Ordering::Less,
    }
}

#[derive(Debug, Clone)]
pub struct Version {
    tokens: Vec<Token>,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let mut tokens = tokenize(trimmed);
        if tokens.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "no tokens found"));
        }
        normalize(&mut tokens);
        Ok(Self {
            tokens,
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
        let len = self.tokens.len().max(other.tokens.len());
        for i in 0..len {
            let ord = compare_token(self.tokens.get(i), other.tokens.get(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn satisfied_by(self, ord: Ordering) -> bool {
        match self {
            Op::Eq => ord == Ordering::Equal,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
        }
    }
}

/// A union of exact versions / intervals (spec.md §4.3: Maven brackets
/// combine by comma into a union).
#[derive(Debug, Clone)]
pub struct Range {
    atoms: Vec<RangeAtom>,
    original: String,
}

#[derive(Debug, Clone)]
enum RangeAtom {
    Soft(Version),
    Interval {
        lower: Option<Version>,
        lower_inclusive: bool,
        upper: Option<Version>,
        upper_inclusive: bool,
    },
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        if !trimmed.starts_with(['[', '(']) {
            // Soft version: accept this version or anything greater.
            return Ok(Self {
                atoms: vec![RangeAtom::Soft(Version::parse(trimmed)?)],
                original: input.to_string(),
            });
        }
        let mut atoms = Vec::new();
        let mut rest = trimmed;
        while !rest.is_empty() {
            let open = rest
                .chars()
                .next()
                .filter(|c| *c == '[' || *c == '(')
                .ok_or_else(|| ParseError::malformed_range(trimmed, "expected '[' or '('"))?;
            let close_idx = rest
                .find([']', ')'])
                .ok_or_else(|| ParseError::malformed_range(trimmed, "unclosed bracket"))?;
            let close = rest.as_bytes()[close_idx] as char;
            let body = &rest[1..close_idx];
            if body.is_empty() {
                return Err(ParseError::malformed_range(trimmed, "empty bracket body"));
            }
            let lower_inclusive = open == '[';
            let upper_inclusive = close == ']';
            let atom = if let Some(comma) = body.find(',') {
                let (lo, hi) = (body[..comma].trim(), body[comma + 1..].trim());
                let lower = if lo.is_empty() {
                    None
                } else {
                    Some(Version::parse(lo)?)
                };
                let upper = if hi.is_empty() {
                    None
                } else {
                    Some(Version::parse(hi)?)
                };
                RangeAtom::Interval {
                    lower,
                    lower_inclusive,
                    upper,
                    upper_inclusive,
                }
            } else {
                // [1.0] means exactly 1.0.
                let v = Version::parse(body)?;
                RangeAtom::Interval {
                    lower: Some(v.clone()),
                    lower_inclusive: true,
                    upper: Some(v),
                    upper_inclusive: true,
                }
            };
            atoms.push(atom);
            rest = rest[close_idx + 1..].trim_start_matches(',').trim();
        }
        if atoms.is_empty() {
            return Err(ParseError::malformed_range(trimmed, "no intervals found"));
        }
        Ok(Self {
            atoms,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.atoms.iter().any(|atom| match atom {
            RangeAtom::Soft(v) => version.cmp(v) != Ordering::Less,
            RangeAtom::Interval {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            } => {
                let lower_ok = lower.as_ref().map_or(true, |l| {
                    let ord = version.cmp(l);
                    if *lower_inclusive {
                        ord != Ordering::Less
                    } else {
                        ord == Ordering::Greater
                    }
                });
                let upper_ok = upper.as_ref().map_or(true, |u| {
                    let ord = version.cmp(u);
                    if *upper_inclusive {
                        ord != Ordering::Greater
                    } else {
                        ord == Ordering::Less
                    }
                });
                lower_ok && upper_ok
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
    fn alpha_precedes_release() {
        let a = Version::parse("1.0.0-alpha").unwrap();
        let b = Version::parse("1.0.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn sp_follows_release() {
        let a = Version::parse("1.0.0-sp").unwrap();
        let b = Version::parse("1.0.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Greater);
    }

    #[test]
    fn ga_is_alias_for_release() {
        let a = Version::parse("1.0.0-ga").unwrap();
        let b = Version::parse("1.0.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn soft_version_accepts_equal_and_greater() {
        let range = Range::parse("1.0").unwrap();
        assert!(range.contains(&Version::parse("1.0").unwrap()));
        assert!(range.contains(&Version::parse("2.0").unwrap()));
        assert!(!range.contains(&Version::parse("0.9").unwrap()));
    }

    #[test]
    fn bracketed_interval() {
        let range = Range::parse("[1.0,2.0)").unwrap();
        assert!(range.contains(&Version::parse("1.5").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }

    #[test]
    fn union_of_brackets() {
        let range = Range::parse("(,1.0),(1.0,)").unwrap();
        assert!(range.contains(&Version::parse("0.5").unwrap()));
        assert!(!range.contains(&Version::parse("1.0").unwrap()));
        assert!(range.contains(&Version::parse("1.5").unwrap()));
    }

    #[test]
    fn exact_bracket() {
        let range = Range::parse("[1.0]").unwrap();
        assert!(range.contains(&Version::parse("1.0").unwrap()));
        assert!(!range.contains(&Version::parse("1.0.1").unwrap()));
    }
}
