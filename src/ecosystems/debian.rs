//! Debian (`dpkg`) ecosystem.
//!
//! Version shape and validation are grounded on the real-world
//! `deb-rs` `version` module (epoch, upstream-version, debian-revision
//! split on the last `-`, permitted character sets); the comparison
//! algorithm is dpkg's own `verrevcmp`, reimplemented byte-for-byte per
//! `deb-version(5)`: walk alternating non-digit/digit runs, compare
//! non-digit runs character-by-character under dpkg's modified ordering
//! (`~` sorts below everything including end-of-string, letters sort
//! below all other non-digit characters), and compare digit runs
//! numerically after stripping leading zeros.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

fn char_order(c: Option<char>) -> i32 {
    match c {
        None => 0,
        Some('~') => -1,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(c) => c as i32 + 256,
    }
}

fn is_digit_at(chars: &[char], idx: usize) -> bool {
    chars.get(idx).is_some_and(|c| c.is_ascii_digit())
}

/// dpkg's `verrevcmp`: compares two upstream-version or debian-revision
/// strings by walking alternating non-digit and digit runs.
fn verrevcmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        // Non-digit run: exits once both sides are at a digit or exhausted.
        while !(i >= a.len() || is_digit_at(&a, i)) || !(j >= b.len() || is_digit_at(&b, j)) {
            let ac = a.get(i).copied();
            let bc = b.get(j).copied();
            let oa = char_order(ac);
            let ob = char_order(bc);
            if oa != ob {
                return oa.cmp(&ob);
            }
            if ac.is_some() {
                i += 1;
            }
            if bc.is_some() {
                j += 1;
            }
        }

        while a.get(i) == Some(&'0') {
            i += 1;
        }
        while b.get(j) == Some(&'0') {
            j += 1;
        }
        let mut first_diff = Ordering::Equal;
        while is_digit_at(&a, i) && is_digit_at(&b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if is_digit_at(&a, i) {
            return Ordering::Greater;
        }
        if is_digit_at(&b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }
    Ordering::Equal
}

fn valid_upstream_char(c: char, has_epoch: bool, has_revision: bool) -> bool {
    c.is_ascii_alphanumeric()
        || c == '~'
        || c == '+'
        || c == '.'
        || (c == ':' && has_epoch)
        || (c == '-' && has_revision)
}

fn valid_revision_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '~' || c == '+' || c == '.'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    epoch: u64,
    upstream_version: String,
    debian_revision: Option<String>,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;

        let (epoch, rest) = match trimmed.split_once(':') {
            Some((epoch_str, rest)) => {
                let epoch = epoch_str
                    .parse::<u64>()
                    .map_err(|_| ParseError::invalid_epoch(trimmed))?;
                if epoch > i32::MAX as u64 {
                    return Err(ParseError::invalid_epoch(trimmed));
                }
                (epoch, rest)
            }
            None => (0, trimmed),
        };
        if rest.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "empty upstream version"));
        }

        let (upstream_version, debian_revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) => {
                if upstream.is_empty() {
                    return Err(ParseError::invalid_format(trimmed, "empty upstream version"));
                }
                if revision.is_empty() {
                    return Err(ParseError::invalid_format(trimmed, "empty debian revision"));
                }
                (upstream.to_string(), Some(revision.to_string()))
            }
            None => (rest.to_string(), None),
        };

        if !upstream_version
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
        {
            return Err(ParseError::invalid_format(trimmed, "upstream version must start with a digit"));
        }
        let has_epoch = epoch != 0 || trimmed.contains(':');
        for c in upstream_version.chars() {
            if !valid_upstream_char(c, has_epoch, debian_revision.is_some()) {
                return Err(ParseError::invalid_char(trimmed, c, "upstream version"));
            }
        }
        if let Some(rev) = &debian_revision {
            for c in rev.chars() {
                if !valid_revision_char(c) {
                    return Err(ParseError::invalid_char(trimmed, c, "debian revision"));
                }
            }
        }

        Ok(Self {
            epoch,
            upstream_version,
            debian_revision,
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
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| verrevcmp(&self.upstream_version, &other.upstream_version))
            .then_with(|| {
                let a = self.debian_revision.as_deref().unwrap_or("0");
                let b = other.debian_revision.as_deref().unwrap_or("0");
                verrevcmp(a, b)
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

/// Comma-separated AND of comparators, the shape dpkg dependency fields use
/// (spec.md §4.3).
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
            } else if let Some(r) = atom.strip_prefix(">>") {
                (Op::Gt, r)
            } else if let Some(r) = atom.strip_prefix("<<") {
                (Op::Lt, r)
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
    fn tilde_sorts_below_everything() {
        let a = Version::parse("1.0~dfsg1").unwrap();
        let b = Version::parse("1.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn epoch_dominates() {
        let low = Version::parse("1:0.1").unwrap();
        let high = Version::parse("1.3").unwrap();
        assert_eq!(low.cmp(&high), Ordering::Greater);
    }

    #[test]
    fn missing_revision_equals_zero_revision() {
        let a = Version::parse("1.0").unwrap();
        let b = Version::parse("1.0-0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn full_sort_matches_dpkg() {
        let mut versions: Vec<Version> = [
            "1.3", "1.0", "1.0+dfsg1-1", "1.0-1", "1.1", "0:1.2", "1:0.1", "1.0+dfsg1", "1.0~dfsg1",
        ]
        .iter()
        .map(|s| Version::parse(s).unwrap())
        .collect();
        versions.sort();
        let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            sorted,
            vec![
                "1.0~dfsg1", "1.0", "1.0-1", "1.0+dfsg1", "1.0+dfsg1-1", "1.1", "0:1.2", "1.3", "1:0.1",
            ]
        );
    }

    #[test]
    fn rejects_upstream_not_starting_with_digit() {
        assert!(Version::parse("abc3-0").is_err());
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">=1.0, <2.0").unwrap();
        assert!(range.contains(&Version::parse("1.5-1").unwrap()));
        assert!(!range.contains(&Version::parse("2.0").unwrap()));
    }
}
