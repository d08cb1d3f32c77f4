//! RPM ecosystem.
//!
//! Hand-rolled port of `rpmvercmp`: `[epoch:]version[-release]`, each of
//! `version` and `release` compared by walking alternating alphabetic and
//! numeric runs (separators themselves are skipped and never compared), a
//! numeric run always outranks an alphabetic one, and — RPM-specific —
//! a leading `~` makes the rest of the string sort *before* anything,
//! including the empty string, while a leading `^` (added in RPM 4.15)
//! makes it sort *after* the empty string but still within the same run
//! comparison (spec.md §4.2/§9). When every run compares equal, a
//! leftover alphabetic segment never beats a blank (`"1.0a" < "1.0"`)
//! while a leftover numeric one does (`"1.0" < "1.0.0"`); if both sides
//! are fully exhausted the two compare equal, regardless of how many
//! trailing separator characters either side had left to skip — unlike
//! [`super::alpm`]'s `alpm_vercmp`, which does give trailing separator
//! runs weight, real `rpmvercmp` never looks at separator length once
//! both strings are spent (`"1.0." == "1.0"` here).

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

fn is_sep(c: char) -> bool {
    !c.is_ascii_alphanumeric() && c != '~' && c != '^'
}

/// `rpmvercmp`, operating directly on two strings.
fn rpmvercmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    loop {
        // `~` sorts before everything, even the end of the string.
        if a.get(i) == Some(&'~') || b.get(j) == Some(&'~') {
            match (a.get(i) == Some(&'~'), b.get(j) == Some(&'~')) {
                (true, true) => {
                    i += 1;
                    j += 1;
                    continue;
                }
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                (false, false) => unreachable!(),
            }
        }
        // `^` sorts after everything except a following, longer segment.
        if a.get(i) == Some(&'^') || b.get(j) == Some(&'^') {
            match (a.get(i) == Some(&'^'), b.get(j) == Some(&'^')) {
                (true, true) => {
                    i += 1;
                    j += 1;
                    continue;
                }
                (true, false) => {
                    return if j >= b.len() {
                        Ordering::Greater
                    } else {
                        Ordering::Less
                    }
                }
                (false, true) => {
                    return if i >= a.len() {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    }
                }
                (false, false) => unreachable!(),
            }
        }

        // Skip non-alnum separators on both sides independently.
        while a.get(i).is_some_and(|c| is_sep(*c)) {
            i += 1;
        }
        while b.get(j).is_some_and(|c| is_sep(*c)) {
            j += 1;
        }
        if i >= a.len() || j >= b.len() {
            if i >= a.len() && j >= b.len() {
                return Ordering::Equal;
            }
            // A leftover alphabetic segment never beats a blank; a
            // leftover numeric segment does.
            return if i >= a.len() {
                if b[j].is_ascii_alphabetic() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            } else if a[i].is_ascii_alphabetic() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let a_digit = a[i].is_ascii_digit();
        let b_digit = b[j].is_ascii_digit();

        if a_digit != b_digit {
            // A numeric segment always outranks an alphabetic one.
            return if a_digit { Ordering::Greater } else { Ordering::Less };
        }

        let start_i = i;
        let start_j = j;
        if a_digit {
            while is_digit_at(&a, i) {
                i += 1;
            }
            while is_digit_at(&b, j) {
                j += 1;
            }
            let a_seg: String = a[start_i..i].iter().collect::<String>().trim_start_matches('0').to_string();
            let b_seg: String = b[start_j..j].iter().collect::<String>().trim_start_matches('0').to_string();
            let ord = a_seg.len().cmp(&b_seg.len()).then_with(|| a_seg.cmp(&b_seg));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            while a.get(i).is_some_and(|c| c.is_ascii_alphabetic()) {
                i += 1;
            }
            while b.get(j).is_some_and(|c| c.is_ascii_alphabetic()) {
                j += 1;
            }
            let ord = a[start_i..i].cmp(&b[start_j..j]);
            if ord != Ordering::Equal {
                return ord;
            }
        }
    }
}

fn is_digit_at(chars: &[char], idx: usize) -> bool {
    chars.get(idx).is_some_and(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    epoch: u64,
    version: String,
    release: Option<String>,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let (epoch, rest) = match trimmed.split_once(':') {
            Some((e, rest)) => (
                e.parse::<u64>()
                    .map_err(|_| ParseError::invalid_epoch(trimmed))?,
                rest,
            ),
            None => (0, trimmed),
        };
        if rest.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "empty version"));
        }
        let (version, release) = match rest.split_once('-') {
            Some((v, r)) => (v.to_string(), Some(r.to_string())),
            None => (rest.to_string(), None),
        };
        if version.is_empty() {
            return Err(ParseError::invalid_format(trimmed, "empty version"));
        }
        Ok(Self {
            epoch,
            version,
            release,
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
            .then_with(|| rpmvercmp(&self.version, &other.version))
            .then_with(|| {
                let a = self.release.as_deref().unwrap_or("");
                let b = other.release.as_deref().unwrap_or("");
                if a.is_empty() || b.is_empty() {
                    Ordering::Equal
                } else {
                    rpmvercmp(a, b)
                }
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
    fn numeric_segment_outranks_alpha() {
        assert_eq!(rpmvercmp("1.0a", "1.0"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_ignored() {
        assert_eq!(rpmvercmp("1.001", "1.1"), Ordering::Equal);
    }

    #[test]
    fn tilde_sorts_lowest() {
        assert_eq!(rpmvercmp("1.0~rc1", "1.0"), Ordering::Less);
        assert_eq!(rpmvercmp("1.0~rc1", "1.0~rc2"), Ordering::Less);
    }

    #[test]
    fn caret_sorts_above_shorter_string() {
        assert_eq!(rpmvercmp("1.0^", "1.0"), Ordering::Greater);
        assert_eq!(rpmvercmp("1.0^git1", "1.0"), Ordering::Greater);
    }

    #[test]
    fn trailing_separators_do_not_affect_equality() {
        assert_eq!(rpmvercmp("1.0.", "1.0"), Ordering::Equal);
        assert_eq!(rpmvercmp("2.0", "2_0"), Ordering::Equal);
    }

    #[test]
    fn epoch_dominates_version() {
        let low = Version::parse("1:0.1").unwrap();
        let high = Version::parse("2.0-1").unwrap();
        assert_eq!(low.cmp(&high), Ordering::Greater);
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">=1.0-1, <2.0-1").unwrap();
        assert!(range.contains(&Version::parse("1.5-2").unwrap()));
        assert!(!range.contains(&Version::parse("2.0-1").unwrap()));
    }
}
