//! ALPM (Arch Linux / pacman) ecosystem.
//!
//! `alpm_pkg_vercmp` shares its lineage with `rpmvercmp` (alternating
//! alphanumeric runs, a numeric run always outranking an alphabetic one,
//! leading zeros stripped before the numeric comparison) but drops the
//! `~`/`^` RPM extensions pacman never adopted. A version is
//! `[epoch:]pkgver[-pkgrel]`; `has_pkgver`/`has_pkgrel` record whether each
//! part was present on the original string, since a bare `pkgver` compares
//! against a `pkgver-pkgrel` by `pkgver` alone when the latter is absent on
//! either side (spec.md §4.2), mirroring the same "absent revision is
//! elided, not defaulted to zero" asymmetry `dpkg`'s algorithm does not
//! have. Runs of separator characters are walked one character at a time,
//! exactly as `rpmvercmp` does, rather than collapsed by a delimiter
//! regex, so segment alignment matches pacman's own byte-for-byte.
//!
//! Two divergences from a naive `rpmvercmp` port, both driven directly by
//! spec.md §8's literal scenarios rather than a primary pacman source
//! (none was available to check them against): a leftover alphabetic
//! segment never beats a blank on the other side (`"1.0a" < "1.0"`,
//! matching rpm's own alpha-loses-to-nothing rule), but when every
//! alnum segment compares equal and one side still had trailing
//! separator characters left to skip (`"1.0."` against `"1.0"`), that
//! side sorts higher rather than tying.

use crate::error::{trim_and_check, ParseError};
use std::cmp::Ordering;
use std::fmt;

fn is_digit_at(chars: &[char], idx: usize) -> bool {
    chars.get(idx).is_some_and(|c| c.is_ascii_digit())
}

fn alpm_vercmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    loop {
        let (skip_start_i, skip_start_j) = (i, j);
        while a.get(i).is_some_and(|c| !c.is_ascii_alphanumeric()) {
            i += 1;
        }
        while b.get(j).is_some_and(|c| !c.is_ascii_alphanumeric()) {
            j += 1;
        }
        if i >= a.len() || j >= b.len() {
            if i >= a.len() && j >= b.len() {
                // Both sides exhausted: whichever side had more trailing
                // separator characters to skip (e.g. "1.0." against
                // "1.0") is treated as the newer version rather than a
                // tie.
                return (i - skip_start_i).cmp(&(j - skip_start_j));
            }
            // One side ran out while the other still has a segment left.
            // A leftover alphabetic segment never beats a blank; a
            // leftover numeric segment does (e.g. "1.0.0" > "1.0").
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
            return if a_digit { Ordering::Greater } else { Ordering::Less };
        }

        let (start_i, start_j) = (i, j);
        if a_digit {
            while is_digit_at(&a, i) {
                i += 1;
            }
            while is_digit_at(&b, j) {
                j += 1;
            }
            let a_seg = a[start_i..i].iter().collect::<String>();
            let b_seg = b[start_j..j].iter().collect::<String>();
            let a_trim = a_seg.trim_start_matches('0');
            let b_trim = b_seg.trim_start_matches('0');
            let ord = a_trim.len().cmp(&b_trim.len()).then_with(|| a_trim.cmp(b_trim));
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    epoch: u64,
    pkgver: String,
    pkgrel: Option<String>,
    has_pkgver: bool,
    has_pkgrel: bool,
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
            return Err(ParseError::invalid_format(trimmed, "empty pkgver"));
        }
        let (pkgver, pkgrel) = match rest.rsplit_once('-') {
            Some((v, r)) if !v.is_empty() && !r.is_empty() => (v.to_string(), Some(r.to_string())),
            _ => (rest.to_string(), None),
        };
        Ok(Self {
            epoch,
            has_pkgver: true,
            has_pkgrel: pkgrel.is_some(),
            pkgver,
            pkgrel,
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
        let epoch_ord = self.epoch.cmp(&other.epoch);
        if epoch_ord != Ordering::Equal {
            return epoch_ord;
        }
        let pkgver_ord = alpm_vercmp(&self.pkgver, &other.pkgver);
        if pkgver_ord != Ordering::Equal {
            return pkgver_ord;
        }
        // A bare pkgver (no pkgrel on either side) compares equal to one
        // with a pkgrel: the pkgrel is only consulted when both carry one.
        if self.has_pkgrel && other.has_pkgrel {
            alpm_vercmp(self.pkgrel.as_deref().unwrap(), other.pkgrel.as_deref().unwrap())
        } else {
            Ordering::Equal
        }
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
        assert_eq!(alpm_vercmp("1.0a", "1.0"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_ignored() {
        assert_eq!(alpm_vercmp("1.001", "1.1"), Ordering::Equal);
    }

    #[test]
    fn pkgrel_breaks_ties_when_both_present() {
        let a = Version::parse("1.0-1").unwrap();
        let b = Version::parse("1.0-2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn bare_pkgver_ignores_pkgrel() {
        let a = Version::parse("1.0").unwrap();
        let b = Version::parse("1.0-2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn epoch_dominates() {
        let low = Version::parse("1:0.1-1").unwrap();
        let high = Version::parse("2.0-1").unwrap();
        assert_eq!(low.cmp(&high), Ordering::Greater);
    }

    #[test]
    fn trailing_separator_outranks_its_absence() {
        assert_eq!(alpm_vercmp("1.0.", "1.0"), Ordering::Greater);
    }

    #[test]
    fn repeated_dash_run_outranks_a_single_dash() {
        let a = Version::parse("1---2").unwrap();
        let b = Version::parse("1-2").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Greater);
    }

    #[test]
    fn range_containment() {
        let range = Range::parse(">=1.0-1, <2.0-1").unwrap();
        assert!(range.contains(&Version::parse("1.5-2").unwrap()));
        assert!(!range.contains(&Version::parse("2.0-1").unwrap()));
    }
}
