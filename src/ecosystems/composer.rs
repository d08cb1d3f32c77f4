//! Composer (PHP) ecosystem.
//!
//! Hand-rolled, since Composer's stability-suffix grammar and the `dev-`
//! branch sentinel have no existing crate in the pack. Two behaviors are
//! explicitly called out in spec.md §9 as "compatibility warts" the
//! rewrite must reproduce rather than silently fix:
//!
//! - `dev-<branch>` always sorts below any non-dev version, and two
//!   `dev-<branch>` versions compare by branch name.
//! - `^1.0.0` admits `1.0b1` (a same-release beta) but `^1.2.3` does *not*
//!   admit `1.2.3-alpha`: caret only extends its lower bound's stability
//!   floor down to `beta`, never to `alpha`/`dev`.

use crate::error::{trim_and_check, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stability {
    Dev,
    Alpha,
    Beta,
    Rc,
    Stable,
}

fn parse_stability(label: &str) -> Stability {
    match label.to_ascii_lowercase().as_str() {
        "dev" => Stability::Dev,
        "a" | "alpha" => Stability::Alpha,
        "b" | "beta" => Stability::Beta,
        "rc" => Stability::Rc,
        // "pl"/"patch" count as stable (spec.md §4.2).
        _ => Stability::Stable,
    }
}

static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?xi)
        ^v?
        (?P<major>\d+)
        (?:\.(?P<minor>\d+))?
        (?:\.(?P<patch>\d+))?
        (?:\.(?P<extra>\d+))?
        (?:[-._]?(?P<stab>stable|alpha|beta|rc|patch|pl|dev|a|b))?
        (?P<stabnum>\d+)?
        $",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct Numbered {
    major: u64,
    minor: u64,
    patch: u64,
    extra: u64,
    stability: Stability,
    stability_number: u64,
}

impl Numbered {
    fn same_release(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }
}

impl PartialOrd for Numbered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Numbered {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.extra)
            .cmp(&(other.major, other.minor, other.patch, other.extra))
            .then_with(|| self.stability.cmp(&other.stability))
            .then_with(|| self.stability_number.cmp(&other.stability_number))
    }
}

fn parse_numbered(input: &str) -> Result<Numbered, ParseError> {
    let caps = NUMBERED_RE
        .captures(input)
        .ok_or_else(|| ParseError::invalid_format(input, "does not match Composer grammar"))?;
    let num = |name: &str| -> u64 {
        caps.name(name)
            .map(|m| m.as_str().parse().unwrap_or(0))
            .unwrap_or(0)
    };
    let stability = caps
        .name("stab")
        .map(|m| parse_stability(m.as_str()))
        .unwrap_or(Stability::Stable);
    Ok(Numbered {
        major: num("major"),
        minor: num("minor"),
        patch: num("patch"),
        extra: num("extra"),
        stability,
        stability_number: num("stabnum"),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inner {
    Branch(String),
    Numbered(Numbered),
}

#[derive(Debug, Clone)]
pub struct Version {
    inner: Inner,
    original: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let inner = if let Some(branch) = trimmed.strip_prefix("dev-") {
            Inner::Branch(branch.to_string())
        } else {
            Inner::Numbered(parse_numbered(trimmed)?)
        };
        Ok(Self {
            inner,
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
        self.inner == other.inner
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
        match (&self.inner, &other.inner) {
            (Inner::Branch(_), Inner::Numbered(_)) => Ordering::Less,
            (Inner::Numbered(_), Inner::Branch(_)) => Ordering::Greater,
            (Inner::Branch(a), Inner::Branch(b)) => a.cmp(b),
            (Inner::Numbered(a), Inner::Numbered(b)) => a.cmp(b),
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

impl Op {
    fn satisfied_by(self, ord: Ordering) -> bool {
        match self {
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone)]
enum Constraint {
    Compare(Op, Numbered),
    /// `^V`: lower bound is `V` itself, with the stability wart applied.
    Caret { lower: Numbered, upper: Numbered },
    /// `~V`: same shape, but no stability wart (spec.md §9).
    Tilde { lower: Numbered, upper: Numbered },
    StabilityFloor(Stability),
    Any,
}

fn bump(mut v: Numbered, component: u8) -> Numbered {
    match component {
        0 => {
            v.major += 1;
            v.minor = 0;
            v.patch = 0;
            v.extra = 0;
        }
        1 => {
            v.minor += 1;
            v.patch = 0;
            v.extra = 0;
        }
        _ => {
            v.patch += 1;
            v.extra = 0;
        }
    }
    v.stability = Stability::Stable;
    v.stability_number = 0;
    v
}

fn caret_upper(v: &Numbered) -> Numbered {
    if v.major > 0 {
        bump(v.clone(), 0)
    } else if v.minor > 0 {
        bump(v.clone(), 1)
    } else {
        bump(v.clone(), 2)
    }
}

fn tilde_upper(v: &Numbered, precision: u8) -> Numbered {
    match precision {
        1 => bump(v.clone(), 0),
        _ => bump(v.clone(), 1),
    }
}

fn satisfies_caret_stability(candidate: &Numbered, lower: &Numbered) -> bool {
    if candidate.stability >= Stability::Stable {
        return true;
    }
    match candidate.stability {
        Stability::Alpha | Stability::Dev => false,
        _ => candidate.same_release(lower),
    }
}

impl Constraint {
    fn matches(&self, candidate: &Version) -> bool {
        let Inner::Numbered(n) = &candidate.inner else {
            // dev-<branch> versions never satisfy a numeric constraint.
            return false;
        };
        match self {
            Constraint::Compare(op, bound) => {
                if n.stability < Stability::Stable
                    && bound.stability >= Stability::Stable
                    && !n.same_release(bound)
                {
                    return false;
                }
                op.satisfied_by(n.cmp(bound))
            }
            Constraint::Caret { lower, upper } => {
                // Compare release components only, not full `Numbered` order: the
                // latter folds stability in, which would reject a same-release
                // prerelease (`1.0b1` against `lower = 1.0.0`) before
                // `satisfies_caret_stability` below ever gets a chance to admit it.
                let candidate_release = (n.major, n.minor, n.patch, n.extra);
                let lower_release = (lower.major, lower.minor, lower.patch, lower.extra);
                if candidate_release < lower_release || n.cmp(upper) != Ordering::Less {
                    return false;
                }
                satisfies_caret_stability(n, lower)
            }
            Constraint::Tilde { lower, upper } => {
                n.cmp(lower) != Ordering::Less && n.cmp(upper) == Ordering::Less
            }
            Constraint::StabilityFloor(min) => n.stability >= *min,
            Constraint::Any => true,
        }
    }
}

fn parse_atom(whole: &str, atom: &str) -> Result<Constraint, ParseError> {
    let atom = atom.trim();
    if atom == "*" {
        return Ok(Constraint::Any);
    }
    if let Some(flag) = atom.strip_prefix('@') {
        return Ok(Constraint::StabilityFloor(parse_stability(flag)));
    }
    if let Some(rest) = atom.strip_prefix('^') {
        let lower = parse_numbered(rest)?;
        let upper = caret_upper(&lower);
        return Ok(Constraint::Caret { lower, upper });
    }
    if let Some(rest) = atom.strip_prefix('~') {
        let precision = rest.matches('.').count() as u8 + 1;
        let lower = parse_numbered(rest)?;
        let upper = tilde_upper(&lower, precision);
        return Ok(Constraint::Tilde { lower, upper });
    }
    if let Some(prefix) = atom.strip_suffix(".*").or_else(|| atom.strip_suffix(".x")) {
        let lower = parse_numbered(&format!("{prefix}.0"))?;
        let component = prefix.matches('.').count() as u8;
        let upper = bump(lower.clone(), component);
        return Ok(Constraint::Tilde { lower, upper });
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
    if rest.is_empty() {
        return Err(ParseError::missing_version(whole));
    }
    Ok(Constraint::Compare(op, parse_numbered(rest)?))
}

fn parse_group(whole: &str, group: &str) -> Result<Vec<Constraint>, ParseError> {
    let group = group.trim();
    if let Some(idx) = group.find(" - ") {
        let lower = parse_numbered(group[..idx].trim())?;
        let upper_raw = group[idx + 3..].trim();
        if upper_raw.is_empty() {
            return Err(ParseError::malformed_range(whole, "trailing dash in hyphen range"));
        }
        let upper = parse_numbered(upper_raw)?;
        return Ok(vec![
            Constraint::Compare(Op::Ge, lower),
            Constraint::Compare(Op::Le, upper),
        ]);
    }
    group
        .split([',', ' '])
        .filter(|s| !s.is_empty())
        .map(|atom| parse_atom(whole, atom))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Range {
    groups: Vec<Vec<ConstraintRendered>>,
    original: String,
}

#[derive(Debug, Clone)]
struct ConstraintRendered(Constraint);

impl Range {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = trim_and_check(input)?;
        let mut groups = Vec::new();
        for group in trimmed.split("||") {
            let constraints = parse_group(trimmed, group)?;
            if constraints.is_empty() {
                return Err(ParseError::malformed_range(trimmed, "empty constraint group"));
            }
            groups.push(constraints.into_iter().map(ConstraintRendered).collect());
        }
        if groups.is_empty() {
            return Err(ParseError::malformed_range(trimmed, "no constraint groups"));
        }
        Ok(Self {
            groups,
            original: input.to_string(),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|c| c.0.matches(version)))
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
    fn dev_branch_sorts_below_everything() {
        let dev = Version::parse("dev-main").unwrap();
        let stable = Version::parse("0.0.1").unwrap();
        assert_eq!(dev.cmp(&stable), Ordering::Less);
    }

    #[test]
    fn dev_branches_compare_lexicographically() {
        let a = Version::parse("dev-feature-a").unwrap();
        let b = Version::parse("dev-feature-b").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn caret_admits_same_release_beta() {
        let range = Range::parse("^1.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.0b1").unwrap()));
    }

    #[test]
    fn caret_excludes_same_release_alpha() {
        let range = Range::parse("^1.2.3").unwrap();
        assert!(!range.contains(&Version::parse("1.2.3-alpha").unwrap()));
    }

    #[test]
    fn caret_basic_bounds() {
        let range = Range::parse("^1.2.3").unwrap();
        assert!(range.contains(&Version::parse("1.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.0").unwrap()));
    }

    #[test]
    fn stability_flag_filters() {
        let range = Range::parse("@stable").unwrap();
        assert!(range.contains(&Version::parse("1.0.0").unwrap()));
        assert!(!range.contains(&Version::parse("1.0.0-beta1").unwrap()));
    }

    #[test]
    fn hyphen_range() {
        let range = Range::parse("1.0.0 - 2.0.0").unwrap();
        assert!(range.contains(&Version::parse("1.5.0").unwrap()));
        assert!(!range.contains(&Version::parse("2.0.1").unwrap()));
    }
}
