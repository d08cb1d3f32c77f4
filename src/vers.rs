//! The `vers:` URI scheme: `vers:<ecosystem>/<constraint1>|<constraint2>|…`.
//!
//! Grounded on `vers-rs` (`milux-vers-rs`/`csaf-rs-vers-rs` in the example
//! pack): a `vers:` scheme prefix, an ecosystem name, a `/`, and a
//! `|`-delimited list of atoms — `*`, or a comparator (`=`, `!=`, `<`,
//! `<=`, `>`, `>=`) followed by a version. Percent-encoded atoms
//! (`1.0.0%2Bbuild.1` for `1.0.0+build.1`) are decoded before parsing,
//! same as the reference crate's `test_parse_with_url_encoding` case.
//!
//! The real VERS spec treats the atom list as a sorted description of
//! interval boundaries with its own union semantics. This crate takes the
//! simpler reading spec.md's design notes call for instead: every atom is
//! ANDed together (so `>=1.0.0|<2.0.0` means "both", not "either"), and a
//! `!=` atom subtracts a single point from whatever the rest of the atoms
//! already admit. This is a deliberate simplification, recorded as an
//! Open Question decision in DESIGN.md, not an attempt to reproduce the
//! canonical interval-union algorithm.

use crate::error::Error;
use crate::registry::Ecosystem;
use crate::version::Version;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VersOp {
    Any,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone)]
struct VersAtom {
    op: VersOp,
    version: Option<Version>,
}

impl VersAtom {
    fn matches(&self, candidate: &Version) -> bool {
        let VersOp::Any = self.op else {
            let Some(bound) = &self.version else {
                return true;
            };
            let Ok(ord) = candidate.compare(bound) else {
                return false;
            };
            return match self.op {
                VersOp::Any => true,
                VersOp::Eq => ord == Ordering::Equal,
                VersOp::Ne => ord != Ordering::Equal,
                VersOp::Lt => ord == Ordering::Less,
                VersOp::Le => ord != Ordering::Greater,
                VersOp::Gt => ord == Ordering::Greater,
                VersOp::Ge => ord != Ordering::Less,
            };
        };
        true
    }

    fn render(&self) -> String {
        let Some(version) = &self.version else {
            return "*".to_string();
        };
        let prefix = match self.op {
            VersOp::Any => "",
            VersOp::Eq => "",
            VersOp::Ne => "!=",
            VersOp::Lt => "<",
            VersOp::Le => "<=",
            VersOp::Gt => ">",
            VersOp::Ge => ">=",
        };
        format!("{prefix}{version}")
    }
}

/// A parsed `vers:` range: an ecosystem tag plus an ANDed list of atoms.
#[derive(Debug, Clone)]
pub struct VersRange {
    ecosystem: Ecosystem,
    atoms: Vec<VersAtom>,
}

fn decode_percent(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(byte) = u8::from_str_radix(&input[i + 1..i + 3], 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

impl VersRange {
    /// Parses a full `vers:<ecosystem>/<atoms>` URI.
    pub fn parse(uri: &str) -> Result<Self, Error> {
        let trimmed = uri.trim();
        let rest = trimmed.strip_prefix("vers:").ok_or_else(|| Error::InvalidVersUri {
            uri: trimmed.to_string(),
            message: "missing 'vers:' scheme prefix".to_string(),
        })?;
        let (eco_str, atoms_str) = rest.split_once('/').ok_or_else(|| Error::InvalidVersUri {
            uri: trimmed.to_string(),
            message: "missing '/' separating ecosystem from constraints".to_string(),
        })?;
        let ecosystem = Ecosystem::from_name(eco_str)?;

        let mut atoms = Vec::new();
        for raw in atoms_str.split('|') {
            let raw = decode_percent(raw.trim());
            if raw.is_empty() {
                return Err(Error::InvalidVersUri {
                    uri: trimmed.to_string(),
                    message: "empty constraint atom".to_string(),
                });
            }
            if raw == "*" {
                atoms.push(VersAtom {
                    op: VersOp::Any,
                    version: None,
                });
                continue;
            }
            let (op, rest) = if let Some(r) = raw.strip_prefix(">=") {
                (VersOp::Ge, r)
            } else if let Some(r) = raw.strip_prefix("<=") {
                (VersOp::Le, r)
            } else if let Some(r) = raw.strip_prefix("!=") {
                (VersOp::Ne, r)
            } else if let Some(r) = raw.strip_prefix('>') {
                (VersOp::Gt, r)
            } else if let Some(r) = raw.strip_prefix('<') {
                (VersOp::Lt, r)
            } else if let Some(r) = raw.strip_prefix('=') {
                (VersOp::Eq, r)
            } else {
                (VersOp::Eq, raw.as_str())
            };
            let version = Version::parse(ecosystem, rest)?;
            atoms.push(VersAtom {
                op,
                version: Some(version),
            });
        }
        if atoms.is_empty() {
            return Err(Error::InvalidVersUri {
                uri: trimmed.to_string(),
                message: "no constraint atoms found".to_string(),
            });
        }

        Ok(Self { ecosystem, atoms })
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    /// Parses `version_str` for this range's ecosystem and checks whether
    /// every atom admits it.
    pub fn contains(&self, version_str: &str) -> Result<bool, Error> {
        let candidate = Version::parse(self.ecosystem, version_str)?;
        Ok(self.atoms.iter().all(|atom| atom.matches(&candidate)))
    }

    /// Renders this range as the native comparator syntax its ecosystem's
    /// own `Range::parse` accepts, for handing off to ecosystem tooling
    /// that doesn't understand `vers:` URIs directly.
    ///
    /// Most ecosystems AND comparators with commas; a few (npm, Go,
    /// Alpine, Gentoo, generic SemVer) use whitespace instead. NuGet has
    /// no flat comparator-list grammar at all, so a single lower/upper
    /// bound pair is rendered as a bracket interval and anything else
    /// falls back to a comma-joined comparator list for readability.
    pub fn to_native_range_string(&self) -> String {
        if self.ecosystem == Ecosystem::NuGet {
            if let [lower, upper] = self.atoms.as_slice() {
                if let (Some(lv), Some(uv)) = (&lower.version, &upper.version) {
                    let open = match lower.op {
                        VersOp::Ge => '[',
                        _ => '(',
                    };
                    let close = match upper.op {
                        VersOp::Le => ']',
                        _ => ')',
                    };
                    return format!("{open}{lv},{uv}{close}");
                }
            }
        }
        let separator = match self.ecosystem {
            Ecosystem::Npm
            | Ecosystem::Go
            | Ecosystem::Alpine
            | Ecosystem::Gentoo
            | Ecosystem::SemVer => " ",
            _ => ", ",
        };
        self.atoms
            .iter()
            .map(VersAtom::render)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for VersRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vers:{}/{}",
            self.ecosystem,
            self.atoms.iter().map(VersAtom::render).collect::<Vec<_>>().join("|")
        )
    }
}

/// Parses a `vers:` URI and checks whether `version_str` satisfies it.
pub fn contains(uri: &str, version_str: &str) -> Result<bool, Error> {
    VersRange::parse(uri)?.contains(version_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_equality() {
        let range = VersRange::parse("vers:npm/1.2.3").unwrap();
        assert_eq!(range.ecosystem(), Ecosystem::Npm);
        assert!(range.contains("1.2.3").unwrap());
        assert!(!range.contains("1.2.4").unwrap());
    }

    #[test]
    fn ands_comparators_together() {
        let range = VersRange::parse("vers:npm/>=1.0.0|<2.0.0").unwrap();
        assert!(range.contains("1.5.0").unwrap());
        assert!(!range.contains("2.0.0").unwrap());
        assert!(!range.contains("0.9.0").unwrap());
    }

    #[test]
    fn wildcard_admits_everything() {
        let range = VersRange::parse("vers:npm/*").unwrap();
        assert!(range.contains("0.0.1").unwrap());
        assert!(range.contains("99.0.0").unwrap());
    }

    #[test]
    fn excludes_a_single_version() {
        let range = VersRange::parse("vers:npm/>=1.0.0|!=1.5.0").unwrap();
        assert!(range.contains("1.4.0").unwrap());
        assert!(!range.contains("1.5.0").unwrap());
    }

    #[test]
    fn decodes_percent_encoded_build_metadata() {
        let range = VersRange::parse("vers:npm/1.0.0%2Bbuild.1").unwrap();
        assert!(range.contains("1.0.0+build.1").unwrap());
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(VersRange::parse("npm/1.2.3").is_err());
    }

    #[test]
    fn renders_native_comma_joined_range() {
        let range = VersRange::parse("vers:cargo/>=1.0.0|<2.0.0").unwrap();
        assert_eq!(range.to_native_range_string(), ">=1.0.0, <2.0.0");
    }

    #[test]
    fn renders_native_nuget_bracket_interval() {
        let range = VersRange::parse("vers:nuget/>=1.0.0|<2.0.0").unwrap();
        assert_eq!(range.to_native_range_string(), "[1.0.0,2.0.0)");
    }
}
