//! The tagged-union `Version` type spanning every supported ecosystem.
//!
//! A closed `enum` over each ecosystem module's own `Version`, rather than
//! a `Box<dyn Version>` — the set of ecosystems is fixed at compile time
//! and the whole point of this crate is comparing and displaying them, so
//! a match-based dispatch (as `deps-lsp`'s `Ecosystem` enum dispatches
//! over its handlers) avoids both the allocation and the object-safety
//! contortions a trait would need for `Ord`.
//!
//! Comparing two versions from different ecosystems is a programming
//! error (spec.md §6): `Version` deliberately does not implement `Ord`,
//! since that would force a total order across everything, including
//! nonsensical comparisons. [`Version::compare`] instead returns a
//! [`crate::error::Error`] on a mismatch, logging a [`tracing::warn!`] so
//! the mistake is visible without killing the process.

use crate::ecosystems;
use crate::error::{Error, ParseError};
use crate::registry::Ecosystem;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A parsed version from one of the supported ecosystems.
#[derive(Debug, Clone)]
pub enum Version {
    SemVer(ecosystems::semver::Version),
    Cargo(ecosystems::cargo::Version),
    Npm(ecosystems::npm::Version),
    Pypi(ecosystems::pypi::Version),
    Go(ecosystems::go::Version),
    Maven(ecosystems::maven::Version),
    Composer(ecosystems::composer::Version),
    RubyGems(ecosystems::rubygems::Version),
    Conan(ecosystems::conan::Version),
    Cran(ecosystems::cran::Version),
    Alpine(ecosystems::alpine::Version),
    Debian(ecosystems::debian::Version),
    Rpm(ecosystems::rpm::Version),
    Alpm(ecosystems::alpm::Version),
    Gentoo(ecosystems::gentoo::Version),
    NuGet(ecosystems::nuget::Version),
}

impl Version {
    /// Parses `input` as a version of the given ecosystem.
    pub fn parse(ecosystem: Ecosystem, input: &str) -> Result<Self, ParseError> {
        Ok(match ecosystem {
            Ecosystem::SemVer => Version::SemVer(ecosystems::semver::Version::parse(input)?),
            Ecosystem::Cargo => Version::Cargo(ecosystems::cargo::parse_version(input)?),
            Ecosystem::Npm => Version::Npm(ecosystems::npm::Version::parse(input)?),
            Ecosystem::Pypi => Version::Pypi(ecosystems::pypi::Version::parse(input)?),
            Ecosystem::Go => Version::Go(ecosystems::go::Version::parse(input)?),
            Ecosystem::Maven => Version::Maven(ecosystems::maven::Version::parse(input)?),
            Ecosystem::Composer => Version::Composer(ecosystems::composer::Version::parse(input)?),
            Ecosystem::RubyGems => Version::RubyGems(ecosystems::rubygems::Version::parse(input)?),
            Ecosystem::Conan => Version::Conan(ecosystems::conan::Version::parse(input)?),
            Ecosystem::Cran => Version::Cran(ecosystems::cran::Version::parse(input)?),
            Ecosystem::Alpine => Version::Alpine(ecosystems::alpine::Version::parse(input)?),
            Ecosystem::Debian => Version::Debian(ecosystems::debian::Version::parse(input)?),
            Ecosystem::Rpm => Version::Rpm(ecosystems::rpm::Version::parse(input)?),
            Ecosystem::Alpm => Version::Alpm(ecosystems::alpm::Version::parse(input)?),
            Ecosystem::Gentoo => Version::Gentoo(ecosystems::gentoo::Version::parse(input)?),
            Ecosystem::NuGet => Version::NuGet(ecosystems::nuget::Version::parse(input)?),
        })
    }

    /// Which ecosystem this version belongs to.
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Version::SemVer(_) => Ecosystem::SemVer,
            Version::Cargo(_) => Ecosystem::Cargo,
            Version::Npm(_) => Ecosystem::Npm,
            Version::Pypi(_) => Ecosystem::Pypi,
            Version::Go(_) => Ecosystem::Go,
            Version::Maven(_) => Ecosystem::Maven,
            Version::Composer(_) => Ecosystem::Composer,
            Version::RubyGems(_) => Ecosystem::RubyGems,
            Version::Conan(_) => Ecosystem::Conan,
            Version::Cran(_) => Ecosystem::Cran,
            Version::Alpine(_) => Ecosystem::Alpine,
            Version::Debian(_) => Ecosystem::Debian,
            Version::Rpm(_) => Ecosystem::Rpm,
            Version::Alpm(_) => Ecosystem::Alpm,
            Version::Gentoo(_) => Ecosystem::Gentoo,
            Version::NuGet(_) => Ecosystem::NuGet,
        }
    }

    /// Compares two versions, provided they belong to the same ecosystem.
    ///
    /// Returns [`Error::EcosystemMismatch`] rather than panicking when
    /// they don't, per spec.md §6: mixing ecosystems is a programming
    /// error the caller should be told about, not a reason to abort.
    pub fn compare(&self, other: &Self) -> Result<Ordering, Error> {
        match (self, other) {
            (Version::SemVer(a), Version::SemVer(b)) => Ok(a.cmp(b)),
            (Version::Cargo(a), Version::Cargo(b)) => Ok(a.cmp(b)),
            (Version::Npm(a), Version::Npm(b)) => Ok(a.cmp(b)),
            (Version::Pypi(a), Version::Pypi(b)) => Ok(a.cmp(b)),
            (Version::Go(a), Version::Go(b)) => Ok(a.cmp(b)),
            (Version::Maven(a), Version::Maven(b)) => Ok(a.cmp(b)),
            (Version::Composer(a), Version::Composer(b)) => Ok(a.cmp(b)),
            (Version::RubyGems(a), Version::RubyGems(b)) => Ok(a.cmp(b)),
            (Version::Conan(a), Version::Conan(b)) => Ok(a.cmp(b)),
            (Version::Cran(a), Version::Cran(b)) => Ok(a.cmp(b)),
            (Version::Alpine(a), Version::Alpine(b)) => Ok(a.cmp(b)),
            (Version::Debian(a), Version::Debian(b)) => Ok(a.cmp(b)),
            (Version::Rpm(a), Version::Rpm(b)) => Ok(a.cmp(b)),
            (Version::Alpm(a), Version::Alpm(b)) => Ok(a.cmp(b)),
            (Version::Gentoo(a), Version::Gentoo(b)) => Ok(a.cmp(b)),
            (Version::NuGet(a), Version::NuGet(b)) => Ok(a.cmp(b)),
            _ => {
                tracing::warn!(
                    left = %self.ecosystem(),
                    right = %other.ecosystem(),
                    "attempted to compare versions from different ecosystems"
                );
                Err(Error::EcosystemMismatch {
                    left: self.ecosystem().name(),
                    right: other.ecosystem().name(),
                })
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::SemVer(v) => v.fmt(f),
            Version::Cargo(v) => v.fmt(f),
            Version::Npm(v) => v.fmt(f),
            Version::Pypi(v) => v.fmt(f),
            Version::Go(v) => v.fmt(f),
            Version::Maven(v) => v.fmt(f),
            Version::Composer(v) => v.fmt(f),
            Version::RubyGems(v) => v.fmt(f),
            Version::Conan(v) => v.fmt(f),
            Version::Cran(v) => v.fmt(f),
            Version::Alpine(v) => v.fmt(f),
            Version::Debian(v) => v.fmt(f),
            Version::Rpm(v) => v.fmt(f),
            Version::Alpm(v) => v.fmt(f),
            Version::Gentoo(v) => v.fmt(f),
            Version::NuGet(v) => v.fmt(f),
        }
    }
}

impl PartialEq for Version {
    /// Versions from different ecosystems are simply unequal, never an
    /// error: equality, unlike ordering, has an obviously correct answer.
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ok(Ordering::Equal)
    }
}

/// Serializes as `{"ecosystem": "...", "version": "..."}` rather than
/// deriving field-by-field: every ecosystem module's own `Version` wraps
/// third-party types (`semver::Version`, `node_semver::Version`,
/// `pep440_rs::Version`, ...) not all of which enable a `serde` feature,
/// so the tagged union serializes through its own canonical string form
/// instead, the way `semver::Version` itself serializes as a string.
#[derive(Serialize, Deserialize)]
struct VersionRepr {
    ecosystem: Ecosystem,
    version: String,
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VersionRepr {
            ecosystem: self.ecosystem(),
            version: self.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = VersionRepr::deserialize(deserializer)?;
        Version::parse(repr.ecosystem, &repr.version).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_ecosystem_compares() {
        let a = Version::parse(Ecosystem::SemVer, "1.0.0").unwrap();
        let b = Version::parse(Ecosystem::SemVer, "2.0.0").unwrap();
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
    }

    #[test]
    fn mismatched_ecosystems_error_instead_of_panicking() {
        let a = Version::parse(Ecosystem::SemVer, "1.0.0").unwrap();
        let b = Version::parse(Ecosystem::Npm, "1.0.0").unwrap();
        assert!(a.compare(&b).is_err());
    }

    #[test]
    fn mismatched_ecosystems_are_unequal() {
        let a = Version::parse(Ecosystem::SemVer, "1.0.0").unwrap();
        let b = Version::parse(Ecosystem::Npm, "1.0.0").unwrap();
        assert_ne!(a, b);
    }
}
