//! The tagged-union `Range` type spanning every supported ecosystem.
//!
//! Mirrors [`crate::version::Version`]'s closed-enum shape. Unlike
//! `Version::compare`, [`Range::contains`] never returns a `Result`: a
//! mismatched ecosystem here is exactly as much a caller error, but
//! "is this version in this range" has an unambiguous safe default
//! (`false`), so this logs via [`tracing::warn!`] and returns it rather
//! than forcing every call site to handle an error that only ever means
//! "you mixed up your ecosystems" (spec.md §6).

use crate::ecosystems;
use crate::error::ParseError;
use crate::registry::Ecosystem;
use crate::version::Version;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A parsed range from one of the supported ecosystems.
#[derive(Debug, Clone)]
pub enum Range {
    SemVer(ecosystems::semver::Range),
    Cargo(ecosystems::cargo::Range),
    Npm(ecosystems::npm::Range),
    Pypi(ecosystems::pypi::Range),
    Go(ecosystems::go::Range),
    Maven(ecosystems::maven::Range),
    Composer(ecosystems::composer::Range),
    RubyGems(ecosystems::rubygems::Range),
    Conan(ecosystems::conan::Range),
    Cran(ecosystems::cran::Range),
    Alpine(ecosystems::alpine::Range),
    Debian(ecosystems::debian::Range),
    Rpm(ecosystems::rpm::Range),
    Alpm(ecosystems::alpm::Range),
    Gentoo(ecosystems::gentoo::Range),
    NuGet(ecosystems::nuget::Range),
}

impl Range {
    /// Parses `input` as a range of the given ecosystem.
    pub fn parse(ecosystem: Ecosystem, input: &str) -> Result<Self, ParseError> {
        Ok(match ecosystem {
            Ecosystem::SemVer => Range::SemVer(ecosystems::semver::Range::parse(input)?),
            Ecosystem::Cargo => Range::Cargo(ecosystems::cargo::Range::parse(input)?),
            Ecosystem::Npm => Range::Npm(ecosystems::npm::Range::parse(input)?),
            Ecosystem::Pypi => Range::Pypi(ecosystems::pypi::Range::parse(input)?),
            Ecosystem::Go => Range::Go(ecosystems::go::Range::parse(input)?),
            Ecosystem::Maven => Range::Maven(ecosystems::maven::Range::parse(input)?),
            Ecosystem::Composer => Range::Composer(ecosystems::composer::Range::parse(input)?),
            Ecosystem::RubyGems => Range::RubyGems(ecosystems::rubygems::Range::parse(input)?),
            Ecosystem::Conan => Range::Conan(ecosystems::conan::Range::parse(input)?),
            Ecosystem::Cran => Range::Cran(ecosystems::cran::Range::parse(input)?),
            Ecosystem::Alpine => Range::Alpine(ecosystems::alpine::Range::parse(input)?),
            Ecosystem::Debian => Range::Debian(ecosystems::debian::Range::parse(input)?),
            Ecosystem::Rpm => Range::Rpm(ecosystems::rpm::Range::parse(input)?),
            Ecosystem::Alpm => Range::Alpm(ecosystems::alpm::Range::parse(input)?),
            Ecosystem::Gentoo => Range::Gentoo(ecosystems::gentoo::Range::parse(input)?),
            Ecosystem::NuGet => Range::NuGet(ecosystems::nuget::Range::parse(input)?),
        })
    }

    /// Which ecosystem this range belongs to.
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Range::SemVer(_) => Ecosystem::SemVer,
            Range::Cargo(_) => Ecosystem::Cargo,
            Range::Npm(_) => Ecosystem::Npm,
            Range::Pypi(_) => Ecosystem::Pypi,
            Range::Go(_) => Ecosystem::Go,
            Range::Maven(_) => Ecosystem::Maven,
            Range::Composer(_) => Ecosystem::Composer,
            Range::RubyGems(_) => Ecosystem::RubyGems,
            Range::Conan(_) => Ecosystem::Conan,
            Range::Cran(_) => Ecosystem::Cran,
            Range::Alpine(_) => Ecosystem::Alpine,
            Range::Debian(_) => Ecosystem::Debian,
            Range::Rpm(_) => Ecosystem::Rpm,
            Range::Alpm(_) => Ecosystem::Alpm,
            Range::Gentoo(_) => Ecosystem::Gentoo,
            Range::NuGet(_) => Ecosystem::NuGet,
        }
    }

    /// Whether `version` satisfies this range.
    ///
    /// Returns `false` (after logging) if `version` belongs to a different
    /// ecosystem than this range, rather than panicking or erroring.
    pub fn contains(&self, version: &Version) -> bool {
        match (self, version) {
            (Range::SemVer(r), Version::SemVer(v)) => r.contains(v),
            (Range::Cargo(r), Version::Cargo(v)) => r.contains(v),
            (Range::Npm(r), Version::Npm(v)) => r.contains(v),
            (Range::Pypi(r), Version::Pypi(v)) => r.contains(v),
            (Range::Go(r), Version::Go(v)) => r.contains(v),
            (Range::Maven(r), Version::Maven(v)) => r.contains(v),
            (Range::Composer(r), Version::Composer(v)) => r.contains(v),
            (Range::RubyGems(r), Version::RubyGems(v)) => r.contains(v),
            (Range::Conan(r), Version::Conan(v)) => r.contains(v),
            (Range::Cran(r), Version::Cran(v)) => r.contains(v),
            (Range::Alpine(r), Version::Alpine(v)) => r.contains(v),
            (Range::Debian(r), Version::Debian(v)) => r.contains(v),
            (Range::Rpm(r), Version::Rpm(v)) => r.contains(v),
            (Range::Alpm(r), Version::Alpm(v)) => r.contains(v),
            (Range::Gentoo(r), Version::Gentoo(v)) => r.contains(v),
            (Range::NuGet(r), Version::NuGet(v)) => r.contains(v),
            _ => {
                tracing::warn!(
                    range_ecosystem = %self.ecosystem(),
                    version_ecosystem = %version.ecosystem(),
                    "attempted to check containment across different ecosystems"
                );
                false
            }
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::SemVer(r) => r.fmt(f),
            Range::Cargo(r) => r.fmt(f),
            Range::Npm(r) => r.fmt(f),
            Range::Pypi(r) => r.fmt(f),
            Range::Go(r) => r.fmt(f),
            Range::Maven(r) => r.fmt(f),
            Range::Composer(r) => r.fmt(f),
            Range::RubyGems(r) => r.fmt(f),
            Range::Conan(r) => r.fmt(f),
            Range::Cran(r) => r.fmt(f),
            Range::Alpine(r) => r.fmt(f),
            Range::Debian(r) => r.fmt(f),
            Range::Rpm(r) => r.fmt(f),
            Range::Alpm(r) => r.fmt(f),
            Range::Gentoo(r) => r.fmt(f),
            Range::NuGet(r) => r.fmt(f),
        }
    }
}

/// Serializes as `{"ecosystem": "...", "range": "..."}`, mirroring
/// [`crate::version::Version`]'s string-based representation for the same
/// reason: not every wrapped ecosystem crate carries its own `serde` support.
#[derive(Serialize, Deserialize)]
struct RangeRepr {
    ecosystem: Ecosystem,
    range: String,
}

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RangeRepr {
            ecosystem: self.ecosystem(),
            range: self.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RangeRepr::deserialize(deserializer)?;
        Range::parse(repr.ecosystem, &repr.range).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_ecosystem_containment() {
        let range = Range::parse(Ecosystem::SemVer, ">=1.0.0, <2.0.0").unwrap();
        let version = Version::parse(Ecosystem::SemVer, "1.5.0").unwrap();
        assert!(range.contains(&version));
    }

    #[test]
    fn mismatched_ecosystem_is_false_not_panic() {
        let range = Range::parse(Ecosystem::SemVer, ">=1.0.0").unwrap();
        let version = Version::parse(Ecosystem::Npm, "1.5.0").unwrap();
        assert!(!range.contains(&version));
    }

    #[test]
    fn round_trips_through_json() {
        let range = Range::parse(Ecosystem::NuGet, "[1.0,2.0)").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ecosystem(), Ecosystem::NuGet);
        assert_eq!(back.to_string(), range.to_string());
    }
}
