//! The ecosystem registry: maps a name string to one of the closed set of
//! supported ecosystems and dispatches parsing to the right module.
//!
//! Grounded on `deps-lsp`'s `document::state::Ecosystem` enum, which maps
//! manifest filenames to a small `#[non_exhaustive]` enum rather than a
//! `dyn EcosystemHandler` trait object — the same shape fits here, just
//! keyed by ecosystem name instead of filename.

use crate::error::Error;
use crate::version::Version;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One of the versioning schemes this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Ecosystem {
    SemVer,
    Cargo,
    Npm,
    Pypi,
    Go,
    Maven,
    Composer,
    RubyGems,
    Conan,
    Cran,
    Alpine,
    Debian,
    Rpm,
    Alpm,
    Gentoo,
    NuGet,
}

impl Ecosystem {
    /// The canonical lowercase name used in `vers:` URIs and registry
    /// lookups (spec.md §4.1).
    pub fn name(self) -> &'static str {
        match self {
            Ecosystem::SemVer => "semver",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Npm => "npm",
            Ecosystem::Pypi => "pypi",
            Ecosystem::Go => "golang",
            Ecosystem::Maven => "maven",
            Ecosystem::Composer => "composer",
            Ecosystem::RubyGems => "gem",
            Ecosystem::Conan => "conan",
            Ecosystem::Cran => "cran",
            Ecosystem::Alpine => "alpine",
            Ecosystem::Debian => "deb",
            Ecosystem::Rpm => "rpm",
            Ecosystem::Alpm => "alpm",
            Ecosystem::Gentoo => "gentoo",
            Ecosystem::NuGet => "nuget",
        }
    }

    /// Looks up an ecosystem by name, accepting the handful of common
    /// aliases each package-index scheme is also known by.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "semver" | "generic" => Ecosystem::SemVer,
            "cargo" | "crates.io" => Ecosystem::Cargo,
            "npm" => Ecosystem::Npm,
            "pypi" | "pip" => Ecosystem::Pypi,
            "golang" | "go" => Ecosystem::Go,
            "maven" => Ecosystem::Maven,
            "composer" | "packagist" => Ecosystem::Composer,
            "gem" | "rubygems" => Ecosystem::RubyGems,
            "conan" | "conancenter" => Ecosystem::Conan,
            "cran" => Ecosystem::Cran,
            "alpine" | "apk" => Ecosystem::Alpine,
            "deb" | "debian" => Ecosystem::Debian,
            "rpm" => Ecosystem::Rpm,
            "alpm" | "arch" | "pacman" => Ecosystem::Alpm,
            "gentoo" | "ebuild" => Ecosystem::Gentoo,
            "nuget" => Ecosystem::NuGet,
            other => return Err(Error::UnknownEcosystem(other.to_string())),
        })
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializes as its canonical name string (`"cargo"`, `"golang"`, ...)
/// rather than the derived variant tag, so a `vers:` URI and a
/// serialized `Ecosystem` use the same spelling.
impl Serialize for Ecosystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Ecosystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ecosystem::from_name(&name).map_err(D::Error::custom)
    }
}

/// Parses `input` as a version of the given ecosystem.
pub fn parse_version(ecosystem: Ecosystem, input: &str) -> Result<Version, Error> {
    Ok(Version::parse(ecosystem, input)?)
}

/// Parses `input` as a range of the given ecosystem.
pub fn parse_range(ecosystem: Ecosystem, input: &str) -> Result<crate::range::Range, Error> {
    Ok(crate::range::Range::parse(ecosystem, input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_aliases() {
        assert_eq!(Ecosystem::from_name("pip").unwrap(), Ecosystem::Pypi);
        assert_eq!(Ecosystem::from_name("PyPI").unwrap(), Ecosystem::Pypi);
        assert_eq!(Ecosystem::from_name("arch").unwrap(), Ecosystem::Alpm);
    }

    #[test]
    fn rejects_unknown_ecosystem() {
        assert!(Ecosystem::from_name("cobol-packages").is_err());
    }

    #[test]
    fn serializes_as_canonical_name() {
        let json = serde_json::to_string(&Ecosystem::RubyGems).unwrap();
        assert_eq!(json, "\"gem\"");
        let back: Ecosystem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Ecosystem::RubyGems);
    }

    #[test]
    fn name_round_trips_through_from_name() {
        for eco in [
            Ecosystem::SemVer,
            Ecosystem::Cargo,
            Ecosystem::Npm,
            Ecosystem::Pypi,
            Ecosystem::Go,
            Ecosystem::Maven,
            Ecosystem::Composer,
            Ecosystem::RubyGems,
            Ecosystem::Conan,
            Ecosystem::Cran,
            Ecosystem::Alpine,
            Ecosystem::Debian,
            Ecosystem::Rpm,
            Ecosystem::Alpm,
            Ecosystem::Gentoo,
            Ecosystem::NuGet,
        ] {
            assert_eq!(Ecosystem::from_name(eco.name()).unwrap(), eco);
        }
    }
}
