//! Polyglot package-version parsing, ordering, and range containment.
//!
//! This crate understands the version and range grammars of sixteen
//! package ecosystems — npm, PyPI, Go modules, Maven, Cargo, RubyGems,
//! Composer, Conan, CRAN, Alpine, Debian, RPM, ALPM, Gentoo, NuGet, and
//! generic SemVer — plus the cross-ecosystem `vers:` URI scheme.
//!
//! Each ecosystem lives in its own module under [`ecosystems`] with its
//! own `Version` and `Range` types, implementing whatever ordering rules
//! that ecosystem actually uses (npm's build-metadata-blind SemVer,
//! Debian's `~`-sorts-lowest `verrevcmp`, RubyGems' alpha-above-numeric
//! segments, and so on). [`Version`] and [`Range`] are closed enums over
//! all sixteen, so callers that don't know the ecosystem ahead of time
//! can still parse and compare through [`registry::Ecosystem`] and the
//! free functions re-exported here.
//!
//! ```
//! use pkgver::{Ecosystem, Version};
//!
//! let a = Version::parse(Ecosystem::Npm, "1.2.3").unwrap();
//! let b = Version::parse(Ecosystem::Npm, "1.10.0").unwrap();
//! assert!(a.compare(&b).unwrap().is_lt());
//! ```
//!
//! Mixing ecosystems is a caller error, not a panic: [`Version::compare`]
//! returns [`Error::EcosystemMismatch`] and [`Range::contains`] logs a
//! [`tracing::warn!`] and returns `false`. Set up a subscriber with
//! `tracing-subscriber` in a binary that embeds this crate to see those
//! warnings.

pub mod ecosystems;
pub mod error;
pub mod range;
pub mod registry;
pub mod vers;
pub mod version;

pub use error::{Error, ParseError};
pub use range::Range;
pub use registry::{parse_range, parse_version, Ecosystem};
pub use vers::VersRange;
pub use version::Version;

/// Parses a `vers:` URI and checks whether `version_str` satisfies it.
///
/// A thin re-export of [`vers::contains`] at the crate root, since this
/// is the single most common entry point for callers that only ever see
/// versions as `vers:` URIs (vulnerability advisories, SBOMs) rather than
/// going through [`Ecosystem`] and [`Range`] directly.
pub fn vers_contains(uri: &str, version_str: &str) -> Result<bool, Error> {
    vers::contains(uri, version_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_compares_across_the_public_api() {
        let a = Version::parse(Ecosystem::Pypi, "1.0.0").unwrap();
        let b = Version::parse(Ecosystem::Pypi, "1.0.1").unwrap();
        assert!(a.compare(&b).unwrap().is_lt());
    }

    #[test]
    fn range_containment_through_the_registry() {
        let range = parse_range(Ecosystem::Cargo, ">=1.0.0, <2.0.0").unwrap();
        let version = parse_version(Ecosystem::Cargo, "1.5.0").unwrap();
        assert!(range.contains(&version));
    }

    #[test]
    fn vers_uri_entry_point() {
        assert!(vers_contains("vers:npm/>=1.0.0|<2.0.0", "1.5.0").unwrap());
        assert!(!vers_contains("vers:npm/>=1.0.0|<2.0.0", "2.0.0").unwrap());
    }
}
