//! Property-based tests for the ordering invariants every ecosystem's
//! `Version` must satisfy: totality, antisymmetry, and transitivity of
//! comparison, plus "parsing never panics" for junk input (spec.md §8).

use pkgver::{Ecosystem, Version};
use proptest::prelude::*;
use std::cmp::Ordering;

fn semver_like() -> impl Strategy<Value = String> {
    (0u32..5, 0u32..5, 0u32..5).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

fn debian_like() -> impl Strategy<Value = String> {
    (0u32..5, 0u32..5, 0u32..5, 0u32..5).prop_map(|(e, a, b, c)| format!("{e}:{a}.{b}.{c}-{e}"))
}

fn rpm_like() -> impl Strategy<Value = String> {
    (0u32..5, "[a-z]{0,3}", 0u32..5).prop_map(|(a, t, b)| format!("{a}.{t}{b}-1"))
}

macro_rules! order_properties {
    ($mod_name:ident, $eco:expr, $strategy:expr) => {
        mod $mod_name {
            use super::*;

            proptest! {
                #[test]
                fn antisymmetric(a in $strategy, b in $strategy) {
                    let va = Version::parse($eco, &a);
                    let vb = Version::parse($eco, &b);
                    if let (Ok(va), Ok(vb)) = (va, vb) {
                        let forward = va.compare(&vb).unwrap();
                        let backward = vb.compare(&va).unwrap();
                        prop_assert_eq!(forward, backward.reverse());
                    }
                }

                #[test]
                fn reflexive(a in $strategy) {
                    if let Ok(va) = Version::parse($eco, &a) {
                        prop_assert_eq!(va.compare(&va).unwrap(), Ordering::Equal);
                    }
                }

                #[test]
                fn transitive(a in $strategy, b in $strategy, c in $strategy) {
                    let versions = (
                        Version::parse($eco, &a),
                        Version::parse($eco, &b),
                        Version::parse($eco, &c),
                    );
                    if let (Ok(va), Ok(vb), Ok(vc)) = versions {
                        let ab = va.compare(&vb).unwrap();
                        let bc = vb.compare(&vc).unwrap();
                        if ab != Ordering::Greater && bc != Ordering::Greater {
                            prop_assert_ne!(va.compare(&vc).unwrap(), Ordering::Greater);
                        }
                    }
                }
            }
        }
    };
}

order_properties!(semver_order, Ecosystem::SemVer, semver_like());
order_properties!(npm_order, Ecosystem::Npm, semver_like());
order_properties!(cargo_order, Ecosystem::Cargo, semver_like());
order_properties!(debian_order, Ecosystem::Debian, debian_like());
order_properties!(rpm_order, Ecosystem::Rpm, rpm_like());

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parsing_never_panics(s in "\\PC{0,64}") {
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
            let _ = Version::parse(eco, &s);
            let _ = pkgver::parse_range(eco, &s);
        }
    }

    #[test]
    fn equal_versions_compare_equal_to_themselves(a in semver_like()) {
        let va = Version::parse(Ecosystem::SemVer, &a).unwrap();
        let vb = Version::parse(Ecosystem::SemVer, &a).unwrap();
        prop_assert_eq!(va.compare(&vb).unwrap(), Ordering::Equal);
        prop_assert_eq!(va, vb);
    }
}
