//! One module per supported ecosystem, each exposing a `Version` and a
//! `Range` type with `parse`/`contains` and full `Ord`. [`crate::version`],
//! [`crate::range`], and [`crate::registry`] wrap all of them behind a
//! single tagged enum, the way `deps-lsp`'s `document::state::Ecosystem`
//! wraps its four manifest kinds behind one enum rather than a `dyn Trait`
//! object (spec.md §2/§9: closed set, known at compile time, no plugin
//! story needed).

pub mod alpine;
pub mod alpm;
pub mod cargo;
pub mod composer;
pub mod conan;
pub mod cran;
pub mod debian;
pub mod gentoo;
pub mod go;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod pypi;
pub mod rpm;
pub mod rubygems;
pub mod semver;
