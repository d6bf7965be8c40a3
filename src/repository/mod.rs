// src/repository/mod.rs

//! Access to the package archive
//!
//! The resolver never talks to storage directly. It goes through a
//! [`PackageRepository`], usually wrapped in a [`Release`] binder that fixes
//! the architecture, candidate releases and pins for one resolution pass.

mod arch;
mod release;
mod selector;
mod sqlite;

pub use arch::{arch_applies, kernel_arch_split};
pub use release::{BoundPackage, BoundSource, Release};
pub use selector::{Candidate, PackageSelector};
pub use sqlite::SqliteRepository;

use crate::db::models::{BinaryPackage, SourcePackage};
use crate::error::Result;
use crate::version::VersionRequirement;
use std::collections::BTreeMap;

/// Release name to priority; higher wins
pub type Pins = BTreeMap<String, i64>;

/// Parameters of a binary package lookup
#[derive(Debug, Clone, Copy)]
pub struct PackageQuery<'a> {
    pub name: &'a str,
    pub arch: &'a str,
    pub releases: &'a [String],
    pub pins: Option<&'a Pins>,
    pub requirement: Option<&'a VersionRequirement>,
}

/// Read-only queries against an archive snapshot
///
/// Every method filters by the candidate `releases`; binary lookups also
/// accept rows with architecture `all`.
pub trait PackageRepository {
    /// The best binary package matching `query`, if any
    fn find_package(&self, query: &PackageQuery<'_>) -> Result<Option<BinaryPackage>>;

    /// The best source package called `name`, if any
    fn find_source_package(
        &self,
        name: &str,
        releases: &[String],
        pins: Option<&Pins>,
    ) -> Result<Option<SourcePackage>>;

    /// Names of packages that Provide `name`, sorted
    fn reverse_provides(&self, name: &str, releases: &[String], arch: &str) -> Result<Vec<String>>;

    /// Source package of binary `name`
    fn binary_to_source(&self, name: &str, releases: &[String]) -> Result<Option<String>>;

    /// Binary packages built from `source`, sorted
    fn source_binaries(&self, source: &str, releases: &[String]) -> Result<Vec<String>>;
}
