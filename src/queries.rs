// src/queries.rs

//! High-level queries: bind releases, run a checker, shape the result
//!
//! Release names may be codenames or suite aliases. Names not listed in the
//! distribution data are bound literally so snapshots with extra releases
//! remain usable.

use crate::data::DistroData;
use crate::error::{Error, Result};
use crate::relations::{BuildDepStatus, DependencyChainList, RelationKind, RelationshipStatus};
use crate::repository::{PackageRepository, Release};
use crate::resolver::{BuildDepsChecker, BuildDepsRequest, Checker, InstallChecker, SolverHierarchy};
use tracing::{debug, info};

/// Outcome of a backport feasibility check
#[derive(Debug, Clone)]
pub struct BackportReport {
    /// Release the source package was taken from
    pub from_release: String,
    /// Releases searched for build-dependencies, highest priority first
    pub checked_releases: Vec<String>,
    pub status: BuildDepStatus,
}

/// Entry point for the consumer-facing operations
pub struct Queries<'r> {
    repo: &'r dyn PackageRepository,
    data: &'r DistroData,
    max_chains: Option<usize>,
}

impl<'r> Queries<'r> {
    pub fn new(repo: &'r dyn PackageRepository, data: &'r DistroData) -> Self {
        Self {
            repo,
            data,
            max_chains: None,
        }
    }

    /// Limit the number of chains `why` may enumerate
    pub fn with_max_chains(mut self, max_chains: Option<usize>) -> Self {
        self.max_chains = max_chains;
        self
    }

    pub fn data(&self) -> &DistroData {
        self.data
    }

    fn canonical(&self, release: &str) -> String {
        self.data
            .clean_release_name(release)
            .unwrap_or_else(|| release.to_string())
    }

    /// Releases bound for dependency analysis of `release`
    pub fn dependent_releases(&self, release: &str) -> Vec<String> {
        let releases = self.data.list_dependent_releases(release, &[]);
        if releases.is_empty() {
            debug!("Unknown release {}, binding it as given", release);
            vec![release.to_string()]
        } else {
            releases
        }
    }

    fn bind(&self, release: &str, arch: &str) -> Result<Release<'r>> {
        Release::new(self.repo, arch, self.dependent_releases(release))
    }

    /// Check several relationship fields of `package` at once
    pub fn check_relations(
        &self,
        package: &str,
        release: &str,
        arch: &str,
        kinds: &[RelationKind],
    ) -> Result<Vec<(RelationKind, RelationshipStatus)>> {
        let bound = self.bind(release, arch)?;
        let checker = Checker::new(&bound);
        kinds
            .iter()
            .map(|&kind| checker.check(package, kind).map(|status| (kind, status)))
            .collect()
    }

    pub fn check_relation(
        &self,
        package: &str,
        release: &str,
        arch: &str,
        kind: RelationKind,
    ) -> Result<RelationshipStatus> {
        let bound = self.bind(release, arch)?;
        Checker::new(&bound).check(package, kind)
    }

    pub fn check_install(
        &self,
        package: &str,
        release: &str,
        arch: &str,
        include_recommends: bool,
    ) -> Result<SolverHierarchy> {
        let bound = self.bind(release, arch)?;
        InstallChecker::new(&bound).check(package, include_recommends)
    }

    /// Check the build-dependencies of `package` as found in `from_release`
    /// against exactly `to_release`
    pub fn check_build_deps(
        &self,
        package: &str,
        from_release: &str,
        to_release: &str,
        arch: &str,
    ) -> Result<BuildDepStatus> {
        let from = Release::new(self.repo, arch, vec![self.canonical(from_release)])?;
        let to = Release::new(self.repo, arch, vec![self.canonical(to_release)])?;

        let source = from.source(package)?;
        if !source.found() {
            return Err(Error::PackageNotFound(package.to_string()));
        }
        BuildDepsChecker::new(&to).check(BuildDepsRequest::prebound(source))
    }

    /// Could `package` from `from_release` be built in `to_release` plus
    /// its backports overlay?
    ///
    /// The target releases are pinned in order so the base release wins over
    /// the overlay whenever both satisfy a clause.
    pub fn check_backport(
        &self,
        package: &str,
        from_release: &str,
        to_release: &str,
        arch: &str,
    ) -> Result<BackportReport> {
        let from_release = self.canonical(from_release);
        let from = Release::new(self.repo, arch, vec![from_release.clone()])?;

        let mut checked_releases = self
            .data
            .list_dependent_releases(to_release, &self.data.backport_suffixes);
        if checked_releases.is_empty() {
            checked_releases.push(to_release.to_string());
        }
        let pins = DistroData::ordered_pins(&checked_releases);
        let to = Release::new(self.repo, arch, checked_releases.clone())?.with_pins(pins);

        info!(
            "Backport check for {} in {} -> {}",
            package,
            from_release,
            checked_releases.join(", ")
        );
        let source = from.source(package)?;
        if !source.found() {
            return Err(Error::PackageNotFound(package.to_string()));
        }
        let status = BuildDepsChecker::new(&to).check(BuildDepsRequest::prebound(source))?;

        Ok(BackportReport {
            from_release,
            checked_releases,
            status,
        })
    }

    /// All dependency chains leading from `from` to `to`
    ///
    /// Chains are cut at the first occurrence of `to`, de-duplicated and
    /// sorted so that chains of hard dependencies come first.
    pub fn why(
        &self,
        from: &str,
        to: &str,
        release: &str,
        arch: &str,
        include_recommends: bool,
    ) -> Result<DependencyChainList> {
        let hierarchy = self.check_install(from, release, arch, include_recommends)?;

        if let Some(limit) = self.max_chains {
            let count = hierarchy.chain_count();
            if count > limit {
                return Err(Error::ChainLimitExceeded { count, limit });
            }
        }

        Ok(hierarchy.chains().truncated(to).unique().sorted())
    }
}
