// src/repository/release.rs

//! Release binder: package lookups fixed to an architecture and release set

use super::{PackageQuery, PackageRepository, Pins, arch_applies};
use crate::db::models::{BinaryPackage, SourcePackage};
use crate::error::{Error, Result};
use crate::relations::{RelationKind, RelationshipOptionsList};
use crate::version::VersionRequirement;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

type PackageKey = (String, Option<VersionRequirement>);

/// A binary package name bound to a release, found or not
#[derive(Debug, Clone)]
pub struct BoundPackage {
    name: String,
    record: Option<BinaryPackage>,
}

impl BoundPackage {
    pub(crate) fn new(name: &str, record: Option<BinaryPackage>) -> Self {
        Self {
            name: name.to_string(),
            record,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A concrete record exists
    pub fn found(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&BinaryPackage> {
        self.record.as_ref()
    }

    pub fn version(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.version.as_str())
    }

    /// Release the record was taken from
    pub fn release(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.release.as_str())
    }

    /// Parse one relationship field of the package
    ///
    /// `Depends` includes the `Pre-Depends` entries after the `Depends` ones.
    /// A package that was not found has no relationships.
    pub fn relationship_options_list(&self, kind: RelationKind) -> Result<RelationshipOptionsList> {
        let Some(record) = self.record.as_ref() else {
            return Ok(RelationshipOptionsList::default());
        };
        let mut list = RelationshipOptionsList::parse_field(record.field(kind))?;
        if kind == RelationKind::Depends {
            list.extend(RelationshipOptionsList::parse_field(
                record.field(RelationKind::PreDepends),
            )?);
        }
        Ok(list)
    }
}

impl fmt::Display for BoundPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(ref r) => write!(f, "{} {} ({}, {})", r.package, r.version, r.release, r.architecture),
            None => write!(f, "{} (not found)", self.name),
        }
    }
}

/// A source package name bound to a release, found or not
#[derive(Debug, Clone)]
pub struct BoundSource {
    name: String,
    record: Option<SourcePackage>,
    binaries: Vec<String>,
}

impl BoundSource {
    /// A source assembled by hand, for checking records not held in a repository
    pub fn from_record(record: SourcePackage, binaries: Vec<String>) -> Self {
        Self {
            name: record.source.clone(),
            record: Some(record),
            binaries,
        }
    }

    /// Name the source was looked up by (a binary name if no source matched)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn found(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&SourcePackage> {
        self.record.as_ref()
    }

    pub fn version(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.version.as_str())
    }

    pub fn release(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.release.as_str())
    }

    /// Binary packages built from this source in the bound releases
    pub fn binaries(&self) -> &[String] {
        &self.binaries
    }

    pub fn relationship_options_list(&self, kind: RelationKind) -> Result<RelationshipOptionsList> {
        match self.record.as_ref() {
            Some(record) => RelationshipOptionsList::parse_field(record.field(kind)),
            None => Ok(RelationshipOptionsList::default()),
        }
    }

    pub fn build_depends(&self) -> Result<RelationshipOptionsList> {
        self.relationship_options_list(RelationKind::BuildDepends)
    }

    pub fn build_depends_indep(&self) -> Result<RelationshipOptionsList> {
        self.relationship_options_list(RelationKind::BuildDependsIndep)
    }
}

impl fmt::Display for BoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(ref r) => write!(f, "{} {} ({})", r.source, r.version, r.release),
            None => write!(f, "{} (not found)", self.name),
        }
    }
}

/// A repository bound to one architecture and an ordered set of releases
///
/// Lookups are cached by (name, version requirement) for the lifetime of the
/// binder, so one resolution pass queries each package at most once.
pub struct Release<'r> {
    repo: &'r dyn PackageRepository,
    arch: String,
    releases: Vec<String>,
    pins: Option<Pins>,
    packages: RefCell<HashMap<PackageKey, Rc<BoundPackage>>>,
    sources: RefCell<HashMap<String, Rc<BoundSource>>>,
    providers: RefCell<HashMap<String, Rc<Vec<String>>>>,
}

impl<'r> Release<'r> {
    pub fn new(repo: &'r dyn PackageRepository, arch: &str, releases: Vec<String>) -> Result<Self> {
        if releases.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one release must be bound".to_string(),
            ));
        }
        if arch.trim().is_empty() {
            return Err(Error::InvalidArgument("architecture not specified".to_string()));
        }
        Ok(Self {
            repo,
            arch: arch.to_string(),
            releases,
            pins: None,
            packages: RefCell::new(HashMap::new()),
            sources: RefCell::new(HashMap::new()),
            providers: RefCell::new(HashMap::new()),
        })
    }

    /// Rank candidates by release priority before version
    pub fn with_pins(mut self, pins: Pins) -> Self {
        self.pins = Some(pins);
        self
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn releases(&self) -> &[String] {
        &self.releases
    }

    pub fn pins(&self) -> Option<&Pins> {
        self.pins.as_ref()
    }

    /// Does the restriction entry `proposed` apply to the bound architecture?
    pub fn arch_applies(&self, proposed: &str) -> bool {
        arch_applies(proposed, &self.arch)
    }

    /// Bind the best version of `name`
    pub fn package(&self, name: &str) -> Result<Rc<BoundPackage>> {
        self.package_matching(name, None)
    }

    /// Bind the best version of `name` that satisfies `requirement`
    pub fn package_matching(
        &self,
        name: &str,
        requirement: Option<&VersionRequirement>,
    ) -> Result<Rc<BoundPackage>> {
        let key = (name.to_string(), requirement.cloned());
        if let Some(hit) = self.packages.borrow().get(&key) {
            trace!("package cache hit: {}", name);
            return Ok(Rc::clone(hit));
        }

        let query = PackageQuery {
            name,
            arch: &self.arch,
            releases: &self.releases,
            pins: self.pins.as_ref(),
            requirement,
        };
        let bound = Rc::new(BoundPackage::new(name, self.repo.find_package(&query)?));
        self.packages.borrow_mut().insert(key, Rc::clone(&bound));
        Ok(bound)
    }

    /// Packages that Provide `name` in the bound releases
    pub fn providers(&self, name: &str) -> Result<Rc<Vec<String>>> {
        if let Some(hit) = self.providers.borrow().get(name) {
            return Ok(Rc::clone(hit));
        }
        let providers = Rc::new(self.repo.reverse_provides(name, &self.releases, &self.arch)?);
        self.providers
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&providers));
        Ok(providers)
    }

    /// Some package in the bound releases Provides `name`
    pub fn is_virtual(&self, name: &str) -> Result<bool> {
        Ok(!self.providers(name)?.is_empty())
    }

    /// Bind source package `name`, falling back to the source of binary `name`
    pub fn source(&self, name: &str) -> Result<Rc<BoundSource>> {
        if let Some(hit) = self.sources.borrow().get(name) {
            return Ok(Rc::clone(hit));
        }

        let mut record = self
            .repo
            .find_source_package(name, &self.releases, self.pins.as_ref())?;
        if record.is_none()
            && let Some(source) = self.bin2src(name)?
            && source != name
        {
            trace!("bin2src: {} -> {}", name, source);
            record = self
                .repo
                .find_source_package(&source, &self.releases, self.pins.as_ref())?;
        }

        let binaries = match record {
            Some(ref r) => self.repo.source_binaries(&r.source, &self.releases)?,
            None => Vec::new(),
        };
        let bound = Rc::new(BoundSource {
            name: name.to_string(),
            record,
            binaries,
        });
        self.sources
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&bound));
        Ok(bound)
    }

    /// Source package that builds binary `name`
    pub fn bin2src(&self, name: &str) -> Result<Option<String>> {
        self.repo.binary_to_source(name, &self.releases)
    }
}

impl fmt::Display for Release<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Release: {} ({}), {} binary and {} source packages in cache",
            self.releases.join(", "),
            self.arch,
            self.packages.borrow().len(),
            self.sources.borrow().len()
        )
    }
}

impl fmt::Debug for Release<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Release")
            .field("arch", &self.arch)
            .field("releases", &self.releases)
            .field("pins", &self.pins)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::repository::SqliteRepository;
    use crate::version::VersionOperator;
    use rusqlite::Connection;

    fn repo() -> SqliteRepository {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();

        let mut foo = BinaryPackage::new("foo", "1.0", "amd64", "trixie");
        foo.depends = Some("bar".to_string());
        foo.pre_depends = Some("dpkg (>= 1.15)".to_string());
        foo.source = Some("foo-src".to_string());
        foo.insert(&conn).unwrap();
        BinaryPackage::new("foo", "2.0", "amd64", "trixie-backports")
            .insert(&conn)
            .unwrap();

        let mut src = SourcePackage::new("foo-src", "1.0", "trixie");
        src.build_depends = Some("debhelper-compat (= 13)".to_string());
        src.insert(&conn).unwrap();

        SqliteRepository::new(conn)
    }

    fn rels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bind_requires_releases() {
        let repo = repo();
        assert!(Release::new(&repo, "amd64", Vec::new()).is_err());
        assert!(Release::new(&repo, "", rels(&["trixie"])).is_err());
    }

    #[test]
    fn test_package_lookup_and_cache() {
        let repo = repo();
        let release = Release::new(&repo, "amd64", rels(&["trixie", "trixie-backports"])).unwrap();

        let foo = release.package("foo").unwrap();
        assert_eq!(foo.version(), Some("2.0"));
        let again = release.package("foo").unwrap();
        assert!(Rc::ptr_eq(&foo, &again));

        let missing = release.package("nope").unwrap();
        assert!(!missing.found());
        assert_eq!(missing.to_string(), "nope (not found)");
    }

    #[test]
    fn test_pins_prefer_release() {
        let repo = repo();
        let pins: Pins = [("trixie".to_string(), 1), ("trixie-backports".to_string(), 0)]
            .into_iter()
            .collect();
        let release = Release::new(&repo, "amd64", rels(&["trixie", "trixie-backports"]))
            .unwrap()
            .with_pins(pins);
        assert_eq!(release.package("foo").unwrap().release(), Some("trixie"));

        let req = VersionRequirement::new(VersionOperator::StrictlyGreater, "1.0");
        let bound = release.package_matching("foo", Some(&req)).unwrap();
        assert_eq!(bound.release(), Some("trixie-backports"));
    }

    #[test]
    fn test_depends_includes_pre_depends() {
        let repo = repo();
        let release = Release::new(&repo, "amd64", rels(&["trixie"])).unwrap();
        let foo = release.package("foo").unwrap();
        let list = foo.relationship_options_list(RelationKind::Depends).unwrap();
        assert_eq!(list.to_string(), "bar, dpkg (>= 1.15)");
        let list = foo.relationship_options_list(RelationKind::PreDepends).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_source_with_bin2src_fallback() {
        let repo = repo();
        let release = Release::new(&repo, "amd64", rels(&["trixie"])).unwrap();

        let direct = release.source("foo-src").unwrap();
        assert!(direct.found());
        assert_eq!(direct.binaries(), &["foo".to_string()]);

        let via_binary = release.source("foo").unwrap();
        assert!(via_binary.found());
        assert_eq!(via_binary.record().unwrap().source, "foo-src");
        assert_eq!(via_binary.build_depends().unwrap().len(), 1);

        assert!(!release.source("nope").unwrap().found());
    }
}
