// src/resolver/checker.rs

//! Relationship checker: evaluates relationship fields against a bound release

use crate::error::{Error, Result};
use crate::relations::{
    ArchRestriction, Binding, CheckedRelation, RelationKind, Relationship,
    RelationshipOptionsList, RelationshipStatus, Resolution,
};
use crate::repository::Release;
use tracing::{debug, trace};

/// Checks relationships of packages in one bound release
pub struct Checker<'a, 'r> {
    release: &'a Release<'r>,
}

impl<'a, 'r> Checker<'a, 'r> {
    pub fn new(release: &'a Release<'r>) -> Self {
        Self { release }
    }

    pub fn release(&self) -> &'a Release<'r> {
        self.release
    }

    /// Check one relationship field of `package`
    ///
    /// Build-* kinds are read from the source package (with binary to source
    /// fallback). For conflict kinds good and bad are swapped, since a
    /// satisfied Conflicts clause blocks installation.
    pub fn check(&self, package: &str, kind: RelationKind) -> Result<RelationshipStatus> {
        debug!("Checking {} of {} in {}", kind, package, self.release.releases().join(","));

        let list = if kind.is_source_field() {
            let source = self.release.source(package)?;
            if !source.found() {
                return Err(Error::PackageNotFound(package.to_string()));
            }
            source.relationship_options_list(kind)?
        } else {
            let bound = self.release.package(package)?;
            if !bound.found() {
                return Err(Error::PackageNotFound(package.to_string()));
            }
            bound.relationship_options_list(kind)?
        };

        let mut status = self.check_relationship_options_list(&list)?;
        if kind.is_conflict() {
            status.swap();
        }
        Ok(status)
    }

    /// Sort every group of `list` into good or bad
    ///
    /// Alternatives are tried left to right and the first satisfied one wins.
    pub fn check_relationship_options_list(
        &self,
        list: &RelationshipOptionsList,
    ) -> Result<RelationshipStatus> {
        let mut status = RelationshipStatus::default();

        for options in list {
            let mut resolution = None;
            for (index, relationship) in options.alternatives().iter().enumerate() {
                if let Some(binding) = self.relation_satisfied(relationship)? {
                    resolution = Some(Resolution { index, binding });
                    break;
                }
            }

            match resolution {
                Some(resolution) => status
                    .good
                    .push(CheckedRelation::resolved(options.clone(), resolution)),
                None => {
                    trace!("unsatisfied: {}", options);
                    status.bad.push(CheckedRelation::unchecked(options.clone()));
                }
            }
        }

        Ok(status)
    }

    /// How `rel` is satisfied in the bound release, or `None` if it is not
    ///
    /// Clauses restricted to other architectures are vacuously satisfied.
    /// An unversioned clause may be satisfied by a virtual package; a
    /// versioned one never is (Debian Policy 7.5).
    pub fn relation_satisfied(&self, rel: &Relationship) -> Result<Option<Binding>> {
        if !self.check_relation_arch(&rel.arch) {
            trace!("{} does not apply on {}", rel, self.release.arch());
            return Ok(Some(Binding::ArchIgnored));
        }

        let bound = self
            .release
            .package_matching(&rel.package, rel.requirement.as_ref())?;

        let Some(version) = bound.version() else {
            if rel.is_versioned() {
                return Ok(None);
            }
            let providers = self.release.providers(&rel.package)?;
            if providers.is_empty() {
                return Ok(None);
            }
            return Ok(Some(Binding::Virtual {
                name: rel.package.clone(),
                providers: providers.to_vec(),
            }));
        };

        if let Some(ref requirement) = rel.requirement
            && !requirement.satisfied_by(version)?
        {
            return Ok(None);
        }

        Ok(Some(Binding::Package(bound)))
    }

    /// Does the architecture restriction admit the bound architecture?
    ///
    /// The restriction's polarity comes from its first entry.
    pub fn check_relation_arch(&self, restriction: &ArchRestriction) -> bool {
        if restriction.is_empty() {
            return true;
        }

        let mut entries = restriction.stripped();
        if restriction.is_negative() {
            !entries.any(|arch| self.release.arch_applies(arch))
        } else {
            entries.any(|arch| self.release.arch_applies(arch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{BinaryPackage, SourcePackage};
    use crate::db::schema;
    use crate::repository::SqliteRepository;
    use rusqlite::Connection;

    fn repo() -> SqliteRepository {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();

        let mut foo = BinaryPackage::new("foo", "1.0", "amd64", "trixie");
        foo.depends = Some("bar (>> 1.0), libc6 | libc6.1 [alpha], mail-transport-agent".to_string());
        foo.conflicts = Some("bar (<< 1.0), oldfoo".to_string());
        foo.insert(&conn).unwrap();

        BinaryPackage::new("bar", "1.0", "amd64", "trixie").insert(&conn).unwrap();
        BinaryPackage::new("libc6", "2.36-9", "amd64", "trixie").insert(&conn).unwrap();

        let mut exim = BinaryPackage::new("exim4-daemon-light", "4.96", "amd64", "trixie");
        exim.provides = Some("mail-transport-agent".to_string());
        exim.insert(&conn).unwrap();

        let mut src = SourcePackage::new("foo", "1.0", "trixie");
        src.build_depends = Some("bar (>= 1.0), debhelper-compat (= 13)".to_string());
        src.insert(&conn).unwrap();

        SqliteRepository::new(conn)
    }

    fn release<'a>(repo: &'a SqliteRepository, arch: &str) -> Release<'a> {
        Release::new(repo, arch, vec!["trixie".to_string()]).unwrap()
    }

    #[test]
    fn test_check_depends() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let status = Checker::new(&release).check("foo", RelationKind::Depends).unwrap();

        assert_eq!(status.good.len(), 2);
        assert_eq!(status.bad.len(), 1);
        assert_eq!(status.bad.to_string(), "bar (>> 1.0)");
        assert!(status.unchecked.is_empty());
        assert!(!status.satisfied());

        let mta = status.good.iter().find(|r| r.is_virtual()).unwrap();
        assert_eq!(mta.satisfying_name(), Some("mail-transport-agent"));
        assert_eq!(mta.providers(), &["exim4-daemon-light".to_string()]);
    }

    #[test]
    fn test_check_not_found() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let err = Checker::new(&release)
            .check("nope", RelationKind::Depends)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflicts_are_swapped() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let status = Checker::new(&release).check("foo", RelationKind::Conflicts).unwrap();
        assert_eq!(status.good.len(), 2);
        assert!(status.bad.is_empty());
        assert!(status.satisfied());
    }

    #[test]
    fn test_build_depends_via_source() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let status = Checker::new(&release)
            .check("foo", RelationKind::BuildDepends)
            .unwrap();
        assert_eq!(status.good.len(), 1);
        assert_eq!(status.bad.to_string(), "debhelper-compat (= 13)");
    }

    #[test]
    fn test_versioned_clause_never_virtual() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let checker = Checker::new(&release);

        let rel = Relationship::parse("mail-transport-agent").unwrap();
        assert!(matches!(
            checker.relation_satisfied(&rel).unwrap(),
            Some(Binding::Virtual { .. })
        ));

        let rel = Relationship::parse("mail-transport-agent (>= 1)").unwrap();
        assert!(checker.relation_satisfied(&rel).unwrap().is_none());
    }

    #[test]
    fn test_version_operators_on_equal_version() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let checker = Checker::new(&release);

        let satisfied = |text: &str| {
            checker
                .relation_satisfied(&Relationship::parse(text).unwrap())
                .unwrap()
                .is_some()
        };
        assert!(!satisfied("bar (>> 1.0)"));
        assert!(satisfied("bar (>= 1.0)"));
        assert!(satisfied("bar (= 1.0)"));
        assert!(satisfied("bar (<= 1.0)"));
        assert!(!satisfied("bar (<< 1.0)"));
        assert!(satisfied("bar (<< 1.1)"));
    }

    #[test]
    fn test_arch_restrictions() {
        let repo = repo();
        let amd64 = release(&repo, "amd64");
        let checker = Checker::new(&amd64);

        assert!(checker.check_relation_arch(&ArchRestriction::default()));
        assert!(checker.check_relation_arch(&ArchRestriction::parse("i386 amd64")));
        assert!(!checker.check_relation_arch(&ArchRestriction::parse("alpha")));
        assert!(checker.check_relation_arch(&ArchRestriction::parse("linux-any")));
        assert!(!checker.check_relation_arch(&ArchRestriction::parse("!amd64 !i386")));
        assert!(checker.check_relation_arch(&ArchRestriction::parse("!hurd-any !kfreebsd-any")));

        let kfreebsd = release(&repo, "kfreebsd-i386");
        let checker = Checker::new(&kfreebsd);
        assert!(checker.check_relation_arch(&ArchRestriction::parse("any-i386")));
        assert!(!checker.check_relation_arch(&ArchRestriction::parse("linux-any")));
    }

    #[test]
    fn test_arch_ignored_clause_is_satisfied() {
        let repo = repo();
        let release = release(&repo, "amd64");
        let rel = Relationship::parse("libc6.1 [alpha ia64]").unwrap();
        assert!(matches!(
            Checker::new(&release).relation_satisfied(&rel).unwrap(),
            Some(Binding::ArchIgnored)
        ));
    }
}
