// tests/queries.rs

//! Query facade tests: relation checks, build-dependencies, backports and
//! release binding.

mod common;

use common::{ARCH, open_repo, pkg, setup_snapshot, sid, src};
use uddcheck::db::models::{BinaryPackage, SourcePackage};
use uddcheck::relations::RelationshipOptionsList;
use uddcheck::resolver::{BuildDepsChecker, BuildDepsRequest};
use uddcheck::{DistroData, Error, Queries, RelationKind, Release};

/// `hello` is built in sid and needs a newer libfoo-dev than trixie has
fn setup_backport_snapshot() -> (tempfile::TempDir, String) {
    setup_snapshot(
        &[
            BinaryPackage {
                depends: Some("libc6 (>= 2.34)".to_string()),
                recommends: Some("hello-doc".to_string()),
                suggests: Some("hello-extras".to_string()),
                ..sid("hello", "2.10-3")
            },
            BinaryPackage {
                source: Some("hello".to_string()),
                ..BinaryPackage::new("hello-doc", "2.10-3", "all", "sid")
            },
            sid("libc6", "2.40-1"),
            pkg("debhelper", "13.24.2", "trixie"),
            pkg("libfoo-dev", "1.5-1", "trixie"),
            pkg("texinfo", "7.1-3", "trixie"),
            pkg("debhelper", "13.25~bpo13+1", "trixie-backports"),
            pkg("libfoo-dev", "2.1-1~bpo13+1", "trixie-backports"),
        ],
        &[SourcePackage {
            build_depends: Some(
                "debhelper (>= 13.11), libfoo-dev (>= 2.0), libkvm-dev [kfreebsd-any]".to_string(),
            ),
            build_depends_indep: Some("texinfo".to_string()),
            ..src("hello", "2.10-3", "sid")
        }],
    )
}

#[test]
fn test_check_relations_several_kinds() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let data = DistroData::default();

    let kinds = [RelationKind::Depends, RelationKind::Recommends, RelationKind::Suggests];
    let statuses = Queries::new(&repo, &data)
        .check_relations("hello", "unstable", ARCH, &kinds)
        .unwrap();

    assert_eq!(statuses.len(), 3);
    assert_eq!(statuses[0].0, RelationKind::Depends);
    assert!(statuses[0].1.satisfied());
    assert!(statuses[1].1.satisfied());
    assert_eq!(statuses[2].1.bad.to_string(), "hello-extras");
}

#[test]
fn test_check_relation_binds_release_aliases() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let data = DistroData::default();
    let queries = Queries::new(&repo, &data);

    assert_eq!(queries.dependent_releases("unstable"), vec!["sid"]);
    let status = queries
        .check_relation("hello", "unstable", ARCH, RelationKind::Depends)
        .unwrap();
    assert_eq!(status.good.to_string(), "libc6 (>= 2.34)");

    let err = queries
        .check_relation("hello", "stable", ARCH, RelationKind::Depends)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_unknown_release_is_bound_literally() {
    let (_dir, db_path) = setup_snapshot(
        &[
            BinaryPackage {
                depends: Some("base-files".to_string()),
                ..pkg("custom-tool", "0.3", "internal-updates")
            },
            pkg("base-files", "13.5", "internal-updates"),
        ],
        &[],
    );
    let repo = open_repo(&db_path);
    let data = DistroData::default();
    let queries = Queries::new(&repo, &data);

    assert_eq!(queries.dependent_releases("internal-updates"), vec!["internal-updates"]);
    let status = queries
        .check_relation("custom-tool", "internal-updates", ARCH, RelationKind::Depends)
        .unwrap();
    assert!(status.satisfied());
}

#[test]
fn test_source_binaries_and_binary_fallback() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let release = Release::new(&repo, ARCH, vec!["sid".to_string()]).unwrap();

    assert_eq!(release.bin2src("hello-doc").unwrap().as_deref(), Some("hello"));

    let source = release.source("hello-doc").unwrap();
    assert!(source.found());
    assert_eq!(source.name(), "hello-doc");
    assert_eq!(source.record().map(|r| r.source.as_str()), Some("hello"));
    assert_eq!(source.binaries(), ["hello".to_string(), "hello-doc".to_string()]);

    assert!(!release.source("not-a-source").unwrap().found());
}

#[test]
fn test_check_build_deps_single_release() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let data = DistroData::default();

    let status = Queries::new(&repo, &data)
        .check_build_deps("hello", "sid", "trixie", ARCH)
        .unwrap();

    assert!(!status.all_found());
    assert_eq!(status.bd.bad.to_string(), "libfoo-dev (>= 2.0)");
    assert_eq!(status.bd.good.len(), 2);
    assert!(status.bdi.satisfied());

    let rendered = status.to_string();
    assert!(rendered.starts_with("Build-Depends: Good: debhelper (>= 13.11), libkvm-dev [kfreebsd-any]"));
}

#[test]
fn test_check_build_deps_missing_source() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let data = DistroData::default();

    let err = Queries::new(&repo, &data)
        .check_build_deps("no-such-source", "sid", "trixie", ARCH)
        .unwrap_err();
    assert!(matches!(err, Error::PackageNotFound(ref name) if name == "no-such-source"));
}

#[test]
fn test_check_backport_uses_backports_overlay() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let data = DistroData::default();

    let report = Queries::new(&repo, &data)
        .check_backport("hello", "unstable", "stable", ARCH)
        .unwrap();

    assert_eq!(report.from_release, "sid");
    assert_eq!(report.checked_releases, vec!["trixie", "trixie-backports"]);
    assert!(report.status.all_found());

    let map = report.status.release_map();
    let names = |release: &str| -> Vec<String> {
        map[release]
            .iter()
            .filter_map(|r| r.satisfying_name().map(str::to_string))
            .collect()
    };
    // the base release outranks the overlay for debhelper
    assert_eq!(names("trixie"), vec!["debhelper", "texinfo"]);
    assert_eq!(names("trixie-backports"), vec!["libfoo-dev"]);
    assert_eq!(map["archignore"].len(), 1);
}

#[test]
fn test_build_deps_request_variants() {
    let (_dir, db_path) = setup_backport_snapshot();
    let repo = open_repo(&db_path);
    let trixie = Release::new(&repo, ARCH, vec!["trixie".to_string()]).unwrap();
    let checker = BuildDepsChecker::new(&trixie);

    let lists = BuildDepsRequest::lists(
        RelationshipOptionsList::parse("debhelper (>= 13), texinfo | makeinfo").unwrap(),
        RelationshipOptionsList::default(),
    );
    let status = checker.check(lists).unwrap();
    assert!(status.all_found());
    assert_eq!(status.bd.good.len(), 2);

    let err = checker.check(BuildDepsRequest::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    // hello has no source record in trixie
    let err = checker.check(BuildDepsRequest::by_name("hello")).unwrap_err();
    assert!(err.is_not_found());
}
