// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use tempfile::TempDir;
use uddcheck::SqliteRepository;
use uddcheck::db;
use uddcheck::db::models::{BinaryPackage, SourcePackage};

pub const ARCH: &str = "amd64";

/// Binary package in `release` for the test architecture
pub fn pkg(name: &str, version: &str, release: &str) -> BinaryPackage {
    BinaryPackage::new(name, version, ARCH, release)
}

/// Binary package in sid for the test architecture
pub fn sid(name: &str, version: &str) -> BinaryPackage {
    pkg(name, version, "sid")
}

pub fn src(name: &str, version: &str, release: &str) -> SourcePackage {
    SourcePackage::new(name, version, release)
}

/// Create a snapshot database holding the given rows.
///
/// Returns (TempDir, db_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_snapshot(binaries: &[BinaryPackage], sources: &[SourcePackage]) -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("snapshot.db")
        .to_str()
        .unwrap()
        .to_string();

    db::init(&db_path).unwrap();
    let mut conn = db::open(&db_path).unwrap();

    db::transaction(&mut conn, |tx| {
        for binary in binaries {
            binary.insert(tx)?;
        }
        for source in sources {
            source.insert(tx)?;
        }
        Ok(())
    })
    .unwrap();

    (temp_dir, db_path)
}

/// Open the snapshot as a repository
pub fn open_repo(db_path: &str) -> SqliteRepository {
    SqliteRepository::open(db_path).unwrap()
}

/// A small sid snapshot with a mail transport agent, a versioned
/// dependency and an architecture-restricted one.
///
/// - `mutt` Depends: `default-mta | mail-transport-agent`, `libc6`
/// - `postfix` and `exim4` Provide `mail-transport-agent`
/// - `foo` Depends: `bar (>> 1.0)`, bar is at 1.0
/// - `baz` Depends: `libc6`, `libkvm [kfreebsd-any]`, `libnotthere [!amd64]`
pub fn setup_mail_snapshot() -> (TempDir, String) {
    setup_snapshot(
        &[
            sid("libc6", "2.40-1"),
            BinaryPackage {
                depends: Some("default-mta | mail-transport-agent, libc6 (>= 2.36)".to_string()),
                ..sid("mutt", "2.2.13-1")
            },
            BinaryPackage {
                depends: Some("libc6".to_string()),
                provides: Some("mail-transport-agent, smtp-server".to_string()),
                ..sid("postfix", "3.9.0-1")
            },
            BinaryPackage {
                depends: Some("libc6".to_string()),
                provides: Some("mail-transport-agent".to_string()),
                ..sid("exim4", "4.98-1")
            },
            BinaryPackage {
                depends: Some("bar (>> 1.0)".to_string()),
                ..sid("foo", "1.0-1")
            },
            sid("bar", "1.0"),
            BinaryPackage {
                depends: Some("libc6, libkvm [kfreebsd-any], libnotthere [!amd64]".to_string()),
                ..sid("baz", "1.0-1")
            },
        ],
        &[],
    )
}
