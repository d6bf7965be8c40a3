// src/repository/sqlite.rs

//! [`PackageRepository`] over an SQLite archive snapshot

use super::selector::PackageSelector;
use super::{PackageQuery, PackageRepository, Pins};
use crate::db::models::{BinaryPackage, SourcePackage};
use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Repository backed by the `packages` and `sources` tables
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (and migrate) the database at `db_path`
    pub fn open(db_path: &str) -> Result<Self> {
        Ok(Self::new(crate::db::open(db_path)?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl PackageRepository for SqliteRepository {
    fn find_package(&self, query: &PackageQuery<'_>) -> Result<Option<BinaryPackage>> {
        debug!(
            "find_package: {} arch={} releases={:?} requirement={:?}",
            query.name, query.arch, query.releases, query.requirement
        );
        let candidates =
            BinaryPackage::find_candidates(&self.conn, query.name, query.arch, query.releases)?;
        Ok(PackageSelector::select_best(
            candidates,
            query.pins,
            query.requirement,
        ))
    }

    fn find_source_package(
        &self,
        name: &str,
        releases: &[String],
        pins: Option<&Pins>,
    ) -> Result<Option<SourcePackage>> {
        debug!("find_source_package: {} releases={:?}", name, releases);
        let candidates = SourcePackage::find_candidates(&self.conn, name, releases)?;
        Ok(PackageSelector::select_best(candidates, pins, None))
    }

    fn reverse_provides(&self, name: &str, releases: &[String], arch: &str) -> Result<Vec<String>> {
        debug!("reverse_provides: {} arch={} releases={:?}", name, arch, releases);
        BinaryPackage::find_providers(&self.conn, name, arch, releases)
    }

    fn binary_to_source(&self, name: &str, releases: &[String]) -> Result<Option<String>> {
        debug!("binary_to_source: {} releases={:?}", name, releases);
        BinaryPackage::find_source_name(&self.conn, name, releases)
    }

    fn source_binaries(&self, source: &str, releases: &[String]) -> Result<Vec<String>> {
        debug!("source_binaries: {} releases={:?}", source, releases);
        BinaryPackage::find_names_by_source(&self.conn, source, releases)
    }
}
