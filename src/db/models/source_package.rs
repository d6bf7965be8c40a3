// src/db/models/source_package.rs

//! SourcePackage model - one row of the `sources` table

use super::binary_package::placeholders;
use crate::error::Result;
use crate::relations::RelationKind;
use rusqlite::{Connection, Row, params, params_from_iter};
use tracing::trace;

const COLUMNS: &str = "source, version, release, component, architecture, build_depends, \
     build_depends_indep, build_conflicts, build_conflicts_indep";

/// A source package as published in one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePackage {
    pub source: String,
    pub version: String,
    pub release: String,
    pub component: String,
    /// Architecture list from the `.dsc` (`any`, `all`, `linux-any` ...)
    pub architecture: Option<String>,
    pub build_depends: Option<String>,
    pub build_depends_indep: Option<String>,
    pub build_conflicts: Option<String>,
    pub build_conflicts_indep: Option<String>,
}

impl SourcePackage {
    pub fn new(source: &str, version: &str, release: &str) -> Self {
        Self {
            source: source.to_string(),
            version: version.to_string(),
            release: release.to_string(),
            component: "main".to_string(),
            architecture: None,
            build_depends: None,
            build_depends_indep: None,
            build_conflicts: None,
            build_conflicts_indep: None,
        }
    }

    /// Insert this source package into the database, returning its rowid
    pub fn insert(&self, conn: &Connection) -> Result<i64> {
        conn.execute(
            &format!("INSERT INTO sources ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
            params![
                &self.source,
                &self.version,
                &self.release,
                &self.component,
                &self.architecture,
                &self.build_depends,
                &self.build_depends_indep,
                &self.build_conflicts,
                &self.build_conflicts_indep,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// All rows for source `name` in `releases`
    pub fn find_candidates(conn: &Connection, name: &str, releases: &[String]) -> Result<Vec<Self>> {
        if releases.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {COLUMNS} FROM sources WHERE source = ?1 AND release IN ({})",
            placeholders(2, releases.len())
        );
        trace!("find_source_candidates: {} releases={:?}", name, releases);

        let mut stmt = conn.prepare(&sql)?;
        let args = std::iter::once(name).chain(releases.iter().map(String::as_str));
        let rows = stmt
            .query_map(params_from_iter(args), Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Raw text of a build relationship field
    pub fn field(&self, kind: RelationKind) -> Option<&str> {
        let value = match kind {
            RelationKind::BuildDepends => &self.build_depends,
            RelationKind::BuildDependsIndep => &self.build_depends_indep,
            RelationKind::BuildConflicts => &self.build_conflicts,
            RelationKind::BuildConflictsIndep => &self.build_conflicts_indep,
            _ => return None,
        };
        value.as_deref()
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            source: row.get(0)?,
            version: row.get(1)?,
            release: row.get(2)?,
            component: row.get(3)?,
            architecture: row.get(4)?,
            build_depends: row.get(5)?,
            build_depends_indep: row.get(6)?,
            build_conflicts: row.get(7)?,
            build_conflicts_indep: row.get(8)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    #[test]
    fn test_insert_and_find() {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();

        let mut glibc = SourcePackage::new("glibc", "2.36-9", "trixie");
        glibc.build_depends = Some("gettext, bison".to_string());
        glibc.insert(&conn).unwrap();
        SourcePackage::new("glibc", "2.40-1", "sid").insert(&conn).unwrap();

        let found =
            SourcePackage::find_candidates(&conn, "glibc", &["trixie".to_string()]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field(RelationKind::BuildDepends), Some("gettext, bison"));
        assert_eq!(found[0].field(RelationKind::Depends), None);
    }
}
