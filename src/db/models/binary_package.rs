// src/db/models/binary_package.rs

//! BinaryPackage model - one row of the `packages` table

use crate::error::Result;
use crate::relations::RelationKind;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use tracing::trace;

const COLUMNS: &str = "package, version, architecture, release, component, source, \
     source_version, depends, pre_depends, recommends, suggests, enhances, conflicts, \
     breaks, replaces, provides";

/// A binary package as published in one release for one architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPackage {
    pub package: String,
    pub version: String,
    /// Concrete architecture or `all`
    pub architecture: String,
    pub release: String,
    pub component: String,
    /// Source package name, when it differs from `package`
    pub source: Option<String>,
    pub source_version: Option<String>,
    pub depends: Option<String>,
    pub pre_depends: Option<String>,
    pub recommends: Option<String>,
    pub suggests: Option<String>,
    pub enhances: Option<String>,
    pub conflicts: Option<String>,
    pub breaks: Option<String>,
    pub replaces: Option<String>,
    pub provides: Option<String>,
}

impl BinaryPackage {
    /// Create a package with no relationship fields
    pub fn new(package: &str, version: &str, architecture: &str, release: &str) -> Self {
        Self {
            package: package.to_string(),
            version: version.to_string(),
            architecture: architecture.to_string(),
            release: release.to_string(),
            component: "main".to_string(),
            source: None,
            source_version: None,
            depends: None,
            pre_depends: None,
            recommends: None,
            suggests: None,
            enhances: None,
            conflicts: None,
            breaks: None,
            replaces: None,
            provides: None,
        }
    }

    /// Insert this package into the database, returning its rowid
    pub fn insert(&self, conn: &Connection) -> Result<i64> {
        conn.execute(
            &format!(
                "INSERT INTO packages ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
            ),
            params![
                &self.package,
                &self.version,
                &self.architecture,
                &self.release,
                &self.component,
                &self.source,
                &self.source_version,
                &self.depends,
                &self.pre_depends,
                &self.recommends,
                &self.suggests,
                &self.enhances,
                &self.conflicts,
                &self.breaks,
                &self.replaces,
                &self.provides,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// All rows named `name` in `releases` for `arch` or `all`
    pub fn find_candidates(
        conn: &Connection,
        name: &str,
        arch: &str,
        releases: &[String],
    ) -> Result<Vec<Self>> {
        if releases.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {COLUMNS} FROM packages
             WHERE package = ?1
               AND (architecture = ?2 OR architecture = 'all')
               AND release IN ({})",
            placeholders(3, releases.len())
        );
        trace!("find_candidates: {} arch={} releases={:?}", name, arch, releases);

        let mut stmt = conn.prepare(&sql)?;
        let args = [name, arch]
            .into_iter()
            .chain(releases.iter().map(String::as_str));
        let rows = stmt
            .query_map(params_from_iter(args), Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Names of packages whose Provides field lists `name` as a whole token
    ///
    /// The SQL `LIKE` is only a prefilter; the token match is checked here.
    pub fn find_providers(
        conn: &Connection,
        name: &str,
        arch: &str,
        releases: &[String],
    ) -> Result<Vec<String>> {
        let needle = provides_token(name);
        if releases.is_empty() || needle.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT DISTINCT package, provides FROM packages
             WHERE provides LIKE ?1
               AND (architecture = ?2 OR architecture = 'all')
               AND release IN ({})
             ORDER BY package",
            placeholders(3, releases.len())
        );
        trace!("find_providers: {} arch={} releases={:?}", name, arch, releases);

        let pattern = format!("%{}%", needle);
        let mut stmt = conn.prepare(&sql)?;
        let args = [pattern.as_str(), arch]
            .into_iter()
            .chain(releases.iter().map(String::as_str));
        let rows = stmt
            .query_map(params_from_iter(args), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let matcher = provides_matcher(&needle)?;
        let mut providers: Vec<String> = rows
            .into_iter()
            .filter(|(_, provides)| matcher.is_match(provides))
            .map(|(package, _)| package)
            .collect();
        providers.dedup();

        Ok(providers)
    }

    /// Distinct binary package names built from `source` in `releases`
    pub fn find_names_by_source(
        conn: &Connection,
        source: &str,
        releases: &[String],
    ) -> Result<Vec<String>> {
        if releases.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT DISTINCT package FROM packages
             WHERE (source = ?1 OR (source IS NULL AND package = ?1))
               AND release IN ({})
             ORDER BY package",
            placeholders(2, releases.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let args = std::iter::once(source).chain(releases.iter().map(String::as_str));
        let names = stmt
            .query_map(params_from_iter(args), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(names)
    }

    /// Source package that builds binary `name` in `releases`
    pub fn find_source_name(
        conn: &Connection,
        name: &str,
        releases: &[String],
    ) -> Result<Option<String>> {
        if releases.is_empty() {
            return Ok(None);
        }
        let sql = format!(
            "SELECT COALESCE(source, package) FROM packages
             WHERE package = ?1 AND release IN ({})
             ORDER BY release LIMIT 1",
            placeholders(2, releases.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let args = std::iter::once(name).chain(releases.iter().map(String::as_str));
        let source = stmt
            .query_row(params_from_iter(args), |row| row.get(0))
            .optional()?;

        Ok(source)
    }

    /// Source package name, which defaults to the binary name
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.package)
    }

    /// Raw text of a relationship field
    ///
    /// Source-only fields are never present on a binary package.
    pub fn field(&self, kind: RelationKind) -> Option<&str> {
        let value = match kind {
            RelationKind::Depends => &self.depends,
            RelationKind::PreDepends => &self.pre_depends,
            RelationKind::Recommends => &self.recommends,
            RelationKind::Suggests => &self.suggests,
            RelationKind::Enhances => &self.enhances,
            RelationKind::Conflicts => &self.conflicts,
            RelationKind::Breaks => &self.breaks,
            RelationKind::Replaces => &self.replaces,
            RelationKind::BuildDepends
            | RelationKind::BuildDependsIndep
            | RelationKind::BuildConflicts
            | RelationKind::BuildConflictsIndep => return None,
        };
        value.as_deref()
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            package: row.get(0)?,
            version: row.get(1)?,
            architecture: row.get(2)?,
            release: row.get(3)?,
            component: row.get(4)?,
            source: row.get(5)?,
            source_version: row.get(6)?,
            depends: row.get(7)?,
            pre_depends: row.get(8)?,
            recommends: row.get(9)?,
            suggests: row.get(10)?,
            enhances: row.get(11)?,
            conflicts: row.get(12)?,
            breaks: row.get(13)?,
            replaces: row.get(14)?,
            provides: row.get(15)?,
        })
    }
}

/// `?N, ?N+1, ...` for an IN list of `count` values starting at `first`
pub(crate) fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strip characters that cannot appear in a package name
fn provides_token(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        .collect()
}

/// Whole-token match inside a comma separated Provides value
fn provides_matcher(token: &str) -> Result<Regex> {
    let pattern = format!(r"(?:\A|[, ]){}(?:\z|[, ])", regex::escape(token));
    Regex::new(&pattern).map_err(|e| crate::error::Error::InvalidArgument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();
        conn
    }

    fn releases(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insert_and_find_candidates() {
        let conn = setup();
        BinaryPackage::new("foo", "1.0", "amd64", "trixie").insert(&conn).unwrap();
        BinaryPackage::new("foo", "1.1", "i386", "trixie").insert(&conn).unwrap();
        BinaryPackage::new("foo", "2.0", "all", "sid").insert(&conn).unwrap();

        let found =
            BinaryPackage::find_candidates(&conn, "foo", "amd64", &releases(&["trixie", "sid"]))
                .unwrap();
        let mut versions: Vec<_> = found.iter().map(|p| p.version.as_str()).collect();
        versions.sort();
        assert_eq!(versions, vec!["1.0", "2.0"]);

        let none = BinaryPackage::find_candidates(&conn, "foo", "amd64", &[]).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_find_providers_whole_token() {
        let conn = setup();
        let mut exim = BinaryPackage::new("exim4-daemon-light", "4.96", "amd64", "trixie");
        exim.provides = Some("mail-transport-agent".to_string());
        exim.insert(&conn).unwrap();

        let mut postfix = BinaryPackage::new("postfix", "3.7", "amd64", "trixie");
        postfix.provides = Some("default-mta, mail-transport-agent (= 3.7)".to_string());
        postfix.insert(&conn).unwrap();

        let mut other = BinaryPackage::new("mta-helper", "1", "amd64", "trixie");
        other.provides = Some("mail-transport-agent-extras".to_string());
        other.insert(&conn).unwrap();

        let rels = releases(&["trixie"]);
        let providers =
            BinaryPackage::find_providers(&conn, "mail-transport-agent", "amd64", &rels).unwrap();
        assert_eq!(providers, vec!["exim4-daemon-light", "postfix"]);

        let providers = BinaryPackage::find_providers(&conn, "default-mta", "amd64", &rels).unwrap();
        assert_eq!(providers, vec!["postfix"]);

        let providers =
            BinaryPackage::find_providers(&conn, "mail-transport-agent", "i386", &rels).unwrap();
        assert!(providers.is_empty());
    }

    #[test]
    fn test_find_names_by_source() {
        let conn = setup();
        let mut libc = BinaryPackage::new("libc6", "2.36-9", "amd64", "trixie");
        libc.source = Some("glibc".to_string());
        libc.insert(&conn).unwrap();
        let mut bin = BinaryPackage::new("libc-bin", "2.36-9", "amd64", "trixie");
        bin.source = Some("glibc".to_string());
        bin.insert(&conn).unwrap();
        BinaryPackage::new("glibc-doc", "2.36-9", "all", "trixie").insert(&conn).unwrap();

        let names =
            BinaryPackage::find_names_by_source(&conn, "glibc", &releases(&["trixie"])).unwrap();
        assert_eq!(names, vec!["libc-bin", "libc6"]);

        let rels = releases(&["trixie"]);
        assert_eq!(
            BinaryPackage::find_source_name(&conn, "libc6", &rels).unwrap().as_deref(),
            Some("glibc")
        );
        assert_eq!(
            BinaryPackage::find_source_name(&conn, "glibc-doc", &rels).unwrap().as_deref(),
            Some("glibc-doc")
        );
        assert_eq!(BinaryPackage::find_source_name(&conn, "nope", &rels).unwrap(), None);
    }

    #[test]
    fn test_field_lookup() {
        let mut pkg = BinaryPackage::new("foo", "1", "amd64", "trixie");
        pkg.depends = Some("bar".to_string());
        assert_eq!(pkg.field(RelationKind::Depends), Some("bar"));
        assert_eq!(pkg.field(RelationKind::Recommends), None);
        assert_eq!(pkg.field(RelationKind::BuildDepends), None);
        assert_eq!(pkg.source_name(), "foo");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(3, 2), "?3, ?4");
        assert_eq!(placeholders(1, 1), "?1");
    }
}
