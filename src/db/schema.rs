// src/db/schema.rs

//! SQLite schema for the archive snapshot
//!
//! The layout follows the Ultimate Debian Database `packages` and `sources`
//! tables, reduced to the columns the resolver reads. The layout revision is
//! kept in SQLite's `user_version` header field.

use crate::error::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info};

/// Snapshot layout revision written to `user_version`
pub const SCHEMA_VERSION: i32 = 1;

/// Layout revision recorded in the database header, 0 for a blank file
pub fn snapshot_version(conn: &Connection) -> Result<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Create the snapshot tables on a blank database.
///
/// A snapshot already at the current revision is left untouched. One written
/// by a newer layout is refused rather than read with the wrong columns.
pub fn migrate(conn: &Connection) -> Result<()> {
    let version = snapshot_version(conn)?;
    debug!("Snapshot schema version: {}", version);

    if version == SCHEMA_VERSION {
        return Ok(());
    }
    if version > SCHEMA_VERSION {
        return Err(Error::Config(format!(
            "snapshot schema version {} is newer than supported version {}",
            version, SCHEMA_VERSION
        )));
    }

    info!("Creating snapshot tables");
    create_tables(conn)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

/// - packages: one row per binary package, release and architecture
/// - sources: one row per source package and release
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        BEGIN;

        -- Binary packages; relationship fields hold the raw control text
        CREATE TABLE IF NOT EXISTS packages (
            package TEXT NOT NULL,
            version TEXT NOT NULL,
            architecture TEXT NOT NULL,
            release TEXT NOT NULL,
            component TEXT NOT NULL DEFAULT 'main',
            source TEXT,
            source_version TEXT,
            depends TEXT,
            pre_depends TEXT,
            recommends TEXT,
            suggests TEXT,
            enhances TEXT,
            conflicts TEXT,
            breaks TEXT,
            replaces TEXT,
            provides TEXT,
            PRIMARY KEY (package, version, architecture, release)
        );

        CREATE INDEX IF NOT EXISTS idx_packages_release ON packages(release, architecture);
        CREATE INDEX IF NOT EXISTS idx_packages_source ON packages(source, release);

        -- Source packages
        CREATE TABLE IF NOT EXISTS sources (
            source TEXT NOT NULL,
            version TEXT NOT NULL,
            release TEXT NOT NULL,
            component TEXT NOT NULL DEFAULT 'main',
            architecture TEXT,
            build_depends TEXT,
            build_depends_indep TEXT,
            build_conflicts TEXT,
            build_conflicts_indep TEXT,
            PRIMARY KEY (source, version, release)
        );

        CREATE INDEX IF NOT EXISTS idx_sources_release ON sources(release);

        COMMIT;
        ",
    )?;

    Ok(())
}
