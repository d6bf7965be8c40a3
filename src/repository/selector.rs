// src/repository/selector.rs

//! Best-candidate selection across releases
//!
//! SQLite has no notion of Debian version ordering, so repositories fetch
//! every row matching a name and let the selector filter by version
//! requirement and rank by pin priority, then by version.

use super::Pins;
use crate::version::{DebianVersion, VersionRequirement};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Row types that carry a version and the release they belong to
pub trait Candidate {
    fn version(&self) -> &str;
    fn release(&self) -> &str;
}

impl Candidate for crate::db::models::BinaryPackage {
    fn version(&self) -> &str {
        &self.version
    }

    fn release(&self) -> &str {
        &self.release
    }
}

impl Candidate for crate::db::models::SourcePackage {
    fn version(&self) -> &str {
        &self.version
    }

    fn release(&self) -> &str {
        &self.release
    }
}

/// Picks the single best row out of a set of candidates
pub struct PackageSelector;

impl PackageSelector {
    /// Priority of a release under `pins`; unpinned releases rank 0
    pub fn pin_priority(pins: Option<&Pins>, release: &str) -> i64 {
        pins.and_then(|p| p.get(release).copied()).unwrap_or(0)
    }

    /// Filter `candidates` by `requirement`, then return the highest ranked
    ///
    /// Ranking is pin priority descending, then version descending. Rows
    /// whose version does not parse are skipped with a warning.
    pub fn select_best<T: Candidate>(
        candidates: Vec<T>,
        pins: Option<&Pins>,
        requirement: Option<&VersionRequirement>,
    ) -> Option<T> {
        let required = match requirement {
            Some(req) => match DebianVersion::parse(&req.version) {
                Ok(v) => Some((req.operator, v)),
                Err(e) => {
                    warn!("Ignoring requirement '{}': {}", req, e);
                    return None;
                }
            },
            None => None,
        };

        let mut ranked: Vec<(i64, DebianVersion, T)> = candidates
            .into_iter()
            .filter_map(|c| match DebianVersion::parse(c.version()) {
                Ok(v) => Some((Self::pin_priority(pins, c.release()), v, c)),
                Err(e) => {
                    warn!("Skipping row with unparsable version: {}", e);
                    None
                }
            })
            .filter(|(_, v, _)| match &required {
                Some((op, req)) => op.compare(v, req),
                None => true,
            })
            .collect();

        ranked.sort_by(|(pa, va, _), (pb, vb, _)| match pb.cmp(pa) {
            Ordering::Equal => vb.cmp(va),
            other => other,
        });

        let best = ranked.into_iter().next().map(|(_, _, c)| c);
        if let Some(ref c) = best {
            debug!("Selected version {} from {}", c.version(), c.release());
        }
        best
    }
}
