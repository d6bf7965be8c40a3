// src/lib.rs

//! uddcheck: Debian package relationship checking
//!
//! Answers whether the relationships a package declares (Depends,
//! Recommends, Build-Depends and the rest) can be met within one release
//! and architecture of an archive snapshot, and why two packages are
//! connected by a dependency path.
//!
//! # Architecture
//!
//! - Snapshot in SQLite: binary and source package records per release
//! - Releases bound once: a [`repository::Release`] caches lookups for one
//!   architecture and list of releases
//! - Checking never mutates parsed relationships; results pair each clause
//!   with how it was resolved
//! - Recursive installability checks produce a [`resolver::SolverHierarchy`]
//!   that can be flattened or walked for dependency chains

pub mod config;
pub mod data;
pub mod db;
mod error;
pub mod queries;
pub mod relations;
pub mod repository;
pub mod resolver;
pub mod version;

pub use config::Config;
pub use data::DistroData;
pub use error::{Error, Result};
pub use queries::{BackportReport, Queries};
pub use relations::{RelationKind, Relationship, RelationshipOptionsList, RelationshipStatus};
pub use repository::{PackageRepository, Release, SqliteRepository};
pub use version::DebianVersion;
