// src/relations/mod.rs

//! Debian package relationship model
//!
//! Relationship fields (`Depends: libc6 (>= 2.36), exim4 | mail-transport-agent`)
//! are parsed into three layers:
//!
//! - [`Relationship`]: one clause, `name (op version) [arch]`
//! - [`RelationshipOptions`]: alternatives joined by `|`
//! - [`RelationshipOptionsList`]: the comma separated field
//!
//! Checking a list produces a [`RelationshipStatus`] of [`CheckedRelation`]s;
//! the install checker's hierarchies expand into [`DependencyChain`]s.

mod chain;
mod kind;
mod options;
mod relationship;
mod status;

pub use chain::{ChainLink, DependencyChain, DependencyChainList, LinkKind};
pub use kind::RelationKind;
pub use options::{RelationshipOptions, RelationshipOptionsList};
pub use relationship::{ArchRestriction, Relationship};
pub use status::{
    Binding, BuildDepStatus, CheckedList, CheckedRelation, PackageSets, RELEASE_ARCHIGNORE,
    RELEASE_UNRESOLVED, RELEASE_VIRTUAL, RelationshipStatus, Resolution,
};
