// src/resolver/mod.rs

//! Relationship resolution against a bound release
//!
//! - [`Checker`]: classifies one relationship field as good or bad
//! - [`InstallChecker`]: recursively expands Depends (and Recommends) into a
//!   [`SolverHierarchy`]
//! - [`BuildDepsChecker`]: checks a source package's build-dependencies
//!
//! Nothing here computes an installation set; the checkers answer whether
//! each declared relationship can be met and by what.

mod build_deps;
mod checker;
mod hierarchy;
mod install;

pub use build_deps::{BuildDepsChecker, BuildDepsRequest, SourceRef};
pub use checker::Checker;
pub use hierarchy::{FlatHierarchy, SolverHierarchy};
pub use install::InstallChecker;
