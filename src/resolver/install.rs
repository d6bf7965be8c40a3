// src/resolver/install.rs

//! Recursive installability checking

use super::checker::Checker;
use super::hierarchy::SolverHierarchy;
use crate::error::{Error, Result};
use crate::relations::{Binding, CheckedRelation, RelationKind};
use crate::repository::Release;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// State of one top-level installability check
struct Traversal {
    visited: HashSet<String>,
    include_recommends: bool,
}

/// Builds the dependency tree of a package
///
/// Every package is expanded at most once per call to [`check`](Self::check);
/// a second encounter leaves the group without a subtree. When a group is
/// satisfied through a virtual package, the first provider that can itself
/// be expanded is used.
pub struct InstallChecker<'a, 'r> {
    checker: Checker<'a, 'r>,
}

impl<'a, 'r> InstallChecker<'a, 'r> {
    pub fn new(release: &'a Release<'r>) -> Self {
        Self {
            checker: Checker::new(release),
        }
    }

    pub fn checker(&self) -> &Checker<'a, 'r> {
        &self.checker
    }

    /// Check that `package` and everything it depends on can be installed
    pub fn check(&self, package: &str, include_recommends: bool) -> Result<SolverHierarchy> {
        info!(
            "Checking installability of {} (recommends: {})",
            package, include_recommends
        );
        let mut traversal = Traversal {
            visited: HashSet::new(),
            include_recommends,
        };

        self.expand(package, 0, &mut traversal)?
            .ok_or_else(|| Error::PackageNotFound(package.to_string()))
    }

    fn expand(
        &self,
        package: &str,
        level: usize,
        traversal: &mut Traversal,
    ) -> Result<Option<SolverHierarchy>> {
        if !traversal.visited.insert(package.to_string()) {
            debug!("{} already visited", package);
            return Ok(None);
        }

        let mut node = SolverHierarchy::new(package, level);
        node.depends = self.checker.check(package, RelationKind::Depends)?;
        if traversal.include_recommends {
            node.recommends = self.checker.check(package, RelationKind::Recommends)?;
        }

        for relation in node.depends.good.iter_mut() {
            relation.subtree = self.expand_relation(relation, level + 1, traversal)?.map(Box::new);
        }
        for relation in node.recommends.good.iter_mut() {
            relation.subtree = self.expand_relation(relation, level + 1, traversal)?.map(Box::new);
        }

        node.mark_last_siblings();
        Ok(Some(node))
    }

    fn expand_relation(
        &self,
        relation: &CheckedRelation,
        level: usize,
        traversal: &mut Traversal,
    ) -> Result<Option<SolverHierarchy>> {
        match relation.binding() {
            Some(Binding::Package(bound)) => self.expand_child(bound.name(), level, traversal),
            Some(Binding::Virtual { name, providers }) => {
                for provider in providers {
                    if let Some(node) = self.expand_child(provider, level, traversal)? {
                        debug!("{} provided by {}", name, provider);
                        return Ok(Some(node));
                    }
                }
                Ok(None)
            }
            Some(Binding::ArchIgnored) | None => Ok(None),
        }
    }

    /// Expand a package that was already shown to exist
    fn expand_child(
        &self,
        package: &str,
        level: usize,
        traversal: &mut Traversal,
    ) -> Result<Option<SolverHierarchy>> {
        match self.expand(package, level, traversal) {
            Err(Error::PackageNotFound(name)) => {
                warn!("{} satisfied a relationship but could not be bound", name);
                Ok(None)
            }
            other => other,
        }
    }
}
