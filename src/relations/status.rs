// src/relations/status.rs

//! Outcome of checking relationship groups against a bound release
//!
//! Parsed relationships are never modified by a check. Instead each group is
//! paired with a [`Resolution`] describing which alternative satisfied it and
//! how, and (for the install checker) the subtree of the package it pulled in.

use super::options::{RelationshipOptions, RelationshipOptionsList};
use super::relationship::Relationship;
use crate::repository::BoundPackage;
use crate::resolver::SolverHierarchy;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

/// Pseudo-release for clauses that do not apply on the bound architecture
pub const RELEASE_ARCHIGNORE: &str = "archignore";
/// Pseudo-release for clauses satisfied through Provides
pub const RELEASE_VIRTUAL: &str = "virtual";
/// Pseudo-release for clauses nothing satisfied
pub const RELEASE_UNRESOLVED: &str = "unresolved";

/// How a single clause was satisfied
#[derive(Debug, Clone)]
pub enum Binding {
    /// A concrete package record in one of the bound releases
    Package(Rc<BoundPackage>),
    /// No concrete record, but these packages provide the name
    Virtual { name: String, providers: Vec<String> },
    /// The clause's architecture restriction excludes the bound architecture
    ArchIgnored,
}

/// The alternative that satisfied a group, by index, and its binding
#[derive(Debug, Clone)]
pub struct Resolution {
    pub index: usize,
    pub binding: Binding,
}

/// A relationship group paired with the result of checking it
#[derive(Debug, Clone)]
pub struct CheckedRelation {
    pub options: RelationshipOptions,
    pub resolution: Option<Resolution>,
    /// Hierarchy of the package this group pulled in, if it was expanded
    pub subtree: Option<Box<SolverHierarchy>>,
}

impl CheckedRelation {
    pub fn unchecked(options: RelationshipOptions) -> Self {
        Self {
            options,
            resolution: None,
            subtree: None,
        }
    }

    pub fn resolved(options: RelationshipOptions, resolution: Resolution) -> Self {
        Self {
            options,
            resolution: Some(resolution),
            subtree: None,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.resolution.is_some()
    }

    /// The alternative that satisfied the group
    pub fn satisfied_by(&self) -> Option<&Relationship> {
        self.resolution
            .as_ref()
            .and_then(|r| self.options.alternatives().get(r.index))
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.resolution.as_ref().map(|r| &r.binding)
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.binding(), Some(Binding::Virtual { .. }))
    }

    pub fn arch_ignored(&self) -> bool {
        matches!(self.binding(), Some(Binding::ArchIgnored))
    }

    /// Name of the package (or virtual name) that satisfied the group
    pub fn satisfying_name(&self) -> Option<&str> {
        self.satisfied_by().map(|r| r.package.as_str())
    }

    /// Providers of a virtual binding, empty otherwise
    pub fn providers(&self) -> &[String] {
        match self.binding() {
            Some(Binding::Virtual { providers, .. }) => providers,
            _ => &[],
        }
    }

    /// Release that supplied the satisfying package, or a pseudo-release
    pub fn release_key(&self) -> &str {
        match self.binding() {
            None => RELEASE_UNRESOLVED,
            Some(Binding::ArchIgnored) => RELEASE_ARCHIGNORE,
            Some(Binding::Virtual { .. }) => RELEASE_VIRTUAL,
            Some(Binding::Package(pkg)) => pkg.release().unwrap_or(RELEASE_UNRESOLVED),
        }
    }

    /// Same group and outcome without the expanded subtree
    pub(crate) fn detached(&self) -> Self {
        Self {
            options: self.options.clone(),
            resolution: self.resolution.clone(),
            subtree: None,
        }
    }
}

impl fmt::Display for CheckedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.options)
    }
}

/// An ordered list of checked groups
#[derive(Debug, Clone, Default)]
pub struct CheckedList(Vec<CheckedRelation>);

impl CheckedList {
    pub fn push(&mut self, relation: CheckedRelation) {
        self.0.push(relation);
    }

    pub fn extend(&mut self, other: CheckedList) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckedRelation> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CheckedRelation> {
        self.0.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(&CheckedRelation) -> bool) {
        self.0.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Group entries by the release that satisfied them
    ///
    /// Entries resolved through Provides land under `virtual`, entries for
    /// other architectures under `archignore`, the rest under `unresolved`.
    pub fn release_map(&self) -> BTreeMap<String, Vec<&CheckedRelation>> {
        let mut map: BTreeMap<String, Vec<&CheckedRelation>> = BTreeMap::new();
        for relation in &self.0 {
            map.entry(relation.release_key().to_string())
                .or_default()
                .push(relation);
        }
        map
    }

    /// De-duplicated names of the packages that satisfied each entry
    ///
    /// Entries without a resolution contribute their text; entries ignored
    /// on this architecture contribute nothing.
    pub fn package_set(&self) -> BTreeSet<String> {
        self.0
            .iter()
            .filter(|r| !r.arch_ignored())
            .map(|r| match r.satisfying_name() {
                Some(name) => name.to_string(),
                None => r.options.to_string(),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a CheckedList {
    type Item = &'a CheckedRelation;
    type IntoIter = std::slice::Iter<'a, CheckedRelation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<CheckedRelation> for CheckedList {
    fn from_iter<I: IntoIterator<Item = CheckedRelation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CheckedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// Groups of one relationship field sorted by outcome
///
/// After a check every input group sits in exactly one of the three lists.
#[derive(Debug, Clone, Default)]
pub struct RelationshipStatus {
    pub good: CheckedList,
    pub bad: CheckedList,
    pub unchecked: CheckedList,
}

impl RelationshipStatus {
    /// A status holding every group of `list` as not yet checked
    pub fn pending(list: &RelationshipOptionsList) -> Self {
        Self {
            unchecked: list.iter().cloned().map(CheckedRelation::unchecked).collect(),
            ..Self::default()
        }
    }

    pub fn extend(&mut self, other: RelationshipStatus) {
        self.good.extend(other.good);
        self.bad.extend(other.bad);
        self.unchecked.extend(other.unchecked);
    }

    /// Exchange good and bad, for conflict-type fields
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.good, &mut self.bad);
    }

    /// No bad and no unchecked entries
    pub fn satisfied(&self) -> bool {
        self.bad.is_empty() && self.unchecked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.good.len() + self.bad.len() + self.unchecked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn package_sets(&self) -> PackageSets {
        PackageSets {
            good: self.good.package_set(),
            bad: self.bad.package_set(),
            unchecked: self.unchecked.package_set(),
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = [
            ("Good", &self.good),
            ("Bad", &self.bad),
            ("Unchecked", &self.unchecked),
        ]
        .into_iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(label, list)| format!("{}: {}", label, list))
        .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// De-duplicated package names per outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSets {
    pub good: BTreeSet<String>,
    pub bad: BTreeSet<String>,
    pub unchecked: BTreeSet<String>,
}

impl fmt::Display for PackageSets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = [
            ("Good", &self.good),
            ("Bad", &self.bad),
            ("Unchecked", &self.unchecked),
        ]
        .into_iter()
        .filter(|(_, set)| !set.is_empty())
        .map(|(label, set)| {
            format!(
                "{}: {}",
                label,
                set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
            )
        })
        .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Status of a source package's Build-Depends and Build-Depends-Indep
#[derive(Debug, Clone, Default)]
pub struct BuildDepStatus {
    pub bd: RelationshipStatus,
    pub bdi: RelationshipStatus,
}

impl BuildDepStatus {
    /// Both fields fully satisfied
    pub fn all_found(&self) -> bool {
        self.bd.satisfied() && self.bdi.satisfied()
    }

    /// Satisfied build-dependencies of both fields grouped by release
    pub fn release_map(&self) -> BTreeMap<String, Vec<&CheckedRelation>> {
        let mut map = self.bd.good.release_map();
        for (release, relations) in self.bdi.good.release_map() {
            map.entry(release).or_default().extend(relations);
        }
        map
    }
}

impl fmt::Display for BuildDepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build-Depends: {}", self.bd)?;
        writeln!(f, "Build-Depends-Indep: {}", self.bdi)
    }
}
