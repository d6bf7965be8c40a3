// src/resolver/hierarchy.rs

//! Dependency hierarchy produced by the install checker
//!
//! Each node holds the checked Depends (and optionally Recommends) of one
//! package. Satisfied groups that were expanded carry the child node in
//! [`CheckedRelation::subtree`], so the tree can be flattened into package
//! sets or exploded into dependency chains.

use crate::relations::{
    ChainLink, CheckedRelation, DependencyChain, DependencyChainList, LinkKind, PackageSets,
    RelationshipStatus,
};
use std::collections::HashSet;
use std::fmt;

/// One package in a dependency tree
#[derive(Debug, Clone)]
pub struct SolverHierarchy {
    pub package: String,
    pub level: usize,
    pub depends: RelationshipStatus,
    pub recommends: RelationshipStatus,
    last_sibling: bool,
}

impl SolverHierarchy {
    pub fn new(package: &str, level: usize) -> Self {
        Self {
            package: package.to_string(),
            level,
            depends: RelationshipStatus::default(),
            recommends: RelationshipStatus::default(),
            last_sibling: true,
        }
    }

    pub fn get(&self, kind: LinkKind) -> &RelationshipStatus {
        match kind {
            LinkKind::Depends => &self.depends,
            LinkKind::Recommends => &self.recommends,
        }
    }

    /// Whether this node is drawn as the last child of its parent
    pub fn is_last_sibling(&self) -> bool {
        self.last_sibling
    }

    /// Expanded children, Depends first
    pub fn children(&self) -> impl Iterator<Item = &SolverHierarchy> {
        self.depends
            .good
            .iter()
            .chain(self.recommends.good.iter())
            .filter_map(|r| r.subtree.as_deref())
    }

    /// Clear the last-sibling flag on all but the final expanded child of each list
    pub(crate) fn mark_last_siblings(&mut self) {
        for status in [&mut self.depends, &mut self.recommends] {
            let mut expanded: Vec<&mut SolverHierarchy> = status
                .good
                .iter_mut()
                .filter_map(|r| r.subtree.as_deref_mut())
                .collect();
            let count = expanded.len();
            for (i, child) in expanded.iter_mut().enumerate() {
                child.last_sibling = i + 1 == count;
            }
        }
    }

    /// Collapse the tree into the package sets it pulls in
    ///
    /// Anything below a Depends edge keeps its own classification; anything
    /// below a Recommends edge is only recommended. Groups recommended at any
    /// depth whose package is also depended upon are dropped from the
    /// recommends side.
    pub fn flatten(&self) -> FlatHierarchy {
        let mut flat = self.collapse();

        let required: HashSet<String> = flat
            .depends
            .good
            .iter()
            .filter_map(CheckedRelation::satisfying_name)
            .map(str::to_string)
            .collect();
        flat.recommends
            .good
            .retain(|r| r.satisfying_name().is_none_or(|name| !required.contains(name)));

        flat
    }

    fn collapse(&self) -> FlatHierarchy {
        let mut flat = FlatHierarchy {
            package: self.package.clone(),
            depends: detached(&self.depends),
            recommends: detached(&self.recommends),
        };

        for relation in self.depends.good.iter() {
            if let Some(ref child) = relation.subtree {
                let sub = child.collapse();
                flat.depends.extend(sub.depends);
                flat.recommends.extend(sub.recommends);
            }
        }
        for relation in self.recommends.good.iter() {
            if let Some(ref child) = relation.subtree {
                let sub = child.collapse();
                flat.recommends.extend(sub.depends);
                flat.recommends.extend(sub.recommends);
            }
        }

        flat
    }

    /// Every root-to-leaf path through the tree
    ///
    /// A group whose package was not expanded ends its chain. Chains from the
    /// root node carry the root package as their base.
    pub fn chains(&self) -> DependencyChainList {
        let mut chains = self.collect_chains();
        if self.level == 0 {
            chains.set_base(&self.package);
        }
        chains
    }

    fn collect_chains(&self) -> DependencyChainList {
        let mut chains = DependencyChainList::default();
        for (kind, relation) in self.edges() {
            let Some(link) = chain_link(kind, relation) else {
                continue;
            };
            let below = relation
                .subtree
                .as_ref()
                .map(|child| child.collect_chains())
                .unwrap_or_default();

            if below.is_empty() {
                chains.push(DependencyChain::new(link));
                continue;
            }
            for tail in &below {
                let mut chain = DependencyChain::new(link.clone());
                chain.extend(tail);
                chains.push(chain);
            }
        }
        chains
    }

    /// Number of chains [`chains`](Self::chains) would return
    pub fn chain_count(&self) -> usize {
        self.edges()
            .filter(|(kind, relation)| chain_link(*kind, relation).is_some())
            .map(|(_, relation)| {
                relation
                    .subtree
                    .as_ref()
                    .map_or(1, |child| child.chain_count().max(1))
            })
            .fold(0usize, usize::saturating_add)
    }

    fn edges(&self) -> impl Iterator<Item = (LinkKind, &CheckedRelation)> {
        self.depends
            .good
            .iter()
            .map(|r| (LinkKind::Depends, r))
            .chain(self.recommends.good.iter().map(|r| (LinkKind::Recommends, r)))
    }

    fn section(&self, status: &RelationshipStatus, label: &str, last: bool) -> String {
        let (tee, trunk) = if last { ("└─", " ") } else { ("├─", "│") };

        let mut body = Vec::new();
        if !status.is_empty() {
            body.push(status.to_string());
        }
        for relation in status.good.iter() {
            if let Some(ref child) = relation.subtree {
                let rendered = child.to_string();
                if !rendered.is_empty() {
                    body.push(rendered);
                }
            }
        }

        format!(
            "{}[{}] {} for {}:\n{}",
            tee,
            self.level,
            label,
            self.package,
            indent(&body.join("\n"), &format!("{}   ", trunk))
        )
    }
}

impl fmt::Display for SolverHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::new();
        if !self.depends.is_empty() {
            sections.push(self.section(
                &self.depends,
                "Depends",
                self.last_sibling && self.recommends.is_empty(),
            ));
        }
        if !self.recommends.is_empty() {
            sections.push(self.section(&self.recommends, "Recommends", self.last_sibling));
        }
        f.write_str(&sections.join("\n"))
    }
}

/// The whole tree collapsed into Depends and Recommends statuses
#[derive(Debug, Clone)]
pub struct FlatHierarchy {
    pub package: String,
    pub depends: RelationshipStatus,
    pub recommends: RelationshipStatus,
}

impl FlatHierarchy {
    pub fn depends_sets(&self) -> PackageSets {
        self.depends.package_sets()
    }

    pub fn recommends_sets(&self) -> PackageSets {
        self.recommends.package_sets()
    }
}

impl fmt::Display for FlatHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::new();
        for (label, status) in [("Depends", &self.depends), ("Recommends", &self.recommends)] {
            if !status.is_empty() {
                sections.push(format!(
                    "{}:\n{}",
                    label,
                    indent(&status.package_sets().to_string(), "  ")
                ));
            }
        }
        f.write_str(&sections.join("\n"))
    }
}

fn detached(status: &RelationshipStatus) -> RelationshipStatus {
    RelationshipStatus {
        good: status.good.iter().map(CheckedRelation::detached).collect(),
        bad: status.bad.iter().map(CheckedRelation::detached).collect(),
        unchecked: status.unchecked.iter().map(CheckedRelation::detached).collect(),
    }
}

/// Link for a satisfied group; groups ignored on this architecture have none
///
/// The link names what satisfied the group, so a virtual package appears
/// as itself with its provider's chains continuing below it.
fn chain_link(kind: LinkKind, relation: &CheckedRelation) -> Option<ChainLink> {
    if relation.arch_ignored() {
        return None;
    }
    let package = relation.satisfying_name()?.to_string();
    Some(ChainLink { kind, package })
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::BinaryPackage;
    use crate::relations::{Binding, RelationshipOptions, Resolution};
    use crate::repository::BoundPackage;
    use std::rc::Rc;

    fn satisfied(name: &str, subtree: Option<SolverHierarchy>) -> CheckedRelation {
        let record = BinaryPackage::new(name, "1.0", "amd64", "trixie");
        CheckedRelation {
            options: RelationshipOptions::parse(name).unwrap(),
            resolution: Some(Resolution {
                index: 0,
                binding: Binding::Package(Rc::new(BoundPackage::new(name, Some(record)))),
            }),
            subtree: subtree.map(Box::new),
        }
    }

    /// a => b => d, a => c (c already visited elsewhere)
    fn tree() -> SolverHierarchy {
        let d = SolverHierarchy::new("d", 2);
        let mut b = SolverHierarchy::new("b", 1);
        b.depends.good.push(satisfied("d", Some(d)));
        b.mark_last_siblings();

        let mut a = SolverHierarchy::new("a", 0);
        a.depends.good.push(satisfied("b", Some(b)));
        a.depends.good.push(satisfied("c", None));
        a.mark_last_siblings();
        a
    }

    #[test]
    fn test_chains() {
        let chains = tree().chains();
        let rendered: Vec<String> = chains.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["a =>b =>d", "a =>c"]);
        assert_eq!(tree().chain_count(), 2);
    }

    #[test]
    fn test_virtual_link_continues_with_provider_chains() {
        let mut exim4 = SolverHierarchy::new("exim4", 1);
        exim4.depends.good.push(satisfied("libc6", None));

        let mut mutt = SolverHierarchy::new("mutt", 0);
        mutt.depends.good.push(CheckedRelation {
            options: RelationshipOptions::parse("mail-transport-agent").unwrap(),
            resolution: Some(Resolution {
                index: 0,
                binding: Binding::Virtual {
                    name: "mail-transport-agent".to_string(),
                    providers: vec!["exim4".to_string()],
                },
            }),
            subtree: Some(Box::new(exim4)),
        });

        let rendered: Vec<String> = mutt.chains().iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["mutt =>mail-transport-agent =>libc6"]);
        assert_eq!(mutt.chain_count(), 1);
    }

    #[test]
    fn test_leaf_has_no_chains() {
        let leaf = SolverHierarchy::new("libc6", 0);
        assert!(leaf.chains().is_empty());
        assert_eq!(leaf.chain_count(), 0);
        assert!(leaf.flatten().depends.is_empty());
    }

    #[test]
    fn test_flatten_collects_closure() {
        let flat = tree().flatten();
        let names: Vec<String> = flat.depends_sets().good.into_iter().collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert!(flat.recommends.is_empty());
        assert_eq!(flat.to_string(), "Depends:\n  Good: b, c, d");
    }

    #[test]
    fn test_flatten_strong_wins_over_weak() {
        let mut x = SolverHierarchy::new("x", 1);
        x.depends.good.push(satisfied("c", None));

        let mut a = tree();
        a.recommends.good.push(satisfied("x", Some(x)));
        a.recommends.good.push(satisfied("d", None));

        let flat = a.flatten();
        let recommends: Vec<String> = flat.recommends_sets().good.into_iter().collect();
        assert_eq!(recommends, vec!["x"]);
        assert!(flat.depends_sets().good.contains("c"));
        assert!(flat.depends_sets().good.contains("d"));
    }

    #[test]
    fn test_tree_display() {
        assert_eq!(
            tree().to_string(),
            "└─[0] Depends for a:\n    Good: b, c\n    └─[1] Depends for b:\n        Good: d"
        );
    }

    #[test]
    fn test_mark_last_siblings() {
        let mut a = SolverHierarchy::new("a", 0);
        a.depends.good.push(satisfied("b", Some(SolverHierarchy::new("b", 1))));
        a.depends.good.push(satisfied("c", Some(SolverHierarchy::new("c", 1))));
        a.mark_last_siblings();
        let flags: Vec<bool> = a.children().map(|c| c.is_last_sibling()).collect();
        assert_eq!(flags, vec![false, true]);
    }
}
