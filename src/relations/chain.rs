// src/relations/chain.rs

//! Dependency chains: explicit paths of Depends/Recommends edges
//!
//! A chain like `apache2 =>apache2-bin ->ssl-cert` records how the root
//! package pulls in the last one. Chains are weighted so that paths made of
//! hard dependencies sort before any path that needs a Recommends edge.

use std::collections::HashSet;
use std::fmt;

/// Edge type of a chain link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Depends,
    Recommends,
}

impl LinkKind {
    /// Cost of following this edge when ranking chains
    pub fn weight(&self) -> usize {
        match self {
            LinkKind::Depends => 1,
            LinkKind::Recommends => 1000,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            LinkKind::Depends => "=>",
            LinkKind::Recommends => "->",
        }
    }
}

/// One edge of a chain, pointing at the package it reaches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainLink {
    pub kind: LinkKind,
    pub package: String,
}

impl ChainLink {
    pub fn depends(package: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Depends,
            package: package.into(),
        }
    }

    pub fn recommends(package: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Recommends,
            package: package.into(),
        }
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.arrow(), self.package)
    }
}

/// A path of links starting at an optional base package
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DependencyChain {
    base: Option<String>,
    links: Vec<ChainLink>,
}

impl DependencyChain {
    pub fn new(link: ChainLink) -> Self {
        Self {
            base: None,
            links: vec![link],
        }
    }

    pub fn from_links(links: Vec<ChainLink>) -> Self {
        Self { base: None, links }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = Some(base.into());
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn push(&mut self, link: ChainLink) {
        self.links.push(link);
    }

    /// Append the links of `other` after this chain's links
    pub fn extend(&mut self, other: &DependencyChain) {
        self.links.extend(other.links.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn last_package(&self) -> Option<&str> {
        self.links.last().map(|l| l.package.as_str())
    }

    pub fn contains(&self, package: &str) -> bool {
        self.links.iter().any(|l| l.package == package)
    }

    /// The chain cut after the first link reaching `package`
    ///
    /// Empty if the chain never reaches `package`.
    pub fn truncated(&self, package: &str) -> DependencyChain {
        let links = match self.links.iter().position(|l| l.package == package) {
            Some(pos) => self.links[..=pos].to_vec(),
            None => Vec::new(),
        };
        DependencyChain {
            base: self.base.clone(),
            links,
        }
    }

    /// Sum of link weights
    pub fn distance(&self) -> usize {
        self.links.iter().map(|l| l.kind.weight()).sum()
    }
}

impl fmt::Display for DependencyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(self.links.len() + 1);
        if let Some(ref base) = self.base {
            parts.push(base.clone());
        }
        parts.extend(self.links.iter().map(|l| l.to_string()));
        f.write_str(&parts.join(" "))
    }
}

/// A collection of chains with the filters used by `why`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyChainList(Vec<DependencyChain>);

impl DependencyChainList {
    pub fn push(&mut self, chain: DependencyChain) {
        self.0.push(chain);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyChain> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn set_base(&mut self, base: &str) {
        for chain in &mut self.0 {
            chain.set_base(base);
        }
    }

    /// Cut every chain at `package`, dropping chains that never reach it
    pub fn truncated(&self, package: &str) -> DependencyChainList {
        self.0
            .iter()
            .map(|c| c.truncated(package))
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Remove repeated chains, keeping the first of each
    pub fn unique(&self) -> DependencyChainList {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .filter(|c| seen.insert(*c))
            .cloned()
            .collect()
    }

    /// Stable sort by ascending distance
    pub fn sorted(&self) -> DependencyChainList {
        let mut chains = self.0.clone();
        chains.sort_by_key(DependencyChain::distance);
        DependencyChainList(chains)
    }
}

impl IntoIterator for DependencyChainList {
    type Item = DependencyChain;
    type IntoIter = std::vec::IntoIter<DependencyChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencyChainList {
    type Item = &'a DependencyChain;
    type IntoIter = std::slice::Iter<'a, DependencyChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<DependencyChain> for DependencyChainList {
    fn from_iter<I: IntoIterator<Item = DependencyChain>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DependencyChainList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        f.write_str(&lines.join("\n"))
    }
}
