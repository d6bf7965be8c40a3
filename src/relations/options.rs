// src/relations/options.rs

//! Alternatives (`a | b`) and whole relationship fields (`a, b | c`)

use super::relationship::Relationship;
use crate::error::Result;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static ALTERNATIVE_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*").expect("alternative separator pattern is valid"));

/// An OR-group of relationship clauses, tried left to right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipOptions {
    text: String,
    alternatives: Vec<Relationship>,
}

impl RelationshipOptions {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let alternatives = ALTERNATIVE_SEP
            .split(text)
            .map(Relationship::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            text: text.to_string(),
            alternatives,
        })
    }

    pub fn alternatives(&self) -> &[Relationship] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// The group as written in the control field
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<Relationship> for RelationshipOptions {
    fn from(relationship: Relationship) -> Self {
        Self {
            text: relationship.to_string(),
            alternatives: vec![relationship],
        }
    }
}

impl fmt::Display for RelationshipOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .alternatives
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" | ");
        f.write_str(&joined)
    }
}

/// All groups of one relationship field, e.g. a package's whole `Depends`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipOptionsList(Vec<RelationshipOptions>);

impl RelationshipOptionsList {
    /// Parse a comma separated field value; blank entries are skipped
    pub fn parse(text: &str) -> Result<Self> {
        text.split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(RelationshipOptions::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Parse an optional field value, treating a missing field as empty
    pub fn parse_field(text: Option<&str>) -> Result<Self> {
        match text {
            Some(text) => Self::parse(text),
            None => Ok(Self::default()),
        }
    }

    pub fn push(&mut self, options: RelationshipOptions) {
        self.0.push(options);
    }

    pub fn extend(&mut self, other: RelationshipOptionsList) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RelationshipOptions> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RelationshipOptionsList {
    type Item = RelationshipOptions;
    type IntoIter = std::vec::IntoIter<RelationshipOptions>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RelationshipOptionsList {
    type Item = &'a RelationshipOptions;
    type IntoIter = std::slice::Iter<'a, RelationshipOptions>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<RelationshipOptions> for RelationshipOptionsList {
    fn from_iter<I: IntoIterator<Item = RelationshipOptions>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RelationshipOptionsList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|o| o.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}
