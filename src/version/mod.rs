// src/version/mod.rs

//! Debian version handling and relationship operators
//!
//! Versions follow the `[epoch:]upstream[-revision]` layout and compare with
//! the same ordering dpkg uses, including `~` sorting before everything else.
//! Relationship clauses only ever use the five operators listed in Debian
//! Policy §7.1.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed Debian package version
#[derive(Debug, Clone)]
pub struct DebianVersion {
    pub epoch: u64,
    pub upstream: String,
    pub revision: Option<String>,
}

impl DebianVersion {
    /// Parse a Debian version string
    ///
    /// Format: [epoch:]upstream[-revision]
    /// Examples:
    /// - "1.2.3" → epoch=0, upstream="1.2.3", revision=None
    /// - "2:1.2.3" → epoch=2, upstream="1.2.3", revision=None
    /// - "1.2.3-4" → epoch=0, upstream="1.2.3", revision=Some("4")
    /// - "1:2.3~rc1-0.1" → epoch=1, upstream="2.3~rc1", revision=Some("0.1")
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidVersion("empty version string".to_string()));
        }

        let (epoch, rest) = match s.split_once(':') {
            Some((e, r)) => {
                let epoch = if e.is_empty() {
                    0
                } else {
                    e.parse::<u64>().map_err(|err| {
                        Error::InvalidVersion(format!("bad epoch in '{}': {}", s, err))
                    })?
                };
                (epoch, r)
            }
            None => (0, s),
        };

        // The revision is everything after the last hyphen; upstream may contain hyphens
        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((u, r)) => (u.to_string(), Some(r.to_string())),
            None => (rest.to_string(), None),
        };

        if upstream.is_empty() {
            return Err(Error::InvalidVersion(format!(
                "empty upstream version in '{}'",
                s
            )));
        }
        if upstream.chars().any(char::is_whitespace) {
            return Err(Error::InvalidVersion(format!(
                "whitespace in version '{}'",
                s
            )));
        }

        Ok(Self {
            epoch,
            upstream,
            revision,
        })
    }

    /// Compare two versions using dpkg ordering
    pub fn compare(&self, other: &DebianVersion) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| verrevcmp(&self.upstream, &other.upstream))
            .then_with(|| {
                verrevcmp(
                    self.revision.as_deref().unwrap_or(""),
                    other.revision.as_deref().unwrap_or(""),
                )
            })
    }
}

/// Weight of a non-digit character in dpkg's comparison
fn order(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(b'~') => -1,
        Some(c) => c as i32 + 256,
    }
}

/// dpkg's `verrevcmp`: alternate non-digit and digit runs
fn verrevcmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0usize, 0usize);
    let is_digit = |s: &[u8], k: usize| s.get(k).is_some_and(u8::is_ascii_digit);

    while i < a.len() || j < b.len() {
        while (i < a.len() && !is_digit(a, i)) || (j < b.len() && !is_digit(b, j)) {
            let ac = order(a.get(i).copied());
            let bc = order(b.get(j).copied());
            if ac != bc {
                return ac.cmp(&bc);
            }
            i += 1;
            j += 1;
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while is_digit(a, i) && is_digit(b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }

        if is_digit(a, i) {
            return Ordering::Greater;
        }
        if is_digit(b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}

impl fmt::Display for DebianVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.upstream)?;
        if let Some(ref revision) = self.revision {
            write!(f, "-{}", revision)?;
        }
        Ok(())
    }
}

impl FromStr for DebianVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Equality follows dpkg ordering, so "1.0" == "1.0-0" and "01" == "1"
impl PartialEq for DebianVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for DebianVersion {}

impl Ord for DebianVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for DebianVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Relationship version operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionOperator {
    /// `>>` strictly greater than
    StrictlyGreater,
    /// `>=` greater than or equal
    GreaterOrEqual,
    /// `=` exactly equal
    Equal,
    /// `<=` less than or equal
    LessOrEqual,
    /// `<<` strictly less than
    StrictlyLess,
}

impl VersionOperator {
    pub const ALL: [VersionOperator; 5] = [
        VersionOperator::StrictlyGreater,
        VersionOperator::GreaterOrEqual,
        VersionOperator::Equal,
        VersionOperator::LessOrEqual,
        VersionOperator::StrictlyLess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOperator::StrictlyGreater => ">>",
            VersionOperator::GreaterOrEqual => ">=",
            VersionOperator::Equal => "=",
            VersionOperator::LessOrEqual => "<=",
            VersionOperator::StrictlyLess => "<<",
        }
    }

    /// Does `candidate OP required` hold?
    pub fn compare(&self, candidate: &DebianVersion, required: &DebianVersion) -> bool {
        let ord = candidate.cmp(required);
        match self {
            VersionOperator::StrictlyGreater => ord == Ordering::Greater,
            VersionOperator::GreaterOrEqual => ord != Ordering::Less,
            VersionOperator::Equal => ord == Ordering::Equal,
            VersionOperator::LessOrEqual => ord != Ordering::Greater,
            VersionOperator::StrictlyLess => ord == Ordering::Less,
        }
    }
}

impl FromStr for VersionOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ">>" => Ok(VersionOperator::StrictlyGreater),
            ">=" => Ok(VersionOperator::GreaterOrEqual),
            "=" => Ok(VersionOperator::Equal),
            "<=" => Ok(VersionOperator::LessOrEqual),
            "<<" => Ok(VersionOperator::StrictlyLess),
            other => Err(Error::InvalidArgument(format!(
                "illegal operator in relationship: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for VersionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator paired with the version it is applied to, e.g. `>= 2.7`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRequirement {
    pub operator: VersionOperator,
    pub version: String,
}

impl VersionRequirement {
    pub fn new(operator: VersionOperator, version: impl Into<String>) -> Self {
        Self {
            operator,
            version: version.into(),
        }
    }

    /// Check whether a concrete archive version satisfies this requirement
    pub fn satisfied_by(&self, candidate: &str) -> Result<bool> {
        let candidate = DebianVersion::parse(candidate)?;
        let required = DebianVersion::parse(&self.version)?;
        Ok(self.operator.compare(&candidate, &required))
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.version)
    }
}
