// src/relations/relationship.rs

//! A single relationship clause such as `libc6 (>= 2.36) [amd64 i386]`

use crate::error::{Error, Result};
use crate::version::{VersionOperator, VersionRequirement};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RELATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<package>[\w.+-]+)
        (?::(?P<qualifier>[a-z0-9-]+))?
        (?:
            \s*\(\s*
            (?P<operator>[<>=!]+)\s*(?P<version>[^\s)]+)
            \s*\)
        )?
        (?:
            \s*\[\s*
            (?P<arch>[^\]]+?)
            \s*\]
        )?
        (?P<profiles>(?:\s*<[^>]*>)*)
        \s*$",
    )
    .expect("relationship pattern is valid")
});

/// Architecture restriction attached to a clause, e.g. `[amd64 i386]` or `[!hurd-any]`
///
/// Debian Policy requires the list to be either all positive or all negative;
/// the polarity is taken from the first entry and the rest are assumed to agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArchRestriction(Vec<String>);

impl ArchRestriction {
    /// Split a whitespace separated list of architecture specifiers
    pub fn parse(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the list excludes architectures (`[!amd64 !i386]`)
    pub fn is_negative(&self) -> bool {
        self.0.first().is_some_and(|a| a.starts_with('!'))
    }

    /// The specifiers with any leading `!` removed
    pub fn stripped(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.strip_prefix('!').unwrap_or(a))
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for ArchRestriction {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl From<&[&str]> for ArchRestriction {
    fn from(entries: &[&str]) -> Self {
        Self(entries.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for ArchRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// One clause of a relationship field
///
/// Parsed clauses are immutable; the outcome of checking a clause against a
/// release lives in [`crate::relations::CheckedRelation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    /// Original text when the clause was parsed
    text: Option<String>,
    pub package: String,
    /// Multiarch qualifier (`:any`, `:native`); kept but not evaluated
    pub qualifier: Option<String>,
    pub requirement: Option<VersionRequirement>,
    pub arch: ArchRestriction,
    /// Build profile formulae (`<!nocheck>`); kept but not evaluated
    pub profiles: Vec<String>,
}

impl Relationship {
    /// Parse the textual form of a clause
    pub fn parse(text: &str) -> Result<Self> {
        let caps = RELATION_RE
            .captures(text)
            .ok_or_else(|| Error::parse(text, "does not match 'name (op version) [arch]'"))?;

        let requirement = match (caps.name("operator"), caps.name("version")) {
            (Some(op), Some(version)) => {
                let operator = op.as_str().parse::<VersionOperator>().map_err(|_| {
                    Error::parse(text, format!("illegal operator '{}'", op.as_str()))
                })?;
                Some(VersionRequirement::new(operator, version.as_str()))
            }
            _ => None,
        };

        let profiles = caps
            .name("profiles")
            .map(|m| {
                m.as_str()
                    .split('>')
                    .filter_map(|p| p.trim().strip_prefix('<'))
                    .map(|p| p.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            text: Some(text.trim().to_string()),
            package: caps["package"].to_string(),
            qualifier: caps.name("qualifier").map(|m| m.as_str().to_string()),
            requirement,
            arch: caps
                .name("arch")
                .map(|m| ArchRestriction::parse(m.as_str()))
                .unwrap_or_default(),
            profiles,
        })
    }

    /// Build a clause from its parts
    ///
    /// `operator` and `version` must be given together or not at all.
    pub fn new(
        package: &str,
        operator: Option<&str>,
        version: Option<&str>,
        arch: ArchRestriction,
    ) -> Result<Self> {
        if package.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "package name not specified".to_string(),
            ));
        }
        let requirement = match (operator, version) {
            (Some(op), Some(version)) => {
                let operator = op.parse::<VersionOperator>().map_err(|_| {
                    Error::parse(package, format!("illegal operator '{}'", op))
                })?;
                Some(VersionRequirement::new(operator, version))
            }
            (None, None) => None,
            _ => {
                return Err(Error::InvalidArgument(
                    "if one of operator or version is given, both must be".to_string(),
                ));
            }
        };

        Ok(Self {
            text: None,
            package: package.to_string(),
            qualifier: None,
            requirement,
            arch,
            profiles: Vec::new(),
        })
    }

    pub fn is_versioned(&self) -> bool {
        self.requirement.is_some()
    }

    pub fn operator(&self) -> Option<VersionOperator> {
        self.requirement.as_ref().map(|r| r.operator)
    }

    pub fn version(&self) -> Option<&str> {
        self.requirement.as_ref().map(|r| r.version.as_str())
    }
}

impl FromStr for Relationship {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref text) = self.text {
            return f.write_str(text);
        }
        f.write_str(&self.package)?;
        if let Some(ref req) = self.requirement {
            write!(f, " ({})", req)?;
        }
        if !self.arch.is_empty() {
            write!(f, " [{}]", self.arch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let r = Relationship::parse("libc6").unwrap();
        assert_eq!(r.package, "libc6");
        assert!(!r.is_versioned());
        assert!(r.arch.is_empty());
        assert_eq!(r.to_string(), "libc6");
    }

    #[test]
    fn test_parse_versioned() {
        let r = Relationship::parse("libc6 (>= 2.36)").unwrap();
        assert_eq!(r.package, "libc6");
        assert_eq!(r.operator(), Some(VersionOperator::GreaterOrEqual));
        assert_eq!(r.version(), Some("2.36"));

        let r = Relationship::parse("  dpkg(>>1.15.4)  ").unwrap();
        assert_eq!(r.operator(), Some(VersionOperator::StrictlyGreater));
        assert_eq!(r.version(), Some("1.15.4"));
    }

    #[test]
    fn test_parse_arch_list() {
        let r = Relationship::parse("libc6.1 (>> 1.0) [alpha ia64]").unwrap();
        assert_eq!(r.arch.entries(), &["alpha".to_string(), "ia64".to_string()]);
        assert!(!r.arch.is_negative());

        let r = Relationship::parse("libselinux1-dev [!hurd-any !kfreebsd-any]").unwrap();
        assert!(r.arch.is_negative());
        assert_eq!(r.arch.stripped().collect::<Vec<_>>(), vec!["hurd-any", "kfreebsd-any"]);
    }

    #[test]
    fn test_parse_qualifier_and_profiles() {
        let r = Relationship::parse("python3:any (>= 3.11) <!nocheck> <!cross>").unwrap();
        assert_eq!(r.package, "python3");
        assert_eq!(r.qualifier.as_deref(), Some("any"));
        assert_eq!(r.profiles, vec!["!nocheck".to_string(), "!cross".to_string()]);
    }

    #[test]
    fn test_parse_rejects_illegal_operator() {
        for text in ["foo (> 1.0)", "foo (< 1.0)", "foo (!= 1.0)", "foo (=> 1.0)"] {
            let err = Relationship::parse(text).unwrap_err();
            assert!(matches!(err, Error::RelationshipParse { .. }), "{}", text);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Relationship::parse("").is_err());
        assert!(Relationship::parse("foo bar").is_err());
        assert!(Relationship::parse("foo (>= )").is_err());
    }

    #[test]
    fn test_new_requires_operator_and_version_together() {
        assert!(Relationship::new("foo", Some(">="), None, ArchRestriction::default()).is_err());
        assert!(Relationship::new("foo", None, Some("1.0"), ArchRestriction::default()).is_err());
        assert!(Relationship::new("", None, None, ArchRestriction::default()).is_err());
        let err = Relationship::new("foo", Some(">"), Some("1"), ArchRestriction::default())
            .unwrap_err();
        assert!(matches!(err, Error::RelationshipParse { .. }));
    }

    #[test]
    fn test_new_display() {
        let r = Relationship::new(
            "libc6",
            Some(">="),
            Some("2.36"),
            ArchRestriction::parse("amd64 i386"),
        )
        .unwrap();
        assert_eq!(r.to_string(), "libc6 (>= 2.36) [amd64 i386]");
    }
}
