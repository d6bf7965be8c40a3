// src/relations/kind.rs

//! Relationship field names for binary and source packages

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A named relationship field of a package record
///
/// The string form is the lower-case field name (`pre-depends`,
/// `build-depends-indep`), which is also what the command line accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RelationKind {
    Depends,
    PreDepends,
    Recommends,
    Suggests,
    Enhances,
    Conflicts,
    Breaks,
    Replaces,
    BuildDepends,
    BuildDependsIndep,
    BuildConflicts,
    BuildConflictsIndep,
}

impl RelationKind {
    /// Fields declared by source packages rather than binaries
    pub fn is_source_field(&self) -> bool {
        matches!(
            self,
            RelationKind::BuildDepends
                | RelationKind::BuildDependsIndep
                | RelationKind::BuildConflicts
                | RelationKind::BuildConflictsIndep
        )
    }

    /// Kinds where a satisfied clause is a problem for installability
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RelationKind::Conflicts
                | RelationKind::Breaks
                | RelationKind::BuildConflicts
                | RelationKind::BuildConflictsIndep
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_names() {
        assert_eq!(RelationKind::PreDepends.to_string(), "pre-depends");
        assert_eq!(RelationKind::BuildDependsIndep.as_ref(), "build-depends-indep");
        assert_eq!("Recommends".parse::<RelationKind>().unwrap(), RelationKind::Recommends);
        assert!("depend".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_source_fields() {
        let source: Vec<_> = RelationKind::iter().filter(|k| k.is_source_field()).collect();
        assert_eq!(source.len(), 4);
        assert!(!RelationKind::Depends.is_source_field());
    }
}
