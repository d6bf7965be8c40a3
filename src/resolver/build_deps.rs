// src/resolver/build_deps.rs

//! Build-dependency checking for source packages

use super::checker::Checker;
use crate::error::{Error, Result};
use crate::relations::{BuildDepStatus, RelationshipOptionsList};
use crate::repository::{BoundSource, Release};
use std::rc::Rc;
use tracing::info;

/// The source package whose build-dependencies are checked
#[derive(Debug, Clone)]
pub enum SourceRef {
    /// Looked up in the checker's release, with binary to source fallback
    ByName(String),
    /// Already bound, possibly against another release
    Prebound(Rc<BoundSource>),
}

/// What to check: a source package, explicit field lists, or both
///
/// Explicit lists take precedence over the source package's own fields.
#[derive(Debug, Clone, Default)]
pub struct BuildDepsRequest {
    pub source: Option<SourceRef>,
    pub build_depends: Option<RelationshipOptionsList>,
    pub build_depends_indep: Option<RelationshipOptionsList>,
}

impl BuildDepsRequest {
    pub fn by_name(name: &str) -> Self {
        Self {
            source: Some(SourceRef::ByName(name.to_string())),
            ..Self::default()
        }
    }

    pub fn prebound(source: Rc<BoundSource>) -> Self {
        Self {
            source: Some(SourceRef::Prebound(source)),
            ..Self::default()
        }
    }

    pub fn lists(
        build_depends: RelationshipOptionsList,
        build_depends_indep: RelationshipOptionsList,
    ) -> Self {
        Self {
            source: None,
            build_depends: Some(build_depends),
            build_depends_indep: Some(build_depends_indep),
        }
    }
}

/// Checks Build-Depends and Build-Depends-Indep against a bound release
pub struct BuildDepsChecker<'a, 'r> {
    checker: Checker<'a, 'r>,
}

impl<'a, 'r> BuildDepsChecker<'a, 'r> {
    pub fn new(release: &'a Release<'r>) -> Self {
        Self {
            checker: Checker::new(release),
        }
    }

    pub fn check(&self, request: BuildDepsRequest) -> Result<BuildDepStatus> {
        let source = match request.source {
            Some(SourceRef::ByName(name)) => Some(self.checker.release().source(&name)?),
            Some(SourceRef::Prebound(bound)) => Some(bound),
            None => None,
        };
        let found = source.as_ref().filter(|s| s.found());

        let given = |list: &Option<RelationshipOptionsList>| list.as_ref().is_some_and(|l| !l.is_empty());
        if found.is_none()
            && !given(&request.build_depends)
            && !given(&request.build_depends_indep)
        {
            return Err(match &source {
                Some(s) => Error::PackageNotFound(s.name().to_string()),
                None => Error::InvalidArgument(
                    "a source package or build-dependency list is required".to_string(),
                ),
            });
        }

        if let Some(s) = found {
            info!("Checking build-dependencies of {}", s);
        }

        let bd = match request.build_depends {
            Some(list) if !list.is_empty() => list,
            _ => found.map(|s| s.build_depends()).transpose()?.unwrap_or_default(),
        };
        let bdi = match request.build_depends_indep {
            Some(list) if !list.is_empty() => list,
            _ => found
                .map(|s| s.build_depends_indep())
                .transpose()?
                .unwrap_or_default(),
        };

        Ok(BuildDepStatus {
            bd: self.checker.check_relationship_options_list(&bd)?,
            bdi: self.checker.check_relationship_options_list(&bdi)?,
        })
    }
}
