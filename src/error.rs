// src/error.rs

//! Error types for uddcheck

use thiserror::Error;

/// Result type alias for uddcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the resolver and its repository layer
#[derive(Error, Debug)]
pub enum Error {
    /// The named binary or source package has no record in the bound releases
    #[error("No such package: {0}")]
    PackageNotFound(String),

    /// Relationship text does not follow the `name (op version) [arch]` grammar
    #[error("Could not parse relationship '{relation}': {reason}")]
    RelationshipParse { relation: String, reason: String },

    /// A caller supplied an unusable combination of arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A version string that dpkg would reject
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Chain enumeration would exceed the configured cap
    #[error("Too many dependency chains ({count}, limit is {limit})")]
    ChainLimitExceeded { count: usize, limit: usize },

    /// Configuration file problems
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for building a relationship parse error
    pub(crate) fn parse(relation: &str, reason: impl Into<String>) -> Self {
        Error::RelationshipParse {
            relation: relation.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the error means "the package does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PackageNotFound(_))
    }
}
