// src/config.rs

//! Configuration file parsing for uddcheck
//!
//! Supports TOML configuration files with the following sections:
//! - [database] - Location of the archive snapshot
//! - [distro] - Releases, suite aliases and architectures
//! - [resolver] - Limits applied by the resolver
//!
//! Lookup order when no path is given: `$UDDCHECK_CONFIG`,
//! `./uddcheck.toml`, `~/.uddcheck.toml`, `/etc/uddcheck.toml`.

use crate::data::DistroData;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "UDDCHECK_CONFIG";

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub distro: DistroData,

    #[serde(default)]
    pub resolver: ResolverSection,
}

/// Database configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSection {
    /// SQLite file holding the snapshot
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "/var/lib/uddcheck/udd.db".to_string()
}

/// Resolver configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolverSection {
    /// Refuse `why` queries that would enumerate more chains than this
    #[serde(default)]
    pub max_chains: Option<usize>,
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the first configuration file found, or the defaults
    ///
    /// An explicitly given path must exist.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from("uddcheck.toml"));
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".uddcheck.toml"));
        }
        paths.push(PathBuf::from("/etc/uddcheck.toml"));
        paths
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let distro = &self.distro;

        if distro.releases.is_empty() {
            return Err(Error::Config("distro.releases must not be empty".to_string()));
        }
        if distro.clean_release_name(&distro.stable).is_none() {
            return Err(Error::Config(format!(
                "distro.stable '{}' is not a known release",
                distro.stable
            )));
        }
        if !distro.arches.iter().any(|a| a == &distro.default_arch) {
            return Err(Error::Config(format!(
                "distro.default_arch '{}' is not a known architecture",
                distro.default_arch
            )));
        }
        if self.resolver.max_chains == Some(0) {
            return Err(Error::Config(
                "resolver.max_chains must be greater than zero".to_string(),
            ));
        }
        if self.database.path.trim().is_empty() {
            return Err(Error::Config("database.path must not be empty".to_string()));
        }

        Ok(())
    }
}
