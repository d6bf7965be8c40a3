// src/data.rs

//! Distribution data: known releases, suite aliases and architectures
//!
//! Loaded from the `[distro]` section of the configuration file; the
//! defaults describe Debian as of the trixie release cycle.

use crate::repository::Pins;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Releases, aliases and architectures of one distribution
#[derive(Debug, Clone, Deserialize)]
pub struct DistroData {
    /// Codename used when no release is given
    #[serde(default = "default_stable")]
    pub stable: String,

    /// Development release (`sid`)
    #[serde(default = "default_devel")]
    pub devel: String,

    #[serde(default = "default_arch")]
    pub default_arch: String,

    /// Every release name present in the archive snapshot
    #[serde(default = "default_releases")]
    pub releases: Vec<String>,

    #[serde(default = "default_arches")]
    pub arches: Vec<String>,

    /// Suite alias to codename (`unstable = "sid"`)
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,

    /// Overlay suffixes tried by backport checks
    #[serde(default = "default_backport_suffixes")]
    pub backport_suffixes: Vec<String>,
}

impl Default for DistroData {
    fn default() -> Self {
        Self {
            stable: default_stable(),
            devel: default_devel(),
            default_arch: default_arch(),
            releases: default_releases(),
            arches: default_arches(),
            aliases: default_aliases(),
            backport_suffixes: default_backport_suffixes(),
        }
    }
}

fn default_stable() -> String {
    "trixie".to_string()
}

fn default_devel() -> String {
    "sid".to_string()
}

fn default_arch() -> String {
    "amd64".to_string()
}

fn default_releases() -> Vec<String> {
    [
        "bookworm",
        "bookworm-security",
        "bookworm-updates",
        "bookworm-proposed-updates",
        "bookworm-backports",
        "bookworm-backports-sloppy",
        "trixie",
        "trixie-security",
        "trixie-updates",
        "trixie-proposed-updates",
        "trixie-backports",
        "forky",
        "forky-security",
        "sid",
        "experimental",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_arches() -> Vec<String> {
    [
        "amd64",
        "arm64",
        "armel",
        "armhf",
        "i386",
        "loong64",
        "mips64el",
        "ppc64el",
        "riscv64",
        "s390x",
        "hurd-amd64",
        "hurd-i386",
        "kfreebsd-amd64",
        "kfreebsd-i386",
        "all",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("rc-buggy", "experimental"),
        ("unstable", "sid"),
        ("testing", "forky"),
        ("stable", "trixie"),
        ("stable-backports", "trixie-backports"),
        ("oldstable", "bookworm"),
        ("oldstable-backports", "bookworm-backports"),
        ("oldstable-backports-sloppy", "bookworm-backports-sloppy"),
    ]
    .into_iter()
    .map(|(alias, codename)| (alias.to_string(), codename.to_string()))
    .collect()
}

fn default_backport_suffixes() -> Vec<String> {
    vec!["backports".to_string()]
}

impl DistroData {
    pub fn is_known_release(&self, name: &str) -> bool {
        self.releases.iter().any(|r| r == name)
    }

    /// Canonical codename for a release or suite alias, if known
    pub fn clean_release_name(&self, name: &str) -> Option<String> {
        if let Some(codename) = self.aliases.get(name) {
            return Some(codename.clone());
        }
        self.is_known_release(name).then(|| name.to_string())
    }

    /// Canonical codename for `name`, or the stable release
    pub fn release_or_default(&self, name: Option<&str>) -> String {
        name.and_then(|n| self.clean_release_name(n))
            .or_else(|| self.clean_release_name(&self.stable))
            .unwrap_or_else(|| self.stable.clone())
    }

    /// `name` if it is a known architecture, otherwise the default
    pub fn clean_arch_name(&self, name: Option<&str>) -> String {
        match name {
            Some(arch) if self.arches.iter().any(|a| a == arch) => arch.to_string(),
            _ => self.default_arch.clone(),
        }
    }

    /// Releases to bind alongside `release` when resolving against it
    ///
    /// In order: the release itself, its base release for `base-suffix`
    /// names, `base-<suffix>` for each known suffixed release, and the
    /// development release for `experimental`. Unknown releases yield
    /// nothing.
    pub fn list_dependent_releases(&self, release: &str, suffixes: &[String]) -> Vec<String> {
        let Some(clean) = self.clean_release_name(release) else {
            return Vec::new();
        };

        let mut releases = vec![clean];
        let base = release.split('-').next().unwrap_or(release);
        if base != release
            && let Some(rel) = self.clean_release_name(base)
        {
            releases.push(rel);
        }
        for suffix in suffixes {
            if let Some(rel) = self.clean_release_name(&format!("{}-{}", base, suffix)) {
                releases.push(rel);
            }
        }
        if release == "experimental" {
            releases.push(self.devel.clone());
        }

        let mut seen = std::collections::HashSet::new();
        releases.retain(|r| seen.insert(r.clone()));
        releases
    }

    /// Pins ranking `releases` in list order, first highest
    pub fn ordered_pins(releases: &[String]) -> Pins {
        releases
            .iter()
            .zip((0..releases.len() as i64).rev())
            .map(|(release, priority)| (release.clone(), priority))
            .collect()
    }
}
