// src/commands/mod.rs
//! Command handlers for the uddcheck CLI

mod builddeps;
mod check;
mod init;
mod why;

pub use builddeps::{cmd_checkbackport, cmd_checkbuilddeps};
pub use check::{cmd_checkdeps, cmd_checkinstall};
pub use init::cmd_init;
pub use why::cmd_why;

use anyhow::{Context, Result};
use uddcheck::{Config, Queries, RelationKind, SqliteRepository};

/// Options shared by every query command
pub struct QueryContext<'c> {
    pub config: &'c Config,
    pub db_path: &'c str,
}

impl QueryContext<'_> {
    fn open(&self) -> Result<SqliteRepository> {
        SqliteRepository::open(self.db_path)
            .with_context(|| format!("Failed to open database at {}", self.db_path))
    }

    fn queries<'r>(&'r self, repo: &'r SqliteRepository) -> Queries<'r> {
        Queries::new(repo, &self.config.distro).with_max_chains(self.config.resolver.max_chains)
    }

    fn release(&self, release: Option<&str>) -> String {
        self.config.distro.release_or_default(release)
    }

    fn arch(&self, arch: Option<&str>) -> String {
        self.config.distro.clean_arch_name(arch)
    }
}

/// Report a missing package the way every command does
fn print_not_found(package: &str, release: Option<&str>, arch: Option<&str>) {
    let tag = match (release, arch) {
        (Some(release), Some(arch)) => format!(" in {}/{}", release, arch),
        (Some(place), None) | (None, Some(place)) => format!(" in {}", place),
        (None, None) => String::new(),
    };
    println!("No such package '{}'{}.", package, tag);
}

/// Field name as it appears in a control file (`build-depends` -> `Build-Depends`)
fn field_label(kind: RelationKind) -> String {
    kind.as_ref()
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
