// src/cli.rs
//! CLI definitions for uddcheck
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use uddcheck::RelationKind;

#[derive(Parser)]
#[command(name = "uddcheck")]
#[command(author = "uddcheck contributors")]
#[command(version)]
#[command(about = "Check Debian package relationships against an archive snapshot", long_about = None)]
pub struct Cli {
    /// Configuration file (default: search $UDDCHECK_CONFIG, ./uddcheck.toml, ~/.uddcheck.toml, /etc/uddcheck.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the snapshot database, overriding the configuration
    #[arg(short, long, global = true)]
    pub db_path: Option<String>,

    /// Log resolver activity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the snapshot database schema
    Init,

    /// Check relationship fields of a binary or source package
    Checkdeps {
        /// Package name
        package: String,

        /// Release or suite alias (default: stable)
        #[arg(short, long)]
        release: Option<String>,

        /// Architecture (default: from configuration)
        #[arg(short, long)]
        arch: Option<String>,

        /// Relationship field to check; may be repeated
        #[arg(short = 't', long = "type", default_values_t = [
            RelationKind::Depends,
            RelationKind::Recommends,
            RelationKind::Suggests,
        ])]
        kinds: Vec<RelationKind>,
    },

    /// Check that a package's dependencies are installable, recursively
    Checkinstall {
        /// Package name
        package: String,

        /// Release or suite alias (default: stable)
        #[arg(short, long)]
        release: Option<String>,

        /// Architecture (default: from configuration)
        #[arg(short, long)]
        arch: Option<String>,

        /// Follow Recommends as well as Depends
        #[arg(long)]
        with_recommends: bool,

        /// Print the full resolution tree instead of package sets
        #[arg(long)]
        verbose_tree: bool,
    },

    /// Check the build-dependencies of a source package
    Checkbuilddeps {
        /// Source package name (binary names are mapped to their source)
        package: String,

        /// Release or suite alias (default: stable)
        #[arg(short, long)]
        release: Option<String>,

        /// Architecture (default: from configuration)
        #[arg(short, long)]
        arch: Option<String>,
    },

    /// Check whether a source package could be backported
    Checkbackport {
        /// Source package name
        package: String,

        /// Release the package comes from
        #[arg(short, long, default_value = "unstable")]
        from_release: String,

        /// Release the package would be built in (its backports are included)
        #[arg(short, long, default_value = "stable")]
        to_release: String,

        /// Architecture (default: from configuration)
        #[arg(short, long)]
        arch: Option<String>,
    },

    /// Show the dependency chains that lead from one package to another
    Why {
        /// Package the chains start from
        from: String,

        /// Package the chains end at
        to: String,

        /// Release or suite alias (default: stable)
        #[arg(short, long)]
        release: Option<String>,

        /// Architecture (default: from configuration)
        #[arg(short, long)]
        arch: Option<String>,

        /// Follow Recommends as well as Depends
        #[arg(long)]
        with_recommends: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
