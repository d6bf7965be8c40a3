// src/main.rs

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use commands::QueryContext;
use tracing_subscriber::EnvFilter;
use uddcheck::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        // No command given - show help
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "uddcheck", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    let db_path = cli.db_path.unwrap_or_else(|| config.database.path.clone());
    let ctx = QueryContext {
        config: &config,
        db_path: &db_path,
    };

    match command {
        Commands::Init => commands::cmd_init(&db_path),

        Commands::Checkdeps {
            package,
            release,
            arch,
            kinds,
        } => commands::cmd_checkdeps(&ctx, &package, release.as_deref(), arch.as_deref(), &kinds),

        Commands::Checkinstall {
            package,
            release,
            arch,
            with_recommends,
            verbose_tree,
        } => commands::cmd_checkinstall(
            &ctx,
            &package,
            release.as_deref(),
            arch.as_deref(),
            with_recommends,
            verbose_tree,
        ),

        Commands::Checkbuilddeps {
            package,
            release,
            arch,
        } => commands::cmd_checkbuilddeps(&ctx, &package, release.as_deref(), arch.as_deref()),

        Commands::Checkbackport {
            package,
            from_release,
            to_release,
            arch,
        } => commands::cmd_checkbackport(
            &ctx,
            &package,
            &from_release,
            &to_release,
            arch.as_deref(),
        ),

        Commands::Why {
            from,
            to,
            release,
            arch,
            with_recommends,
        } => commands::cmd_why(
            &ctx,
            &from,
            &to,
            release.as_deref(),
            arch.as_deref(),
            with_recommends,
        ),

        Commands::Completions { .. } => Ok(()),
    }
}
