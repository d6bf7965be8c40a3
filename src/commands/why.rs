// src/commands/why.rs
//! Dependency chain search

use super::{QueryContext, print_not_found};
use anyhow::{Context, Result};

/// Print every dependency chain linking `from` to `to`
pub fn cmd_why(
    ctx: &QueryContext<'_>,
    from: &str,
    to: &str,
    release: Option<&str>,
    arch: Option<&str>,
    with_recommends: bool,
) -> Result<()> {
    let release = ctx.release(release);
    let arch = ctx.arch(arch);
    let repo = ctx.open()?;

    let chains = match ctx
        .queries(&repo)
        .why(from, to, &release, &arch, with_recommends)
    {
        Ok(chains) => chains,
        Err(e) if e.is_not_found() => {
            print_not_found(from, Some(&release), Some(&arch));
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to search chains from {} to {}", from, to));
        }
    };

    if chains.is_empty() {
        println!("No dependency chain could be found between {} and {}", from, to);
        return Ok(());
    }

    println!(
        "Packages {} and {} are linked by {} chains.",
        from,
        to,
        chains.len()
    );
    println!("{}", chains);
    Ok(())
}
