// src/commands/check.rs
//! Relationship and installability checks

use super::{QueryContext, field_label, print_not_found};
use anyhow::Result;
use uddcheck::RelationKind;

/// Check the given relationship fields of a package, non-recursively
pub fn cmd_checkdeps(
    ctx: &QueryContext<'_>,
    package: &str,
    release: Option<&str>,
    arch: Option<&str>,
    kinds: &[RelationKind],
) -> Result<()> {
    let release = ctx.release(release);
    let arch = ctx.arch(arch);
    let repo = ctx.open()?;

    let statuses = match ctx.queries(&repo).check_relations(package, &release, &arch, kinds) {
        Ok(statuses) => statuses,
        Err(e) if e.is_not_found() => {
            print_not_found(package, Some(&release), Some(&arch));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for (kind, status) in statuses {
        if status.bad.is_empty() {
            println!("{}: satisfied", field_label(kind));
        } else {
            println!("{}: unsatisfied: {}", field_label(kind), status.bad);
        }
    }
    Ok(())
}

/// Recursively check that a package's dependencies can be installed
pub fn cmd_checkinstall(
    ctx: &QueryContext<'_>,
    package: &str,
    release: Option<&str>,
    arch: Option<&str>,
    with_recommends: bool,
    verbose_tree: bool,
) -> Result<()> {
    let release = ctx.release(release);
    let arch = ctx.arch(arch);
    let repo = ctx.open()?;

    let hierarchy = match ctx
        .queries(&repo)
        .check_install(package, &release, &arch, with_recommends)
    {
        Ok(hierarchy) => hierarchy,
        Err(e) if e.is_not_found() => {
            print_not_found(package, Some(&release), Some(&arch));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", hierarchy.flatten());
    if verbose_tree {
        println!("{}", hierarchy);
    }
    Ok(())
}
