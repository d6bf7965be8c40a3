// src/commands/builddeps.rs
//! Build-dependency and backport checks

use super::{QueryContext, print_not_found};
use anyhow::Result;
use uddcheck::relations::BuildDepStatus;

/// Check a source package's build-dependencies within one release
pub fn cmd_checkbuilddeps(
    ctx: &QueryContext<'_>,
    package: &str,
    release: Option<&str>,
    arch: Option<&str>,
) -> Result<()> {
    let release = ctx.release(release);
    let arch = ctx.arch(arch);
    let repo = ctx.open()?;

    let status = match ctx
        .queries(&repo)
        .check_build_deps(package, &release, &release, &arch)
    {
        Ok(status) => status,
        Err(e) if e.is_not_found() => {
            print_not_found(package, Some(&release), Some(&arch));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Build-dependency check for {} in {}/{}:", package, release, arch);
    println!("Checked: {}", release);
    print_build_dep_status(&status);
    Ok(())
}

/// Check whether a source package from one release builds in another
pub fn cmd_checkbackport(
    ctx: &QueryContext<'_>,
    package: &str,
    from_release: &str,
    to_release: &str,
    arch: Option<&str>,
) -> Result<()> {
    let arch = ctx.arch(arch);
    let repo = ctx.open()?;

    let report = match ctx
        .queries(&repo)
        .check_backport(package, from_release, to_release, &arch)
    {
        Ok(report) => report,
        Err(e) if e.is_not_found() => {
            print_not_found(package, Some(from_release), None);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "Backport check for {} in {}->{}/{}:",
        package, report.from_release, to_release, arch
    );
    println!("Checked: {}", report.checked_releases.join(", "));
    print_build_dep_status(&report.status);
    Ok(())
}

fn print_build_dep_status(status: &BuildDepStatus) {
    if !status.all_found() {
        println!("Unsatisfiable build dependencies:");
        for (label, field) in [
            ("Build-Depends", &status.bd),
            ("Build-Depends-Indep", &status.bdi),
        ] {
            if !field.bad.is_empty() {
                println!("{}: {}", label, field.bad);
            }
        }
        return;
    }

    println!("All build-dependencies satisfied.");
    for (release, relations) in status.release_map() {
        let names: Vec<String> = relations
            .iter()
            .filter(|r| !r.arch_ignored())
            .filter_map(|r| {
                let name = r.satisfying_name()?;
                Some(if r.is_virtual() {
                    format!("{}→{}", name, r.providers().join(" "))
                } else {
                    name.to_string()
                })
            })
            .collect();
        if !names.is_empty() {
            println!("{}: {}", release, names.join(", "));
        }
    }
}
