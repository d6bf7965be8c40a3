// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: release or suite alias
fn release_arg() -> Arg {
    Arg::new("release")
        .short('r')
        .long("release")
        .value_name("RELEASE")
        .help("Release or suite alias (default: stable)")
}

/// Common argument: architecture
fn arch_arg() -> Arg {
    Arg::new("arch")
        .short('a')
        .long("arch")
        .value_name("ARCH")
        .help("Architecture (default: from configuration)")
}

fn with_recommends_arg() -> Arg {
    Arg::new("with_recommends")
        .long("with-recommends")
        .action(ArgAction::SetTrue)
        .help("Follow Recommends as well as Depends")
}

fn package_arg() -> Arg {
    Arg::new("package").required(true).help("Package name")
}

fn build_cli() -> Command {
    Command::new("uddcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .author("uddcheck contributors")
        .about("Check Debian package relationships against an archive snapshot")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Configuration file"),
        )
        .arg(
            Arg::new("db_path")
                .short('d')
                .long("db-path")
                .value_name("PATH")
                .global(true)
                .help("Path to the snapshot database, overriding the configuration"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log resolver activity"),
        )
        .subcommand(Command::new("init").about("Create the snapshot database schema"))
        .subcommand(
            Command::new("checkdeps")
                .about("Check relationship fields of a binary or source package")
                .arg(package_arg())
                .arg(release_arg())
                .arg(arch_arg())
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_name("KIND")
                        .action(ArgAction::Append)
                        .help("Relationship field to check; may be repeated (default: depends, recommends, suggests)"),
                ),
        )
        .subcommand(
            Command::new("checkinstall")
                .about("Check that a package's dependencies are installable, recursively")
                .arg(package_arg())
                .arg(release_arg())
                .arg(arch_arg())
                .arg(with_recommends_arg())
                .arg(
                    Arg::new("verbose_tree")
                        .long("verbose-tree")
                        .action(ArgAction::SetTrue)
                        .help("Print the full resolution tree instead of package sets"),
                ),
        )
        .subcommand(
            Command::new("checkbuilddeps")
                .about("Check the build-dependencies of a source package")
                .arg(package_arg())
                .arg(release_arg())
                .arg(arch_arg()),
        )
        .subcommand(
            Command::new("checkbackport")
                .about("Check whether a source package could be backported")
                .arg(package_arg())
                .arg(
                    Arg::new("from_release")
                        .short('f')
                        .long("from-release")
                        .default_value("unstable")
                        .help("Release the package comes from"),
                )
                .arg(
                    Arg::new("to_release")
                        .short('t')
                        .long("to-release")
                        .default_value("stable")
                        .help("Release the package would be built in"),
                )
                .arg(arch_arg()),
        )
        .subcommand(
            Command::new("why")
                .about("Show the dependency chains that lead from one package to another")
                .arg(Arg::new("from").required(true).help("Package the chains start from"))
                .arg(Arg::new("to").required(true).help("Package the chains end at"))
                .arg(release_arg())
                .arg(arch_arg())
                .arg(with_recommends_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Shell to generate completions for")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("uddcheck.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
