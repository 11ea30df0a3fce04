//! Build script for cfgtree-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("cfgtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Load nested configuration from a directory tree")
        .long_about(
            "Command-line tool for assembling one configuration object from a directory tree of JSON and YAML files",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .help("Options file (YAML) applied below CFGTREE_* variables and flags")
                .value_name("FILE")
                .global(true)
                .env("CFGTREE_OPTIONS"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("Output format")
                .value_name("FORMAT")
                .value_parser(["json", "yaml"])
                .default_value("json")
                .global(true),
        )
        .subcommands(vec![
            Command::new("load")
                .about("Load a configuration directory tree")
                .long_about("Map a directory tree onto one nested configuration object"),
            Command::new("file")
                .about("Load a single configuration file by base path")
                .long_about("Load the highest-priority file for a base path without extension"),
            Command::new("merge")
                .about("Deep-merge configuration files, later files win")
                .long_about("Deep-merge JSON and YAML files from left to right"),
            Command::new("validate")
                .about("Validate an options file")
                .long_about("Check a cfgtree options file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("cfgtree.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
