//! Build script for local2cdn-cli.
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
    Command::new("local2cdn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite local asset references in HTML and CSS into CDN URLs")
        .long_about(
            "Command-line tool for rewriting <script>, <link>, <img> and CSS url() references \
             to local assets into CDN URLs, driven by a maps configuration",
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
            Arg::new("config")
                .long("config")
                .help("Use this configuration file instead of discovering local2cdn.yaml")
                .value_name("PATH")
                .global(true)
                .env("LOCAL2CDN_CONFIG"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Override the CDN prefix joined onto every target")
                .value_name("URL")
                .global(true),
        )
        .arg(
            Arg::new("separator")
                .long("separator")
                .help("Override the type marker separator")
                .value_name("SEP")
                .global(true),
        )
        .arg(
            Arg::new("regex")
                .long("regex")
                .help("Treat every local identifier as a regular expression")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("run")
                .about("Rewrite every configured file group")
                .long_about("Rewrite the first existing source of every file group into its destination"),
            Command::new("rewrite")
                .about("Rewrite a single document")
                .long_about("Rewrite one HTML or CSS document to a file or to stdout"),
            Command::new("resolve")
                .about("Print what a single URL rewrites to")
                .long_about("Rewrite one URL of a given kind (js, css or image) and print the result"),
            Command::new("check")
                .about("Compile the maps and list the resulting rules")
                .long_about("List compiled rules, dropped map entries and targets that would be rewritten again"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a local2cdn configuration file for errors"),
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

    fs::write(man_dir.join("local2cdn.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
