//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckCommand, CompletionsCommand, ResolveCommand, RewriteCommand, RunCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for rewriting local asset references into CDN URLs.
#[derive(Parser)]
#[command(name = "local2cdn")]
#[command(version, about = "Rewrite local asset references in HTML and CSS into CDN URLs", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use this configuration file instead of discovering local2cdn.yaml
    #[arg(long, value_name = "PATH", global = true, env = "LOCAL2CDN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the CDN prefix joined onto every target
    #[arg(long, value_name = "URL", global = true)]
    pub prefix: Option<String>,

    /// Override the type marker separator
    #[arg(long, value_name = "SEP", global = true)]
    pub separator: Option<String>,

    /// Treat every local identifier as a regular expression
    #[arg(long, global = true)]
    pub regex: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Rewrite every configured file group
    Run(RunCommand),

    /// Rewrite a single document
    Rewrite(RewriteCommand),

    /// Print what a single URL rewrites to
    Resolve(ResolveCommand),

    /// Compile the maps and list the resulting rules
    Check(CheckCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
