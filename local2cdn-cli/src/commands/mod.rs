//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `run`: Rewrite every configured file group
//! - `rewrite`: Rewrite a single document to a file or stdout
//! - `resolve`: Print what a single URL rewrites to
//! - `check`: Compile the maps and list rules, dropped entries and
//!   rewritable targets
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod resolve;
pub mod rewrite;
pub mod run;
pub mod validate;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use resolve::ResolveCommand;
pub use rewrite::RewriteCommand;
pub use run::RunCommand;
pub use validate::ValidateCommand;
