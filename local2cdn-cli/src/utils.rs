//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! configuration loading with command-line overrides and rule compilation.

use crate::error::CliError;
use local2cdn::config::Config;
use local2cdn::operations::compile_task;
use local2cdn::{ConfigBuilder, Logger, RuleSet};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    #[allow(dead_code)] // Carried by `logger`
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file; disables discovery.
    pub config: Option<PathBuf>,

    /// Override the task-level CDN prefix.
    pub prefix: Option<String>,

    /// Override the task-level marker separator.
    pub separator: Option<String>,

    /// Treat every `local` as a pattern.
    pub regex: bool,

    /// Logger built from the verbosity flags.
    pub logger: Logger,
}

impl GlobalOptions {
    /// The configuration values set on the command line.
    pub fn overrides(&self) -> Config {
        Config {
            prefix: self.prefix.clone(),
            separator: self.separator.clone(),
            regex: self.regex.then_some(true),
            ..Config::default()
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files (`--config`, or discovered from the working directory)
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    load_project(global).map(|(config, _)| config)
}

/// Load hierarchical configuration together with the project root.
///
/// The root is the directory of the configuration file that was read;
/// file groups are resolved against it.
pub fn load_project(global: &GlobalOptions) -> Result<(Config, Option<PathBuf>), CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config {
        if !path.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_config_file(path);
    }

    builder
        .with_config(global.overrides())
        .build_with_root()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Load the configuration and compile its `maps`.
///
/// Dropped entries are reported through the global logger.
pub fn load_rules(global: &GlobalOptions) -> Result<(Config, RuleSet), CliError> {
    let config = load_configuration(global)?;
    let rules = compile_task(&config, &global.logger)?;
    Ok((config, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use local2cdn::LogLevel;

    fn global() -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            quiet: true,
            config: None,
            prefix: None,
            separator: None,
            regex: false,
            logger: Logger::new(LogLevel::Quiet),
        }
    }

    #[test]
    fn test_overrides_only_set_fields() {
        let overrides = global().overrides();
        assert_eq!(overrides, Config::default());

        let overrides = GlobalOptions {
            prefix: Some("//cdn.example.com".into()),
            regex: true,
            ..global()
        }
        .overrides();
        assert_eq!(overrides.prefix.as_deref(), Some("//cdn.example.com"));
        assert_eq!(overrides.regex, Some(true));
        assert_eq!(overrides.separator, None);
        assert!(overrides.maps.is_none());
    }

    #[test]
    fn test_missing_config_file_is_invalid_argument() {
        let options = GlobalOptions {
            config: Some(PathBuf::from("/nonexistent/local2cdn.yaml")),
            ..global()
        };
        let err = load_configuration(&options).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
