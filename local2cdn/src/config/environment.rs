//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `LOCAL2CDN_*` environment variables
//! that override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Overrides the task-level CDN prefix.
pub const PREFIX_ENV: &str = "LOCAL2CDN_PREFIX";

/// Overrides the task-level marker separator.
pub const SEPARATOR_ENV: &str = "LOCAL2CDN_SEPARATOR";

/// Overrides the task-level regex flag.
pub const REGEX_ENV: &str = "LOCAL2CDN_REGEX";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use local2cdn::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if `LOCAL2CDN_REGEX` is not a recognizable boolean.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(prefix) = env::var(PREFIX_ENV) {
            config.prefix = Some(prefix);
        }

        if let Ok(separator) = env::var(SEPARATOR_ENV) {
            config.separator = Some(separator);
        }

        if let Ok(val) = env::var(REGEX_ENV) {
            config.regex = Some(Self::parse_bool(REGEX_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
