//! Configuration validation.
//!
//! Checks the parts of a configuration that are fatal when wrong. Problems
//! confined to a single map entry are not validation errors: the compiler
//! drops such entries with a warning and keeps going.

use crate::config::schema::{Config, FileGroup};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { separator: Some(String::new()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty task-level separator, a
    /// prefix containing whitespace or a NUL byte, or a malformed file
    /// group.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref separator) = config.separator {
            if separator.is_empty() {
                return Err(Error::Validation {
                    field: "separator".into(),
                    message: "separator must be non-empty".into(),
                });
            }
        }

        if let Some(ref prefix) = config.prefix {
            Self::validate_prefix(prefix)?;
        }

        if let Some(ref files) = config.files {
            for (index, group) in files.iter().enumerate() {
                Self::validate_file_group(index, group)?;
            }
        }

        Ok(())
    }

    /// Require the `maps` option, as a run or rule listing does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaps`] when `maps` is absent.
    pub fn require_maps(config: &Config) -> Result<()> {
        if config.maps.is_none() {
            return Err(Error::InvalidMaps {
                reason: "maps is required (a plain object or an array of plain objects)".into(),
            });
        }
        Ok(())
    }

    fn validate_prefix(prefix: &str) -> Result<()> {
        if prefix.contains('\0') {
            return Err(Error::Validation {
                field: "prefix".into(),
                message: "prefix cannot contain null bytes".into(),
            });
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(Error::Validation {
                field: "prefix".into(),
                message: format!("prefix cannot contain whitespace: '{prefix}'"),
            });
        }
        Ok(())
    }

    fn validate_file_group(index: usize, group: &FileGroup) -> Result<()> {
        let field = format!("files[{index}]");

        if group.dest.as_os_str().is_empty() {
            return Err(Error::Validation {
                field,
                message: "dest must be a non-empty path".into(),
            });
        }

        if group.src.paths().is_empty() {
            return Err(Error::Validation {
                field,
                message: "src must name at least one file".into(),
            });
        }

        if group.src.paths().iter().any(|p| p.as_os_str().is_empty()) {
            return Err(Error::Validation {
                field,
                message: "src entries must be non-empty paths".into(),
            });
        }

        Ok(())
    }
}
