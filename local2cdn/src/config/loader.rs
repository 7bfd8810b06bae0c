//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading local2cdn configuration
//! files from the working directory and its ancestors.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Shared project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "local2cdn.yaml";

/// Private (uncommitted) project configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "local2cdn.local.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use local2cdn::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let project = ConfigSource {
///     path: PathBuf::from("local2cdn.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// assert_eq!(project.precedence, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
///
/// # Examples
///
/// ```no_run
/// use local2cdn::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new(".")).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all project configuration files.
    ///
    /// Returns the sources sorted from lowest to highest precedence:
    /// `local2cdn.yaml` (1) then `local2cdn.local.yaml` (2).
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut sources = Self::discover_project_configs(working_dir)?;
        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 1), (LOCAL_CONFIG_FILE, 2)] {
                let candidate = current.join(name);
                if candidate.is_file() {
                    log::debug!("found configuration file {}", candidate.display());
                    let config = Self::load_file(&candidate)?;
                    configs.push(ConfigSource {
                        path: candidate,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML (or JSON) configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::PathNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: format!("Failed to read configuration file: {e}"),
                }
            }
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Parse configuration text that did not come from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the text is not a valid
    /// configuration document.
    ///
    /// # Examples
    ///
    /// ```
    /// use local2cdn::config::ConfigLoader;
    ///
    /// let config = ConfigLoader::parse_str("maps: {jquery.js: jquery.min.js}").unwrap();
    /// assert_eq!(config.maps.unwrap().len(), 1);
    /// assert!(ConfigLoader::parse_str("maps: 3").is_err());
    /// ```
    pub fn parse_str(contents: &str) -> Result<Config> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
