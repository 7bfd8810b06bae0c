//! Configuration builder.
//!
//! Assembles the final [`Config`] from discovered files, an explicit file,
//! environment variables and programmatic overrides, then validates it.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Builder for hierarchical configuration.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{Config, ConfigBuilder, RawMaps};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maps: Some(RawMaps::object([("foo.png", "/xxx/foo.png")])),
///         prefix: Some("http://cdn.bootcss.com/".into()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.prefix.as_deref(), Some("http://cdn.bootcss.com/"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Create a builder that discovers files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover configuration files starting from `dir`.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Load exactly this file instead of discovering project files.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Do not read any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not apply `LOCAL2CDN_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply programmatic overrides on top of every other source.
    ///
    /// Calling this twice merges the second set over the first.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        match self.overrides {
            Some(ref mut existing) => ConfigMerger::merge_into(existing, &config),
            None => self.overrides = Some(config),
        }
        self
    }

    /// Load, merge and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed, an
    /// environment variable is malformed, or the merged result fails
    /// validation.
    pub fn build(self) -> Result<Config> {
        self.build_with_root().map(|(config, _)| config)
    }

    /// Like [`ConfigBuilder::build`], also returning the project root.
    ///
    /// The root is the directory holding the highest-precedence
    /// configuration file that was read, or `None` when no file was read
    /// (or the file path has no directory part). `files[].src` and
    /// `files[].dest` are meant to be resolved against it.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigBuilder::build`].
    pub fn build_with_root(self) -> Result<(Config, Option<PathBuf>)> {
        let sources = self.load_sources()?;
        let root = sources
            .iter()
            .max_by_key(|s| s.precedence)
            .and_then(|s| s.path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok((config, root))
    }

    fn load_sources(&self) -> Result<Vec<ConfigSource>> {
        if self.skip_files {
            return Ok(Vec::new());
        }

        if let Some(ref path) = self.config_file {
            let config = ConfigLoader::load_file(path)?;
            return Ok(vec![ConfigSource {
                path: path.clone(),
                precedence: 1,
                config,
            }]);
        }

        let working_dir = match self.working_dir {
            Some(ref dir) => dir.clone(),
            None => env::current_dir()?,
        };
        ConfigLoader::load_all(&working_dir)
    }
}
