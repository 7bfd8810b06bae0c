//! Configuration system for local2cdn.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML (or JSON) configuration files discovered from the working directory
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the fatal parts of a configuration
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`LOCAL2CDN_*`)
//! 3. Private project config (`local2cdn.local.yaml`)
//! 4. Project config (`local2cdn.yaml`)
//! 5. Built-in defaults
//!
//! An explicit file passed to `ConfigBuilder::with_config_file` replaces
//! 3 and 4.
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use local2cdn::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! ```
//!
//! Programmatic configuration, in list form with per-entry overrides:
//!
//! ```
//! use local2cdn::config::{Config, ConfigBuilder, MapEntry, RawMaps};
//!
//! let custom = Config {
//!     maps: Some(RawMaps::List(vec![
//!         MapEntry::new("jquery.js", "jquery/2.0.3/jquery.min.js").with_prefix("//cdn.a.com"),
//!         MapEntry::new("^foo", "/xxx/foo.pic?123#$#image")
//!             .with_separator("#$#")
//!             .with_regex(true),
//!     ])),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.maps.unwrap().len(), 2);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, FileGroup, InvalidField, MapEntry, RawMaps, SourceList, TaskDefaults};
pub use validator::ConfigValidator;
