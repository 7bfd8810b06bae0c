//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources.
//! Every field is replaced wholesale: a higher-precedence `maps` or `files`
//! is never combined with a lower one, since rule order is match priority.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{Config, ConfigMerger};
///
/// let low = Config { prefix: Some("low".to_string()), ..Default::default() };
/// let high = Config { prefix: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.prefix, Some("high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target where set).
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maps.is_some() {
            target.maps.clone_from(&source.maps);
        }

        if source.prefix.is_some() {
            target.prefix.clone_from(&source.prefix);
        }

        if source.regex.is_some() {
            target.regex = source.regex;
        }

        if source.separator.is_some() {
            target.separator.clone_from(&source.separator);
        }

        if source.files.is_some() {
            target.files.clone_from(&source.files);
        }
    }
}
