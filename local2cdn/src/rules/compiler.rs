//! Compilation of `maps` entries into rewrite rules.
//!
//! Compilation never fails because of one bad entry. Each entry either
//! becomes a [`CompiledRule`] or a [`DroppedEntry`] explaining why it was
//! skipped, and the caller decides how loudly to report the drops.

use std::fmt;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::config::schema::{Config, MapEntry, RawMaps, TaskDefaults};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::kind::inference::DEFAULT_MARKER_SEPARATOR;
use crate::kind::{infer_kind, ResourceKind};
use crate::path::{join_prefix, normalize_url};
use crate::rules::{CompiledRule, Matcher, RuleSet};

/// Why an entry did not become a rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropReason {
    /// `local` or `cdn` is absent or not a string.
    #[error("missing string `{field}`")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// An override field has a value of the wrong type.
    #[error("invalid `{field}`: {message}")]
    InvalidField {
        /// Name of the field as written.
        field: String,
        /// The deserialization error.
        message: String,
    },

    /// An explicit `srcType` names no known resource kind.
    #[error("unrecognized srcType '{value}' (expected js, css or image)")]
    UnrecognizedSrcType {
        /// The `srcType` as written.
        value: String,
    },

    /// No inference strategy could determine a resource kind.
    #[error("cannot infer a resource kind (add a type marker or srcType)")]
    UnknownKind,

    /// The local identifier is not a valid regular expression.
    #[error("invalid pattern: {source}")]
    InvalidPattern {
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// A map entry that compilation skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedEntry {
    /// Position of the entry in declaration order.
    pub index: usize,
    /// The entry's local identifier, if it had one.
    pub local: Option<String>,
    /// The entry's CDN location, if it had one.
    pub cdn: Option<String>,
    /// Why it was skipped.
    pub reason: DropReason,
}

impl fmt::Display for DroppedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "map entry #{} ({} -> {}) dropped: {}",
            self.index,
            self.local.as_deref().unwrap_or("?"),
            self.cdn.as_deref().unwrap_or("?"),
            self.reason
        )
    }
}

/// The result of compiling a `maps` option.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    /// Rules in declaration order.
    pub rules: RuleSet,
    /// Entries that did not compile, in declaration order.
    pub dropped: Vec<DroppedEntry>,
}

impl Compilation {
    /// Whether every entry compiled.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// The options that apply to one entry after per-entry overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveOptions {
    /// CDN prefix joined in front of the location.
    pub prefix: String,
    /// Explicit type marker separator (never empty).
    pub separator: String,
    /// Whether `local` is a pattern.
    pub regex: bool,
}

impl EffectiveOptions {
    /// Resolve an entry's overrides against the task defaults.
    ///
    /// A present `prefix` override wins even when empty. An empty
    /// `separator` override falls back to the default.
    ///
    /// # Examples
    ///
    /// ```
    /// use local2cdn::config::{MapEntry, TaskDefaults};
    /// use local2cdn::rules::EffectiveOptions;
    ///
    /// let defaults = TaskDefaults { prefix: "http://cdn".into(), ..Default::default() };
    /// let entry = MapEntry::new("a.js", "a.min.js").with_prefix("").with_separator("");
    /// let options = EffectiveOptions::resolve(&entry, &defaults);
    /// assert_eq!(options.prefix, "");
    /// assert_eq!(options.separator, ":");
    /// ```
    #[must_use]
    pub fn resolve(entry: &MapEntry, defaults: &TaskDefaults) -> Self {
        Self {
            prefix: entry
                .prefix
                .clone()
                .unwrap_or_else(|| defaults.prefix.clone()),
            separator: entry
                .separator
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| defaults.separator.clone()),
            regex: entry.regex.unwrap_or(defaults.regex),
        }
    }
}

/// Compiles raw `maps` into a [`RuleSet`].
///
/// # Examples
///
/// ```
/// use local2cdn::config::{RawMaps, TaskDefaults};
/// use local2cdn::rules::MappingCompiler;
/// use local2cdn::ResourceKind;
///
/// let maps = RawMaps::object([
///     ("foo.png", "/xxx/foo.png"),
///     ("foo.tif", "/xxx/foo.tif:image"),
///     ("thing", "place"),
/// ]);
/// let defaults = TaskDefaults { prefix: "http://cdn.bootcss.com/".into(), ..Default::default() };
///
/// let compilation = MappingCompiler::compile(&maps, &defaults);
/// assert_eq!(compilation.rules.len(), 2);
/// assert_eq!(compilation.rules.rules()[1].kind, ResourceKind::Image);
/// assert_eq!(compilation.rules.rules()[1].target, "http://cdn.bootcss.com/xxx/foo.tif");
/// assert_eq!(compilation.dropped[0].index, 2);
/// ```
pub struct MappingCompiler;

impl MappingCompiler {
    /// Compile every entry, keeping declaration order.
    #[must_use]
    pub fn compile(maps: &RawMaps, defaults: &TaskDefaults) -> Compilation {
        let (rules, dropped) = maps.entries().iter().enumerate().fold(
            (Vec::with_capacity(maps.len()), Vec::new()),
            |(mut rules, mut dropped), (index, entry)| {
                match Self::compile_entry(entry, defaults) {
                    Ok(rule) => {
                        log::debug!(
                            "compiled {} rule {} -> {}",
                            rule.kind,
                            rule.matcher,
                            rule.target
                        );
                        rules.push(rule);
                    }
                    Err(reason) => {
                        let entry = DroppedEntry {
                            index,
                            local: entry.local.clone(),
                            cdn: entry.cdn.clone(),
                            reason,
                        };
                        log::warn!("{entry}");
                        dropped.push(entry);
                    }
                }
                (rules, dropped)
            },
        );

        log::debug!(
            "compiled {} of {} {} map entries",
            rules.len(),
            maps.len(),
            maps.shape()
        );

        Compilation {
            rules: RuleSet::new(rules),
            dropped,
        }
    }

    /// Compile a single entry.
    ///
    /// # Errors
    ///
    /// Returns the reason the entry has to be dropped.
    pub fn compile_entry(
        entry: &MapEntry,
        defaults: &TaskDefaults,
    ) -> std::result::Result<CompiledRule, DropReason> {
        if let Some(ref invalid) = entry.invalid {
            return Err(DropReason::InvalidField {
                field: invalid.field.clone(),
                message: invalid.message.clone(),
            });
        }

        let local = entry
            .local
            .as_deref()
            .ok_or(DropReason::MissingField { field: "local" })?;
        let cdn = entry
            .cdn
            .as_deref()
            .ok_or(DropReason::MissingField { field: "cdn" })?;

        let options = EffectiveOptions::resolve(entry, defaults);
        let explicit = entry.src_type.as_deref().filter(|s| !s.is_empty());

        let kind = match explicit {
            Some(src_type) => ResourceKind::classify(&src_type.to_lowercase()).ok_or_else(|| {
                DropReason::UnrecognizedSrcType {
                    value: src_type.to_string(),
                }
            })?,
            None => infer_kind(local, cdn, &options.separator).ok_or(DropReason::UnknownKind)?,
        };

        let matcher = if options.regex {
            Matcher::pattern(local)
        } else {
            Matcher::literal(local)
        }
        .map_err(|source| DropReason::InvalidPattern { source })?;

        let target = normalize_url(&join_prefix(&options.prefix, cdn));
        let target = if explicit.is_some() {
            target
        } else {
            strip_type_marker(&target, &options.separator).to_string()
        };

        Ok(CompiledRule {
            kind,
            matcher,
            target,
        })
    }
}

/// Remove one trailing `<separator><token>` where the token names a kind
/// or an image extension.
///
/// The separator is matched literally, so separators made of word
/// characters strip only the final marker.
///
/// # Examples
///
/// ```
/// use local2cdn::rules::compiler::strip_type_marker;
///
/// assert_eq!(strip_type_marker("/xxx/foo.tif:image", ":"), "/xxx/foo.tif");
/// assert_eq!(strip_type_marker("/xxx/foo.pic?123#$#IMAGE", "#$#"), "/xxx/foo.pic?123");
/// assert_eq!(strip_type_marker("/xxx/foo.tif:bogus", ":"), "/xxx/foo.tif:bogus");
/// assert_eq!(strip_type_marker("img/my_logo_png", "_"), "img/my_logo");
/// ```
#[must_use]
pub fn strip_type_marker<'a>(target: &'a str, separator: &str) -> &'a str {
    let separator = if separator.is_empty() {
        DEFAULT_MARKER_SEPARATOR
    } else {
        separator
    };
    match marker_pattern(separator).and_then(|re| re.find(target)) {
        Some(marker) => &target[..marker.start()],
        None => target,
    }
}

/// Build the `<separator>(js|css|image|png|...)$` pattern for a separator.
fn marker_pattern(separator: &str) -> Option<Regex> {
    let tokens: Vec<&str> = ResourceKind::marker_tokens().collect();
    RegexBuilder::new(&format!(
        "{}(?:{})$",
        regex::escape(separator),
        tokens.join("|")
    ))
    .case_insensitive(true)
    .build()
    .ok()
}

/// Compile the `maps` of a merged configuration with its task defaults.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidMaps`] when the configuration has no
/// `maps`.
pub fn compile_config(config: &Config) -> Result<Compilation> {
    ConfigValidator::require_maps(config)?;
    Ok(config
        .maps
        .as_ref()
        .map(|maps| MappingCompiler::compile(maps, &config.defaults()))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const BOOTCSS: &str = "http://cdn.bootcss.com/";

    fn bootcss() -> TaskDefaults {
        TaskDefaults {
            prefix: BOOTCSS.to_string(),
            ..TaskDefaults::default()
        }
    }

    fn targets(compilation: &Compilation) -> Vec<(ResourceKind, &str)> {
        compilation
            .rules
            .iter()
            .map(|r| (r.kind, r.target.as_str()))
            .collect()
    }

    #[test]
    fn test_object_form_sample() {
        let maps = RawMaps::object([
            ("jquery.js", "jquery/2.0.3/jquery.min.js"),
            ("bootstrap.js", "bootstrap/3.1.1/js/bootstrap.min.js"),
            ("bootstrap.css", "/bootstrap/3.1.1/css/bootstrap.min.css"),
            ("foo.png", "/xxx/foo.png"),
            ("foo.jpg", "/xxx/foo.jpg"),
            ("foo.gif", "/xxx/foo.gif"),
            ("foo.tif", "/xxx/foo.tif:image"),
        ]);
        let compilation = MappingCompiler::compile(&maps, &bootcss());

        assert!(compilation.is_clean());
        assert_eq!(
            targets(&compilation),
            vec![
                (ResourceKind::Script, "http://cdn.bootcss.com/jquery/2.0.3/jquery.min.js"),
                (ResourceKind::Script, "http://cdn.bootcss.com/bootstrap/3.1.1/js/bootstrap.min.js"),
                (ResourceKind::Stylesheet, "http://cdn.bootcss.com/bootstrap/3.1.1/css/bootstrap.min.css"),
                (ResourceKind::Image, "http://cdn.bootcss.com/xxx/foo.png"),
                (ResourceKind::Image, "http://cdn.bootcss.com/xxx/foo.jpg"),
                (ResourceKind::Image, "http://cdn.bootcss.com/xxx/foo.gif"),
                (ResourceKind::Image, "http://cdn.bootcss.com/xxx/foo.tif"),
            ]
        );
    }

    #[test]
    fn test_list_form_with_overrides() {
        let maps = RawMaps::List(vec![
            MapEntry::new("jquery.js", "jquery/2.0.3/jquery.min.js").with_prefix("//cdn.a.com"),
            MapEntry::new("^foo", "/xxx/foo.pic?123#$#image")
                .with_separator("#$#")
                .with_regex(true),
            MapEntry::new("foo.tif", "/xxx/foo.tif:image").with_src_type("IMAGE"),
        ]);
        let compilation = MappingCompiler::compile(&maps, &bootcss());

        assert!(compilation.is_clean());
        assert_eq!(
            targets(&compilation),
            vec![
                (ResourceKind::Script, "//cdn.a.com/jquery/2.0.3/jquery.min.js"),
                (ResourceKind::Image, "http://cdn.bootcss.com/xxx/foo.pic?123"),
                // Explicit srcType keeps the marker text.
                (ResourceKind::Image, "http://cdn.bootcss.com/xxx/foo.tif:image"),
            ]
        );
        assert_eq!(compilation.rules.rules()[1].matcher.mode(), crate::rules::MatchMode::Pattern);
    }

    #[test]
    fn test_uninferable_entry_dropped_siblings_survive() {
        let maps = RawMaps::object([
            ("jquery.js", "jquery.min.js"),
            ("thing", "place"),
            ("app.css", "app.min.css"),
        ]);
        let compilation = MappingCompiler::compile(&maps, &TaskDefaults::default());

        assert_eq!(compilation.rules.len(), 2);
        assert_eq!(compilation.dropped.len(), 1);
        let dropped = &compilation.dropped[0];
        assert_eq!(dropped.index, 1);
        assert_eq!(dropped.reason, DropReason::UnknownKind);
        assert!(dropped.to_string().contains("thing -> place"));
    }

    #[test]
    fn test_missing_fields_dropped() {
        let maps = RawMaps::List(vec![
            MapEntry {
                cdn: Some("x.js".into()),
                ..MapEntry::default()
            },
            MapEntry {
                local: Some("x.js".into()),
                ..MapEntry::default()
            },
        ]);
        let compilation = MappingCompiler::compile(&maps, &TaskDefaults::default());
        assert!(compilation.rules.is_empty());
        assert_eq!(
            compilation.dropped[0].reason,
            DropReason::MissingField { field: "local" }
        );
        assert_eq!(
            compilation.dropped[1].reason,
            DropReason::MissingField { field: "cdn" }
        );
        assert!(compilation.dropped[0].to_string().contains("? -> x.js"));
    }

    #[test]
    fn test_wrong_typed_override_names_the_field() {
        let yaml = r"
maps:
  - { local: jquery.js, cdn: jquery/2.0.3/jquery.min.js, regex: 'yes' }
  - { local: foo.png, cdn: /xxx/foo.png, prefix: 5 }
  - { local: bar.css, cdn: bar.min.css }
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let compilation = compile_config(&config).unwrap();

        assert_eq!(compilation.rules.len(), 1);
        assert_eq!(compilation.dropped.len(), 2);

        let first = &compilation.dropped[0];
        assert_eq!(first.local.as_deref(), Some("jquery.js"));
        assert_eq!(first.cdn.as_deref(), Some("jquery/2.0.3/jquery.min.js"));
        assert!(matches!(
            first.reason,
            DropReason::InvalidField { ref field, .. } if field == "regex"
        ));
        assert!(first
            .to_string()
            .starts_with("map entry #0 (jquery.js -> jquery/2.0.3/jquery.min.js) dropped: invalid `regex`"));

        assert!(matches!(
            compilation.dropped[1].reason,
            DropReason::InvalidField { ref field, .. } if field == "prefix"
        ));
    }

    #[test]
    fn test_unrecognized_src_type_dropped() {
        let entry = MapEntry::new("a.js", "a.min.js").with_src_type("font");
        let err = MappingCompiler::compile_entry(&entry, &TaskDefaults::default()).unwrap_err();
        assert_eq!(
            err,
            DropReason::UnrecognizedSrcType {
                value: "font".into()
            }
        );
    }

    #[test]
    fn test_empty_src_type_falls_back_to_inference() {
        let entry = MapEntry::new("a.js", "a.min.js").with_src_type("");
        let rule = MappingCompiler::compile_entry(&entry, &TaskDefaults::default()).unwrap();
        assert_eq!(rule.kind, ResourceKind::Script);
    }

    #[test]
    fn test_invalid_pattern_dropped() {
        let entry = MapEntry::new("(a.js", "a.min.js").with_regex(true);
        let err = MappingCompiler::compile_entry(&entry, &TaskDefaults::default()).unwrap_err();
        assert!(matches!(err, DropReason::InvalidPattern { .. }));

        // The same text is fine as a literal.
        let entry = MapEntry::new("(a.js", "a.min.js");
        assert!(MappingCompiler::compile_entry(&entry, &TaskDefaults::default()).is_ok());
    }

    #[test]
    fn test_task_regex_default_applies() {
        let defaults = TaskDefaults {
            regex: true,
            ..TaskDefaults::default()
        };
        let entry = MapEntry::new(r"^lib/.+\.js$", "lib.min.js");
        let rule = MappingCompiler::compile_entry(&entry, &defaults).unwrap();
        assert!(rule.matcher.is_match("lib/a/b.js"));

        let entry = entry.with_regex(false);
        let rule = MappingCompiler::compile_entry(&entry, &defaults).unwrap();
        assert!(!rule.matcher.is_match("lib/a/b.js"));
    }

    #[test]
    fn test_marker_inference_uses_effective_separator() {
        let defaults = TaskDefaults {
            separator: "@".into(),
            ..TaskDefaults::default()
        };
        let rule = MappingCompiler::compile_entry(&MapEntry::new("logo", "img/logo@image"), &defaults)
            .unwrap();
        assert_eq!(rule.kind, ResourceKind::Image);
        assert_eq!(rule.target, "img/logo");

        // With the default separator the marker is not recognized.
        assert!(MappingCompiler::compile_entry(
            &MapEntry::new("logo", "img/logo@image"),
            &TaskDefaults::default()
        )
        .is_err());
    }

    #[test]
    fn test_unrecognized_marker_is_kept_in_target() {
        let rule = MappingCompiler::compile_entry(
            &MapEntry::new("a.css", "cdn/a:bogus"),
            &TaskDefaults::default(),
        )
        .unwrap();
        assert_eq!(rule.kind, ResourceKind::Stylesheet);
        assert_eq!(rule.target, "cdn/a:bogus");
    }

    #[test]
    fn test_target_normalization() {
        let defaults = TaskDefaults {
            prefix: r"https://cdn.example.com\assets\".into(),
            ..TaskDefaults::default()
        };
        let rule =
            MappingCompiler::compile_entry(&MapEntry::new("a.js", r"\js\\a.js"), &defaults).unwrap();
        assert_eq!(rule.target, "https://cdn.example.com/assets/js/a.js");

        let rule = MappingCompiler::compile_entry(
            &MapEntry::new("a.js", r"js\a.js"),
            &TaskDefaults::default(),
        )
        .unwrap();
        assert_eq!(rule.target, "js/a.js");
    }

    #[test]
    fn test_strip_type_marker() {
        assert_eq!(strip_type_marker("a.png:PNG", ":"), "a.png");
        assert_eq!(strip_type_marker("a:js", ":"), "a");
        assert_eq!(strip_type_marker("a:jsx", ":"), "a:jsx");
        assert_eq!(strip_type_marker("a.js", ":"), "a.js");
        assert_eq!(strip_type_marker("", ":"), "");
        // A dot separator treats the extension itself as a marker.
        assert_eq!(strip_type_marker("jquery.min.js", "."), "jquery.min");
    }

    #[test]
    fn test_strip_type_marker_word_character_separator() {
        assert_eq!(strip_type_marker("img/my_logo_png", "_"), "img/my_logo");
        assert_eq!(strip_type_marker("lib/fooxbarxjs", "x"), "lib/fooxbar");
        assert_eq!(strip_type_marker("lib/fooxbarxjsx", "x"), "lib/fooxbarxjsx");

        let defaults = TaskDefaults {
            separator: "_".into(),
            ..TaskDefaults::default()
        };
        let rule =
            MappingCompiler::compile_entry(&MapEntry::new("logo.png", "img/my_logo_png"), &defaults)
                .unwrap();
        assert_eq!(rule.kind, ResourceKind::Image);
        assert_eq!(rule.target, "img/my_logo");
    }

    #[test]
    fn test_compile_config() {
        let config = Config {
            maps: Some(RawMaps::object([("foo.png", "/xxx/foo.png")])),
            prefix: Some(BOOTCSS.into()),
            ..Default::default()
        };
        let compilation = compile_config(&config).unwrap();
        assert_eq!(
            compilation.rules.rules()[0].target,
            "http://cdn.bootcss.com/xxx/foo.png"
        );
    }

    #[test]
    fn test_compile_config_requires_maps() {
        let err = compile_config(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidMaps { .. }));
    }

    #[test]
    fn test_empty_maps_compile_to_empty_set() {
        let compilation = MappingCompiler::compile(&RawMaps::List(Vec::new()), &bootcss());
        assert!(compilation.rules.is_empty());
        assert!(compilation.is_clean());
    }
}
