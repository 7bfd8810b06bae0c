//! Configuration schema definitions.
//!
//! This module defines the configuration structure for local2cdn: the
//! `maps` that drive rewriting, the task-level defaults that map entries
//! inherit, and the file groups processed by a run.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use crate::kind::inference::DEFAULT_MARKER_SEPARATOR;

/// Complete configuration structure.
///
/// Every field is optional so that configuration sources can be layered;
/// [`Config::defaults`] resolves the task-level defaults after merging.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{Config, RawMaps};
///
/// let config = Config {
///     maps: Some(RawMaps::object([("jquery.js", "jquery/2.0.3/jquery.min.js")])),
///     prefix: Some("http://cdn.bootcss.com/".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.defaults().separator, ":");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Local identifier to CDN location mapping (required to compile).
    pub maps: Option<RawMaps>,

    /// Base CDN URL joined in front of every CDN location.
    pub prefix: Option<String>,

    /// Whether local identifiers are patterns rather than literals.
    pub regex: Option<bool>,

    /// Separator in front of an explicit type marker on a CDN location.
    pub separator: Option<String>,

    /// Source/destination groups processed by a run.
    pub files: Option<Vec<FileGroup>>,
}

impl Config {
    /// Resolve the task-level defaults map entries fall back to.
    #[must_use]
    pub fn defaults(&self) -> TaskDefaults {
        let mut defaults = TaskDefaults::default();
        if let Some(ref prefix) = self.prefix {
            defaults.prefix.clone_from(prefix);
        }
        if let Some(regex) = self.regex {
            defaults.regex = regex;
        }
        if let Some(ref separator) = self.separator {
            if !separator.is_empty() {
                defaults.separator.clone_from(separator);
            }
        }
        defaults
    }
}

/// Task-level defaults inherited by every map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefaults {
    /// Base CDN URL (empty for none).
    pub prefix: String,
    /// Whether local identifiers are patterns.
    pub regex: bool,
    /// Explicit type marker separator.
    pub separator: String,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            regex: false,
            separator: DEFAULT_MARKER_SEPARATOR.to_string(),
        }
    }
}

/// The `maps` option in either of its two accepted shapes.
///
/// Both shapes are normalized into [`MapEntry`] records as soon as they are
/// read; the variant only remembers which shape the user wrote, for
/// diagnostics and for serializing the configuration back out.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{MapEntry, RawMaps};
///
/// let object = RawMaps::object([("foo.png", "/xxx/foo.png")]);
/// assert_eq!(object.entries()[0].local.as_deref(), Some("foo.png"));
///
/// let list = RawMaps::List(vec![MapEntry::new("foo.tif", "/xxx/foo.tif").with_src_type("image")]);
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RawMaps {
    /// `{ local: cdn, ... }` in declaration order. Entries carry no overrides.
    Object(Vec<MapEntry>),
    /// `[{ local, cdn, prefix?, regex?, srcType?, separator? }, ...]`.
    List(Vec<MapEntry>),
}

impl RawMaps {
    /// Build an object-shaped mapping from `(local, cdn)` pairs.
    pub fn object<I, L, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<String>,
        C: Into<String>,
    {
        Self::Object(
            pairs
                .into_iter()
                .map(|(local, cdn)| MapEntry::new(local, cdn))
                .collect(),
        )
    }

    /// The normalized entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[MapEntry] {
        match self {
            Self::Object(entries) | Self::List(entries) => entries,
        }
    }

    /// Number of declared entries (including ones that will be dropped).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no entries are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Name of the shape, for messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }
}

impl<'de> Deserialize<'de> for RawMaps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Object(IndexMap<String, Value>),
            List(Vec<Value>),
            Other(Value),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Object(pairs) => Ok(Self::Object(
                pairs
                    .into_iter()
                    .map(|(local, cdn)| MapEntry {
                        local: Some(local),
                        cdn: scalar_to_string(&cdn),
                        ..MapEntry::default()
                    })
                    .collect(),
            )),
            Helper::List(items) => Ok(Self::List(
                items.into_iter().map(MapEntry::from_value).collect(),
            )),
            Helper::Other(value) => Err(D::Error::custom(format!(
                "maps must be a plain object or an array of plain objects, found {}",
                value_kind(&value)
            ))),
        }
    }
}

impl Serialize for RawMaps {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Object(entries) => {
                let map: IndexMap<&str, Option<&str>> = entries
                    .iter()
                    .filter_map(|e| e.local.as_deref().map(|l| (l, e.cdn.as_deref())))
                    .collect();
                map.serialize(serializer)
            }
            Self::List(entries) => entries.serialize(serializer),
        }
    }
}

/// One mapping entry, in the normalized list shape.
///
/// `local` and `cdn` are optional here because a malformed entry must still
/// be representable: the compiler drops entries missing either one with a
/// warning instead of rejecting the whole configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MapEntry {
    /// Local identifier (literal suffix, or a pattern when `regex` is on).
    #[serde(default, deserialize_with = "lenient_string")]
    pub local: Option<String>,

    /// CDN location, optionally carrying an explicit type marker.
    #[serde(default, deserialize_with = "lenient_string")]
    pub cdn: Option<String>,

    /// Per-entry prefix override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Per-entry regex flag override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<bool>,

    /// Explicit resource kind; disables inference and marker stripping.
    #[serde(
        default,
        rename = "srcType",
        alias = "src_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub src_type: Option<String>,

    /// Per-entry marker separator override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// An override that could not be read; the compiler drops the entry.
    #[serde(skip)]
    pub invalid: Option<InvalidField>,
}

/// A map entry field whose value has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    /// Name of the field as written.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl MapEntry {
    /// Create an entry with no overrides.
    pub fn new(local: impl Into<String>, cdn: impl Into<String>) -> Self {
        Self {
            local: Some(local.into()),
            cdn: Some(cdn.into()),
            ..Self::default()
        }
    }

    /// Set the prefix override.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the regex flag override.
    #[must_use]
    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = Some(regex);
        self
    }

    /// Set the explicit resource kind.
    #[must_use]
    pub fn with_src_type(mut self, src_type: impl Into<String>) -> Self {
        self.src_type = Some(src_type.into());
        self
    }

    /// Set the separator override.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Build an entry from an arbitrary list item.
    ///
    /// Items that are not mappings become an empty entry, which the
    /// compiler drops for missing `local`/`cdn`. When an override has the
    /// wrong type, `local` and `cdn` are kept and the offending field is
    /// recorded in [`MapEntry::invalid`].
    fn from_value(value: Value) -> Self {
        let Value::Mapping(mapping) = value else {
            return Self::default();
        };

        match serde_yaml::from_value(Value::Mapping(mapping.clone())) {
            Ok(entry) => entry,
            Err(error) => {
                let field = mapping
                    .iter()
                    .find(|(key, val)| {
                        let mut single = Mapping::new();
                        single.insert((*key).clone(), (*val).clone());
                        serde_yaml::from_value::<Self>(Value::Mapping(single)).is_err()
                    })
                    .and_then(|(key, _)| key.as_str())
                    .unwrap_or("entry")
                    .to_string();

                Self {
                    local: mapping.get("local").and_then(Value::as_str).map(str::to_string),
                    cdn: mapping.get("cdn").and_then(Value::as_str).map(str::to_string),
                    invalid: Some(InvalidField {
                        field,
                        message: error.to_string(),
                    }),
                    ..Self::default()
                }
            }
        }
    }
}

/// Keep strings; any other value counts as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }))
}

/// Object-shaped values are coerced the way a loosely typed source would:
/// numbers and booleans become their text, anything else is missing.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Human name of a YAML value's type.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// A set of sources rewritten into one destination.
///
/// Only the first existing source is used; see the run driver.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileGroup {
    /// Candidate source files, in priority order.
    pub src: SourceList,
    /// Output file.
    pub dest: PathBuf,
}

impl FileGroup {
    /// Create a group with a single source.
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src: SourceList(vec![src.into()]),
            dest: dest.into(),
        }
    }
}

/// One or more source paths; a single string is accepted as a list of one.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SourceList(pub Vec<PathBuf>);

impl SourceList {
    /// The source paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SourceList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            One(PathBuf),
            Many(Vec<PathBuf>),
        }

        Ok(match Helper::deserialize(deserializer)? {
            Helper::One(path) => Self(vec![path]),
            Helper::Many(paths) => Self(paths),
        })
    }
}
