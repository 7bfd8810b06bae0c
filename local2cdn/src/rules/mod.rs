//! Compiled rewrite rules.
//!
//! A [`RuleSet`] is the compiled, immutable form of the `maps` option: an
//! ordered list of `{kind, matcher, target}` rules. Order is match
//! priority. The set is `Send + Sync` and can be shared freely.

pub mod compiler;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::kind::ResourceKind;

pub use compiler::{
    compile_config, Compilation, DropReason, DroppedEntry, EffectiveOptions, MappingCompiler,
};

/// How a matcher was derived from a local identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The identifier is matched literally at the end of the URL.
    Literal,
    /// The identifier is a user-supplied pattern.
    Pattern,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Pattern => write!(f, "regex"),
        }
    }
}

/// A case-insensitive matcher over URLs.
///
/// Literal matchers are anchored at compile time (`<escaped>\s*$`). Matching
/// itself is always an unanchored search, so a user pattern without anchors
/// matches anywhere in the URL.
///
/// # Examples
///
/// ```
/// use local2cdn::rules::Matcher;
///
/// let literal = Matcher::literal("jquery.js").unwrap();
/// assert!(literal.is_match("scripts/JQuery.js  "));
/// assert!(!literal.is_match("myjquery.js.bak"));
///
/// let pattern = Matcher::pattern("^foo").unwrap();
/// assert!(pattern.is_match("foo/bar.png"));
/// assert!(!pattern.is_match("img/foo.png"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    source: String,
    mode: MatchMode,
    regex: Regex,
}

impl Matcher {
    /// Match URLs that end with `local`, optionally followed by whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error only if the escaped pattern exceeds the regex size
    /// limit.
    pub fn literal(local: &str) -> Result<Self, regex::Error> {
        let regex = Self::build(&format!(r"{}\s*$", regex::escape(local)))?;
        Ok(Self {
            source: local.to_string(),
            mode: MatchMode::Literal,
            regex,
        })
    }

    /// Use `pattern` as a case-insensitive regular expression.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            mode: MatchMode::Pattern,
            regex: Self::build(pattern)?,
        })
    }

    fn build(pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern).case_insensitive(true).build()
    }

    /// Whether the matcher occurs anywhere in `url`.
    #[must_use]
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The local identifier this matcher was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the identifier was taken literally or as a pattern.
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The compiled regular expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.as_str() == other.as_str()
    }
}

impl Eq for Matcher {}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    /// The pool of URL occurrences this rule applies to.
    pub kind: ResourceKind,
    /// What a local URL must look like to be replaced.
    pub matcher: Matcher,
    /// The fully resolved CDN URL.
    pub target: String,
}

impl CompiledRule {
    /// Whether this rule replaces `url` when it occurs as `kind`.
    #[must_use]
    pub fn applies_to(&self, url: &str, kind: ResourceKind) -> bool {
        self.kind == kind && self.matcher.is_match(url)
    }
}

/// A pair of rules where the first one's target is rewritten again by the
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewritableTarget {
    /// Index of the rule whose target is re-matched.
    pub rule: usize,
    /// Index of the first rule that matches that target.
    pub matched_by: usize,
}

/// An ordered, immutable list of compiled rules.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{RawMaps, TaskDefaults};
/// use local2cdn::rules::MappingCompiler;
/// use local2cdn::ResourceKind;
///
/// let maps = RawMaps::object([("jquery.js", "jquery/2.0.3/jquery.min.js")]);
/// let defaults = TaskDefaults { prefix: "//cdn.bootcss.com".into(), ..Default::default() };
/// let rules = MappingCompiler::compile(&maps, &defaults).rules;
///
/// assert_eq!(
///     rules.rewrite("scripts/jquery.js", ResourceKind::Script),
///     "//cdn.bootcss.com/jquery/2.0.3/jquery.min.js"
/// );
/// assert_eq!(rules.rewrite("scripts/jquery.js", ResourceKind::Image), "scripts/jquery.js");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Wrap already compiled rules, keeping their order.
    #[must_use]
    pub fn new(rules: Vec<CompiledRule>) -> Self {
        Self { rules }
    }

    /// The rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule> {
        self.rules.iter()
    }

    /// The first rule of `kind` whose matcher occurs in `url`.
    ///
    /// This does not check whether `url` is a local reference; see
    /// [`RuleSet::rewrite`].
    #[must_use]
    pub fn find(&self, url: &str, kind: ResourceKind) -> Option<&CompiledRule> {
        self.rules.iter().find(|rule| rule.applies_to(url, kind))
    }

    /// Rewrite one URL occurrence. Shorthand for [`crate::rewrite::rewrite`].
    #[must_use]
    pub fn rewrite(&self, url: &str, kind: ResourceKind) -> String {
        crate::rewrite::rewrite(url, kind, self)
    }

    /// Rules whose target would itself be rewritten by a same-kind rule.
    ///
    /// Rewriting is idempotent exactly when this is empty. Targets that are
    /// not local references (they contain `//`) are never re-rewritten, and
    /// a target that maps back onto itself is harmless, so neither is listed.
    #[must_use]
    pub fn rewritable_targets(&self) -> Vec<RewritableTarget> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| crate::rewrite::is_local_reference(&rule.target))
            .filter_map(|(index, rule)| {
                let (matched_by, other) = self
                    .rules
                    .iter()
                    .enumerate()
                    .find(|(_, other)| other.applies_to(&rule.target, rule.kind))?;
                (other.target != rule.target).then_some(RewritableTarget {
                    rule: index,
                    matched_by,
                })
            })
            .collect()
    }
}

impl FromIterator<CompiledRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = CompiledRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a CompiledRule;
    type IntoIter = std::slice::Iter<'a, CompiledRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
