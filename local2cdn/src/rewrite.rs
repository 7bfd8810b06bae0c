//! Rewriting of individual URL occurrences.
//!
//! [`rewrite`] is the built-in conversion: leave anything that is not a
//! local reference alone, otherwise replace the URL with the target of the
//! first rule of the requested kind that matches it. A [`UrlConverter`]
//! can take over that decision entirely.

use crate::kind::ResourceKind;
use crate::rules::RuleSet;

/// Whether `url` refers to a local resource that rules may replace.
///
/// Empty strings, anything containing `//` (absolute or protocol-relative
/// URLs) and `data:` URIs are not local.
///
/// # Examples
///
/// ```
/// use local2cdn::rewrite::is_local_reference;
///
/// assert!(is_local_reference("js/jquery.js"));
/// assert!(is_local_reference("/static/app.css"));
/// assert!(!is_local_reference("//cdn.example.com/app.css"));
/// assert!(!is_local_reference("https://cdn.example.com/app.css"));
/// assert!(!is_local_reference("data:image/png;base64,AAAA"));
/// assert!(!is_local_reference(""));
/// ```
#[must_use]
pub fn is_local_reference(url: &str) -> bool {
    !url.is_empty() && !url.contains("//") && !url.starts_with("data:")
}

/// Rewrite one URL occurrence of `kind` against `rules`.
///
/// Returns the target of the first matching rule, or `url` unchanged when
/// it is not local or nothing matches.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{RawMaps, TaskDefaults};
/// use local2cdn::rewrite::rewrite;
/// use local2cdn::rules::MappingCompiler;
/// use local2cdn::ResourceKind;
///
/// let maps = RawMaps::object([("jquery.js", "jquery/2.0.3/jquery.min.js")]);
/// let rules = MappingCompiler::compile(&maps, &TaskDefaults::default()).rules;
///
/// assert_eq!(rewrite("scripts/jquery.js", ResourceKind::Script, &rules), "jquery/2.0.3/jquery.min.js");
/// assert_eq!(rewrite("myjquery.js.bak", ResourceKind::Script, &rules), "myjquery.js.bak");
/// ```
#[must_use]
pub fn rewrite(url: &str, kind: ResourceKind, rules: &RuleSet) -> String {
    if !is_local_reference(url) {
        return url.to_string();
    }

    match rules.find(url, kind) {
        Some(rule) => {
            log::trace!("{kind} {url} -> {}", rule.target);
            rule.target.clone()
        }
        None => url.to_string(),
    }
}

/// Decides the replacement for every URL occurrence in a document.
///
/// A custom converter replaces matching for all three kinds. It receives
/// the compiled rules so it can defer to [`rewrite`] for the cases it does
/// not handle itself. Closures of the right shape are converters.
///
/// # Examples
///
/// ```
/// use local2cdn::rewrite::{rewrite, UrlConverter};
/// use local2cdn::rules::RuleSet;
/// use local2cdn::ResourceKind;
///
/// let versioned = |url: &str, kind: ResourceKind, rules: &RuleSet| match kind {
///     ResourceKind::Image => format!("{url}?v=2"),
///     _ => rewrite(url, kind, rules),
/// };
///
/// let rules = RuleSet::default();
/// assert_eq!(versioned.convert("a.png", ResourceKind::Image, &rules), "a.png?v=2");
/// assert_eq!(versioned.convert("a.js", ResourceKind::Script, &rules), "a.js");
/// ```
pub trait UrlConverter: Send + Sync {
    /// Produce the replacement for `url`, an occurrence of `kind`.
    fn convert(&self, url: &str, kind: ResourceKind, rules: &RuleSet) -> String;
}

impl<F> UrlConverter for F
where
    F: Fn(&str, ResourceKind, &RuleSet) -> String + Send + Sync,
{
    fn convert(&self, url: &str, kind: ResourceKind, rules: &RuleSet) -> String {
        self(url, kind, rules)
    }
}

/// The built-in conversion. The `rules` argument is ignored in favour of
/// `self`.
impl UrlConverter for RuleSet {
    fn convert(&self, url: &str, kind: ResourceKind, _rules: &RuleSet) -> String {
        rewrite(url, kind, self)
    }
}
