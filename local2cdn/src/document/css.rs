//! `url(...)` references in stylesheets.
//!
//! Every `url(...)` value is an image reference, whatever property it
//! appears in. The value may be double-quoted, single-quoted or bare, with
//! whitespace inside the parentheses; the original quoting is kept.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rewritten, Splicer};
use crate::kind::ResourceKind;

#[allow(clippy::expect_used)]
static URL_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'()]*))\s*\)"#)
        .expect("url() regex is valid") // Static pattern, safe to panic
});

/// Characters that cannot appear in a bare `url(...)` value.
fn needs_quotes(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\''))
}

/// Rewrite every `url(...)` in a stylesheet as an image reference.
///
/// A bare value whose replacement contains characters a bare value cannot
/// hold is wrapped in double quotes.
///
/// # Examples
///
/// ```
/// use local2cdn::document::rewrite_stylesheet;
/// use local2cdn::ResourceKind;
///
/// let css = r#"a { background: url( "img/a.png" ) } b { background: url('b.gif') }"#;
/// let out = rewrite_stylesheet(css, &|url: &str, _: ResourceKind| url.replace("img/", "//cdn/"));
/// assert_eq!(out.text, r#"a { background: url( "//cdn/a.png" ) } b { background: url('b.gif') }"#);
/// assert_eq!(out.replaced, 1);
/// ```
pub fn rewrite_stylesheet<F>(css: &str, convert: &F) -> Rewritten
where
    F: Fn(&str, ResourceKind) -> String + ?Sized,
{
    let mut splicer = Splicer::new(css);

    for caps in URL_FUNCTION.captures_iter(css) {
        if let Some(quoted) = caps.name("dq").or_else(|| caps.name("sq")) {
            let replacement = convert(quoted.as_str(), ResourceKind::Image);
            splicer.replace_value(quoted.range(), &replacement);
        } else if let Some(bare) = caps.name("bare") {
            let replacement = convert(bare.as_str(), ResourceKind::Image);
            if needs_quotes(&replacement) {
                let quoted = format!("\"{}\"", replacement.replace('"', "\\\""));
                splicer.replace_value(bare.range(), &quoted);
            } else {
                splicer.replace_value(bare.range(), &replacement);
            }
        }
    }

    splicer.finish()
}
