//! References in HTML-like markup.
//!
//! The scanner recognizes just enough structure to find references:
//! comments (skipped), `<style>` blocks (inner text rewritten as a
//! stylesheet), `<script>` elements (the `src` attribute is rewritten, the
//! body is skipped), stylesheet `<link>` tags and `<img>` tags. Template
//! syntax such as EJS tags passes through as text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::css::rewrite_stylesheet;
use super::{Rewritten, Splicer};
use crate::kind::ResourceKind;

/// Attribute list of an opening tag, allowing `>` inside quoted values.
const ATTRIBUTES: &str = r#"(?:[^>"']|"[^"]*"|'[^']*')*"#;

#[allow(clippy::expect_used)]
static ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?is)<!--.*?-->|<style\b(?P<style_attrs>{ATTRIBUTES})>(?P<style_body>.*?)</style\s*>|<script\b(?P<script_attrs>{ATTRIBUTES})>.*?</script\s*>|<(?P<tag>link|img|script)\b(?P<attrs>{ATTRIBUTES})>"
    );
    Regex::new(&pattern).expect("element regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:^|\s)(?P<name>[^\s"'>/=]+)(?:\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'=<>`]+)))?"#,
    )
    .expect("attribute regex is valid") // Static pattern, safe to panic
});

/// One attribute of an opening tag, with byte offsets into the document.
#[derive(Debug)]
struct Attribute<'a> {
    name: &'a str,
    value: Option<AttributeValue<'a>>,
}

#[derive(Debug)]
struct AttributeValue<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    quoted: bool,
}

/// Parse the attributes found in `attrs`, which starts at `offset` in the
/// document.
fn attributes(attrs: &str, offset: usize) -> Vec<Attribute<'_>> {
    ATTRIBUTE
        .captures_iter(attrs)
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str();
            let value = match (caps.name("dq").or_else(|| caps.name("sq")), caps.name("bare")) {
                (Some(m), _) => Some((m, true)),
                (None, Some(m)) => Some((m, false)),
                (None, None) => None,
            }
            .map(|(m, quoted)| AttributeValue {
                text: m.as_str(),
                start: offset + m.start(),
                end: offset + m.end(),
                quoted,
            });
            Some(Attribute { name, value })
        })
        .collect()
}

fn find<'a, 'b>(attrs: &'b [Attribute<'a>], name: &str) -> Option<&'b Attribute<'a>> {
    attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '`'))
}

/// Rewrite the value of attribute `name`, if present with a value.
fn rewrite_attribute<F>(
    splicer: &mut Splicer<'_>,
    attrs: &[Attribute<'_>],
    name: &str,
    kind: ResourceKind,
    convert: &F,
) where
    F: Fn(&str, ResourceKind) -> String + ?Sized,
{
    let Some(value) = find(attrs, name).and_then(|a| a.value.as_ref()) else {
        return;
    };

    let replacement = convert(value.text, kind);
    if !value.quoted && needs_quotes(&replacement) {
        let quoted = format!("\"{}\"", replacement.replace('"', "&quot;"));
        splicer.replace_value(value.start..value.end, &quoted);
    } else {
        splicer.replace_value(value.start..value.end, &replacement);
    }
}

/// Handle one element match.
fn rewrite_element<F>(splicer: &mut Splicer<'_>, caps: &Captures<'_>, convert: &F)
where
    F: Fn(&str, ResourceKind) -> String + ?Sized,
{
    if let Some(body) = caps.name("style_body") {
        let css = rewrite_stylesheet(body.as_str(), convert);
        if css.replaced > 0 {
            splicer.splice(body.range(), &css.text);
            splicer.add_replaced(css.replaced);
        }
        return;
    }

    if let Some(attrs) = caps.name("script_attrs") {
        let parsed = attributes(attrs.as_str(), attrs.start());
        rewrite_attribute(splicer, &parsed, "src", ResourceKind::Script, convert);
        return;
    }

    let (Some(tag), Some(attrs)) = (caps.name("tag"), caps.name("attrs")) else {
        // Comment.
        return;
    };
    let parsed = attributes(attrs.as_str(), attrs.start());

    match tag.as_str().to_ascii_lowercase().as_str() {
        "script" => rewrite_attribute(splicer, &parsed, "src", ResourceKind::Script, convert),
        "img" => rewrite_attribute(splicer, &parsed, "src", ResourceKind::Image, convert),
        "link" => {
            let is_stylesheet = find(&parsed, "rel")
                .and_then(|a| a.value.as_ref())
                .is_some_and(|rel| rel.text.trim().eq_ignore_ascii_case("stylesheet"));
            if is_stylesheet {
                rewrite_attribute(splicer, &parsed, "href", ResourceKind::Stylesheet, convert);
            }
        }
        _ => {}
    }
}

/// Rewrite the references in an HTML-like document.
///
/// - `<script src>` values are script references
/// - `<link rel="stylesheet" href>` values are stylesheet references
/// - `<img src>` values are image references
/// - `url(...)` values inside `<style>` blocks are image references
///
/// Attribute quoting is kept. An unquoted value whose replacement cannot
/// stand unquoted is wrapped in double quotes. References inside comments
/// and script bodies are ignored.
///
/// # Examples
///
/// ```
/// use local2cdn::document::rewrite_markup;
/// use local2cdn::ResourceKind;
///
/// let html = r#"<link rel="stylesheet" href="css/app.css"><img src='logo.png'>"#;
/// let out = rewrite_markup(html, &|url: &str, kind: ResourceKind| format!("//cdn/{kind}/{url}"));
/// assert_eq!(
///     out.text,
///     r#"<link rel="stylesheet" href="//cdn/css/css/app.css"><img src='//cdn/image/logo.png'>"#
/// );
/// assert_eq!(out.replaced, 2);
/// ```
pub fn rewrite_markup<F>(html: &str, convert: &F) -> Rewritten
where
    F: Fn(&str, ResourceKind) -> String + ?Sized,
{
    let mut splicer = Splicer::new(html);
    for caps in ELEMENT.captures_iter(html) {
        rewrite_element(&mut splicer, &caps, convert);
    }
    splicer.finish()
}
