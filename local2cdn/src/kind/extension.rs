//! Suffix extraction for explicit type markers and file extensions.
//!
//! A suffix is the run of word characters that ends a string, right after a
//! separator. With the default `.` separator that is a file extension
//! (`jquery.min.js` -> `js`); with a custom separator it is an explicit
//! type marker (`foo.tif:image` -> `image`).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Separator used when none is given: a file-extension dot.
pub const DEFAULT_SUFFIX_SEPARATOR: &str = ".";

/// ASCII word characters, matching what a type token can be made of.
const WORD_CHARS: &str = "[0-9A-Za-z_]+";

#[allow(clippy::expect_used)]
static DOT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    suffix_pattern(DEFAULT_SUFFIX_SEPARATOR).expect("dot suffix regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static TRAILING_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?.+$").expect("query regex is valid"));

#[allow(clippy::expect_used)]
static TRAILING_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#.+$").expect("fragment regex is valid"));

/// Build the `<separator>(word+)$` pattern for a separator.
fn suffix_pattern(separator: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("{}({WORD_CHARS})$", regex::escape(separator)))
        .case_insensitive(true)
        .build()
}

/// Extract the suffix that follows `separator` at the end of `text`.
///
/// The separator is matched literally. `None` or an empty separator means
/// a file-extension dot. The search is leftmost: the first occurrence of the
/// separator that is followed by nothing but word characters up to the end
/// of the string wins.
///
/// Returns `None` when `text` does not end in `<separator><word chars>`.
///
/// # Examples
///
/// ```
/// use local2cdn::kind::extract_suffix;
///
/// assert_eq!(extract_suffix("xxx/foo.tif:image", Some(":")), Some("image"));
/// assert_eq!(extract_suffix("foo.pic?123#$#image", Some("#$#")), Some("image"));
/// assert_eq!(extract_suffix("jquery.min.js", None), Some("js"));
/// assert_eq!(extract_suffix("jquery.min.js", Some(":")), None);
/// ```
#[must_use]
pub fn extract_suffix<'a>(text: &'a str, separator: Option<&str>) -> Option<&'a str> {
    let captures = match separator {
        Some(sep) if !sep.is_empty() && sep != DEFAULT_SUFFIX_SEPARATOR => {
            suffix_pattern(sep).ok()?.captures(text)?
        }
        _ => DOT_SUFFIX.captures(text)?,
    };
    captures.get(1).map(|m| m.as_str())
}

/// Strip a trailing query string and then a trailing fragment from a URL.
///
/// # Examples
///
/// ```
/// use local2cdn::kind::extension::strip_query_and_fragment;
///
/// assert_eq!(strip_query_and_fragment("app.js?v=3#top"), "app.js");
/// assert_eq!(strip_query_and_fragment("logo.png#x"), "logo.png");
/// assert_eq!(strip_query_and_fragment("plain.css"), "plain.css");
/// ```
#[must_use]
pub fn strip_query_and_fragment(url: &str) -> Cow<'_, str> {
    match TRAILING_QUERY.replace(url, "") {
        Cow::Borrowed(unchanged) => TRAILING_FRAGMENT.replace(unchanged, ""),
        Cow::Owned(stripped) => Cow::Owned(TRAILING_FRAGMENT.replace(&stripped, "").into_owned()),
    }
}

/// Extract the file extension of a URL, ignoring query and fragment noise.
///
/// # Examples
///
/// ```
/// use local2cdn::kind::extract_url_extension;
///
/// assert_eq!(extract_url_extension("jquery/2.0.3/jquery.min.js").as_deref(), Some("js"));
/// assert_eq!(extract_url_extension("/xxx/foo.pic?123#hash").as_deref(), Some("pic"));
/// assert_eq!(extract_url_extension("no-extension"), None);
/// ```
#[must_use]
pub fn extract_url_extension(url: &str) -> Option<String> {
    let cleaned = strip_query_and_fragment(url);
    extract_suffix(&cleaned, None).map(str::to_string)
}
