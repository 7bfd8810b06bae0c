//! Slash normalization for CDN locations.
//!
//! This module provides the string-level path handling used when building
//! rule targets:
//! - Converting backslashes to forward slashes
//! - Collapsing runs of forward slashes
//! - Joining a CDN prefix onto a relative location
//! - Doing all of the above without destroying a `scheme://` separator

/// The separator that splits a protocol from the rest of a URL.
const PROTOCOL_SEPARATOR: &str = "//";

/// Normalize slashes in a path-like string.
///
/// Every backslash becomes a forward slash, then every run of consecutive
/// forward slashes is collapsed into one. An empty input yields an empty
/// string.
///
/// This does not know about protocols: `http://host` collapses to
/// `http:/host`. Use [`normalize_url`] when a protocol must survive.
///
/// # Examples
///
/// ```
/// use local2cdn::path::normalize::normalize;
///
/// assert_eq!(normalize(r"assets\\js//app.js"), "assets/js/app.js");
/// assert_eq!(normalize("///a///b"), "/a/b");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;

    for ch in path.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }

    out
}

/// Normalize a URL while keeping its protocol separator intact.
///
/// Everything before the first `//` is kept verbatim as the protocol part
/// (it may be empty for protocol-relative URLs). The remainder is
/// normalized with [`normalize`] and the two are rejoined with `//`.
/// A string with no `//` at all has no protocol to preserve and is
/// normalized as a whole.
///
/// # Examples
///
/// ```
/// use local2cdn::path::normalize::normalize_url;
///
/// assert_eq!(
///     normalize_url("http://cdn.bootcss.com///xxx/foo.png"),
///     "http://cdn.bootcss.com/xxx/foo.png"
/// );
/// assert_eq!(normalize_url("//cdn.a.com//lib.js"), "//cdn.a.com/lib.js");
/// assert_eq!(normalize_url("static\\\\img/a.png"), "static/img/a.png");
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> String {
    match url.split_once(PROTOCOL_SEPARATOR) {
        Some((protocol, rest)) => {
            format!("{protocol}{PROTOCOL_SEPARATOR}{}", normalize(rest))
        }
        None => normalize(url),
    }
}

/// Join a CDN prefix onto a location.
///
/// With a non-empty prefix the result is `prefix + "/" + location`;
/// the doubled slashes this may create are left for [`normalize_url`] to
/// collapse. With an empty prefix the location is returned verbatim.
///
/// # Examples
///
/// ```
/// use local2cdn::path::normalize::join_prefix;
///
/// assert_eq!(join_prefix("http://cdn.bootcss.com/", "/xxx/foo.png"),
///            "http://cdn.bootcss.com///xxx/foo.png");
/// assert_eq!(join_prefix("", "jquery/2.0.3/jquery.min.js"),
///            "jquery/2.0.3/jquery.min.js");
/// ```
#[must_use]
pub fn join_prefix(prefix: &str, location: &str) -> String {
    if prefix.is_empty() {
        location.to_string()
    } else {
        format!("{prefix}/{location}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize(r"a\b\c.js"), "a/b/c.js");
        assert_eq!(normalize(r"a\\b"), "a/b");
        assert_eq!(normalize(r"\/\/"), "/");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("a//b///c"), "a/b/c");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("plain"), "plain");
    }

    #[test]
    fn test_normalize_url_preserves_protocol() {
        assert_eq!(
            normalize_url("https://cdn.example.com//lib//app.js"),
            "https://cdn.example.com/lib/app.js"
        );
        assert_eq!(
            normalize_url("http://cdn.bootcss.com/"),
            "http://cdn.bootcss.com/"
        );
    }

    #[test]
    fn test_normalize_url_later_double_slashes_collapse() {
        // Only the first `//` is treated as the protocol separator.
        assert_eq!(
            normalize_url("http://host//a//b"),
            "http://host/a/b"
        );
    }

    #[test]
    fn test_normalize_url_protocol_relative() {
        assert_eq!(normalize_url("//cdn.a.com///x.js"), "//cdn.a.com/x.js");
    }

    #[test]
    fn test_normalize_url_without_protocol() {
        assert_eq!(
            normalize_url("jquery/2.0.3/jquery.min.js"),
            "jquery/2.0.3/jquery.min.js"
        );
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_join_prefix() {
        assert_eq!(join_prefix("//cdn.a.com", "x.js"), "//cdn.a.com/x.js");
        assert_eq!(join_prefix("", "/x.js"), "/x.js");
    }

    #[test]
    fn test_join_then_normalize() {
        let joined = join_prefix("http://cdn.bootcss.com/", "/xxx/foo.png");
        assert_eq!(normalize_url(&joined), "http://cdn.bootcss.com/xxx/foo.png");
    }
}
