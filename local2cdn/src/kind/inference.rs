//! Layered inference of a map entry's resource kind.
//!
//! A map entry only says "this local identifier becomes that CDN location".
//! Its kind is inferred from the strings themselves by an ordered list of
//! strategies, each tried only while the previous ones produced nothing
//! usable:
//!
//! 1. An explicit type marker on the CDN location (`foo.tif:image`)
//! 2. The CDN location's own file extension
//! 3. The local identifier's file extension
//!
//! The explicit marker goes first because it is authoritative, while dotted
//! extensions are ambiguous (a CDN path may contain dots that have nothing
//! to do with the resource kind).

use super::extension::{extract_suffix, extract_url_extension};
use super::ResourceKind;

/// Separator for explicit type markers when none is configured.
pub const DEFAULT_MARKER_SEPARATOR: &str = ":";

/// One inference strategy: `(local, cdn, separator) -> kind`.
pub type InferenceStrategy = fn(&str, &str, &str) -> Option<ResourceKind>;

/// The strategies [`infer_kind`] tries, in order.
pub const STRATEGIES: &[InferenceStrategy] = &[
    explicit_marker,
    cdn_extension,
    local_extension,
];

/// Classify the explicit `<separator><token>` marker on the CDN location.
#[must_use]
pub fn explicit_marker(_local: &str, cdn: &str, separator: &str) -> Option<ResourceKind> {
    let separator = if separator.is_empty() {
        DEFAULT_MARKER_SEPARATOR
    } else {
        separator
    };
    extract_suffix(cdn, Some(separator)).and_then(ResourceKind::classify)
}

/// Classify the CDN location's file extension.
#[must_use]
pub fn cdn_extension(_local: &str, cdn: &str, _separator: &str) -> Option<ResourceKind> {
    extract_url_extension(cdn).and_then(|ext| ResourceKind::classify(&ext))
}

/// Classify the local identifier's file extension.
#[must_use]
pub fn local_extension(local: &str, _cdn: &str, _separator: &str) -> Option<ResourceKind> {
    extract_url_extension(local).and_then(|ext| ResourceKind::classify(&ext))
}

/// Infer the resource kind of a map entry.
///
/// Runs [`STRATEGIES`] in order and returns the first kind any of them
/// produces, or `None` when the entry's kind cannot be determined. An empty
/// `separator` means the default `:`.
///
/// # Examples
///
/// ```
/// use local2cdn::kind::infer_kind;
/// use local2cdn::ResourceKind;
///
/// // The explicit marker beats both URLs' own extensions.
/// assert_eq!(infer_kind("foo.tif", "xxx/foo.tif:image", ":"), Some(ResourceKind::Image));
///
/// // No marker: fall through to the CDN extension.
/// assert_eq!(
///     infer_kind("jquery.js", "jquery/2.0.3/jquery.min.js", ":"),
///     Some(ResourceKind::Script)
/// );
///
/// assert_eq!(infer_kind("thing", "place", ":"), None);
/// ```
#[must_use]
pub fn infer_kind(local: &str, cdn: &str, separator: &str) -> Option<ResourceKind> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(local, cdn, separator))
}
