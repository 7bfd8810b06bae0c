//! Resource kinds and their classification.
//!
//! Every compiled rule and every URL occurrence in a document belongs to
//! exactly one [`ResourceKind`]. The kind decides which rule pool a URL is
//! matched against: a `<script src>` is only ever rewritten by script rules.
//!
//! Kinds are named by short tokens (`js`, `css`, `image`), the same tokens
//! users write as explicit type markers (`foo.tif:image`) and `srcType`
//! overrides.

pub mod extension;
pub mod inference;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub use extension::{extract_suffix, extract_url_extension};
pub use inference::{infer_kind, InferenceStrategy, STRATEGIES};

/// File extensions that classify as [`ResourceKind::Image`].
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "gif", "jpeg", "jpg", "ico", "bmp", "svg"];

/// The kind of resource a URL refers to.
///
/// # Examples
///
/// ```
/// use local2cdn::ResourceKind;
///
/// assert_eq!(ResourceKind::classify("js"), Some(ResourceKind::Script));
/// assert_eq!(ResourceKind::classify("svg"), Some(ResourceKind::Image));
/// assert_eq!(ResourceKind::classify("tif"), None);
/// assert_eq!(ResourceKind::Stylesheet.token(), "css");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// JavaScript, referenced by `<script src>`.
    Script,
    /// CSS, referenced by `<link rel="stylesheet" href>`.
    Stylesheet,
    /// Images, referenced by `<img src>` and CSS `url(...)`.
    Image,
}

impl ResourceKind {
    /// All kinds, in token order.
    pub const ALL: [Self; 3] = [Self::Script, Self::Stylesheet, Self::Image];

    /// The lower-case token naming this kind.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Stylesheet => "css",
            Self::Image => "image",
        }
    }

    /// Classify a raw extension or kind token.
    ///
    /// `js`, `css` and `image` map to their kinds directly; any entry of
    /// [`IMAGE_EXTENSIONS`] maps to [`ResourceKind::Image`]. Matching is
    /// exact, so callers lower-case user input first where appropriate.
    /// Anything else is unknown.
    #[must_use]
    pub fn classify(extension: &str) -> Option<Self> {
        match extension {
            "js" => Some(Self::Script),
            "css" => Some(Self::Stylesheet),
            "image" => Some(Self::Image),
            ext if IMAGE_EXTENSIONS.contains(&ext) => Some(Self::Image),
            _ => None,
        }
    }

    /// Every token that may appear as an explicit type marker.
    ///
    /// This is the kind tokens followed by the image extensions; a trailing
    /// `<separator><token>` on a CDN location is stripped from the final
    /// target.
    pub fn marker_tokens() -> impl Iterator<Item = &'static str> {
        Self::ALL
            .into_iter()
            .map(Self::token)
            .chain(IMAGE_EXTENSIONS)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    /// Parses a kind name for user-facing input (CLI flags, `srcType`).
    ///
    /// Accepts the classification tokens case-insensitively, plus the long
    /// names `script` and `stylesheet`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let kind = match lowered.as_str() {
            "script" => Some(Self::Script),
            "stylesheet" => Some(Self::Stylesheet),
            other => Self::classify(other),
        };
        kind.ok_or_else(|| Error::UnknownKind {
            value: s.to_string(),
        })
    }
}
