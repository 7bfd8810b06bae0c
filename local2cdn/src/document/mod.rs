//! Enumeration and rewriting of URL references inside documents.
//!
//! Two document types are understood:
//! - Stylesheets, where every `url(...)` is an image reference
//! - Markup (HTML, EJS and friends), where `<script src>`, stylesheet
//!   `<link href>`, `<img src>` and `<style>` blocks carry references
//!
//! Rewriting splices replacement values into the original text. Bytes
//! outside the rewritten values are copied through untouched.

pub mod css;
pub mod markup;

use std::ops::Range;
use std::path::Path;

use crate::kind::ResourceKind;

pub use css::rewrite_stylesheet;
pub use markup::rewrite_markup;

/// How a document is scanned for references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// A CSS file.
    Stylesheet,
    /// Anything else, treated as HTML-like markup.
    Markup,
}

impl DocumentType {
    /// Pick the document type from a source path.
    ///
    /// A `.css` extension in any letter case is a stylesheet; everything
    /// else is markup.
    ///
    /// # Examples
    ///
    /// ```
    /// use local2cdn::document::DocumentType;
    /// use std::path::Path;
    ///
    /// assert_eq!(DocumentType::from_path(Path::new("src/site.CSS")), DocumentType::Stylesheet);
    /// assert_eq!(DocumentType::from_path(Path::new("views/index.ejs")), DocumentType::Markup);
    /// assert_eq!(DocumentType::from_path(Path::new("README")), DocumentType::Markup);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("css") => Self::Stylesheet,
            _ => Self::Markup,
        }
    }

    /// Short name used in status messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stylesheet => "CSS",
            Self::Markup => "HTML",
        }
    }
}

/// A rewritten document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// The full output text.
    pub text: String,
    /// How many references received a different value.
    pub replaced: usize,
}

/// Rewrite every reference in `text` according to its document type.
///
/// `convert` receives each reference value and its kind and returns the
/// replacement; returning the input leaves the reference unchanged.
///
/// # Examples
///
/// ```
/// use local2cdn::document::{rewrite_document, DocumentType};
/// use local2cdn::ResourceKind;
///
/// let out = rewrite_document(
///     "a { background: url(img/a.png) }",
///     DocumentType::Stylesheet,
///     &|url: &str, kind: ResourceKind| {
///         assert_eq!(kind, ResourceKind::Image);
///         format!("//cdn/{url}")
///     },
/// );
/// assert_eq!(out.text, "a { background: url(//cdn/img/a.png) }");
/// assert_eq!(out.replaced, 1);
/// ```
pub fn rewrite_document<F>(text: &str, document_type: DocumentType, convert: &F) -> Rewritten
where
    F: Fn(&str, ResourceKind) -> String + ?Sized,
{
    match document_type {
        DocumentType::Stylesheet => rewrite_stylesheet(text, convert),
        DocumentType::Markup => rewrite_markup(text, convert),
    }
}

/// Builds output text by replacing ranges of a source, front to back.
struct Splicer<'a> {
    source: &'a str,
    out: String,
    cursor: usize,
    replaced: usize,
}

impl<'a> Splicer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            out: String::with_capacity(source.len()),
            cursor: 0,
            replaced: 0,
        }
    }

    /// Replace `range` with `replacement`. Ranges must not overlap and must
    /// arrive in order.
    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.out.push_str(&self.source[self.cursor..range.start]);
        self.out.push_str(replacement);
        self.cursor = range.end;
    }

    /// Replace a single reference value, counting it if it changed.
    fn replace_value(&mut self, range: Range<usize>, replacement: &str) {
        if self.source[range.clone()] != *replacement {
            self.replaced += 1;
        }
        self.splice(range, replacement);
    }

    /// Record references replaced by a nested rewrite.
    fn add_replaced(&mut self, count: usize) {
        self.replaced += count;
    }

    fn finish(mut self) -> Rewritten {
        self.out.push_str(&self.source[self.cursor..]);
        Rewritten {
            text: self.out,
            replaced: self.replaced,
        }
    }
}
