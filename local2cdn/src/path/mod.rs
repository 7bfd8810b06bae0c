//! Path handling for CDN targets.
//!
//! Targets are URL-ish strings rather than filesystem paths, so everything
//! here works on `&str`. The rules are deliberately small:
//!
//! - Backslashes are treated as forward slashes
//! - Runs of slashes collapse to one
//! - A leading `scheme://` (or a bare `//`) survives normalization
//!
//! # Examples
//!
//! ```
//! use local2cdn::path::normalize::{join_prefix, normalize_url};
//!
//! let target = normalize_url(&join_prefix("http://cdn.bootcss.com/", "/xxx/foo.png"));
//! assert_eq!(target, "http://cdn.bootcss.com/xxx/foo.png");
//! ```

pub mod normalize;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use normalize::{join_prefix, normalize, normalize_url};
