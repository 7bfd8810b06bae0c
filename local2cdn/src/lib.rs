#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # local2cdn
//!
//! A library for rewriting local asset references in HTML and CSS files to
//! CDN URLs.
//!
//! A task declares `maps` (local file name to CDN location) and file groups
//! (sources to rewrite into a destination). Each map entry compiles into a
//! rule with a resource kind, a matcher and a normalized target; every
//! `<script src>`, stylesheet `<link href>`, `<img src>` and CSS `url(...)`
//! reference is then rewritten by the first rule that applies to it.
//!
//! ## Core Types
//!
//! - [`Config`] and [`ConfigBuilder`]: Task configuration and its layering
//! - [`ResourceKind`]: The kind of asset a reference points to
//! - [`RuleSet`]: Compiled rules, in declaration order
//! - [`UrlConverter`]: The seam for custom URL conversion
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use local2cdn::config::{MapEntry, RawMaps, TaskDefaults};
//! use local2cdn::rules::MappingCompiler;
//! use local2cdn::{rewrite, ResourceKind};
//!
//! let maps = RawMaps::List(vec![MapEntry::new("jquery.js", "jquery/2.0.3/jquery.min.js")]);
//! let defaults = TaskDefaults {
//!     prefix: "http://cdn.bootcss.com/".into(),
//!     ..TaskDefaults::default()
//! };
//! let rules = MappingCompiler::compile(&maps, &defaults).rules;
//!
//! assert_eq!(
//!     rewrite("js/jquery.js", ResourceKind::Script, &rules),
//!     "http://cdn.bootcss.com/jquery/2.0.3/jquery.min.js"
//! );
//! // Wrong kind: left alone.
//! assert_eq!(rewrite("js/jquery.js", ResourceKind::Image, &rules), "js/jquery.js");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod kind;
pub mod logging;
pub mod operations;
pub mod path;
pub mod rewrite;
pub mod rules;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use document::{rewrite_document, DocumentType, Rewritten};
pub use error::{Error, Result};
pub use kind::ResourceKind;
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{run, DocumentStore, FsStore, Rewriter, RunReport, RunWarning};
pub use rewrite::{is_local_reference, rewrite, UrlConverter};
pub use rules::{compile_config, Compilation, MappingCompiler, RuleSet};
