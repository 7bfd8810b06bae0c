//! The run driver.
//!
//! A run compiles the configured `maps`, plans the file groups and rewrites
//! every planned source into its destination. Only configuration problems
//! abort a run; everything else is a warning and the run moves on.

use crate::config::schema::Config;
use crate::document::{rewrite_document, DocumentType, Rewritten};
use crate::error::Result;
use crate::kind::ResourceKind;
use crate::logging::Logger;
use crate::rewrite::{rewrite, UrlConverter};
use crate::rules::{compile_config, RuleSet};

use super::executor::{RunExecutor, RunReport};
use super::plan::RunPlan;
use super::store::DocumentStore;

/// Converts URL occurrences: a custom [`UrlConverter`] when one is set,
/// the compiled rules otherwise.
///
/// # Examples
///
/// ```
/// use local2cdn::config::{RawMaps, TaskDefaults};
/// use local2cdn::operations::Rewriter;
/// use local2cdn::rules::{MappingCompiler, RuleSet};
/// use local2cdn::ResourceKind;
///
/// let maps = RawMaps::object([("foo.png", "/xxx/foo.png")]);
/// let rules = MappingCompiler::compile(&maps, &TaskDefaults::default()).rules;
///
/// let plain = Rewriter::new(rules.clone());
/// assert_eq!(plain.convert("img/foo.png", ResourceKind::Image), "/xxx/foo.png");
///
/// let custom = Rewriter::new(rules).with_converter(Box::new(
///     |url: &str, _: ResourceKind, _: &RuleSet| url.to_uppercase(),
/// ));
/// assert_eq!(custom.convert("img/foo.png", ResourceKind::Image), "IMG/FOO.PNG");
/// ```
pub struct Rewriter {
    rules: RuleSet,
    converter: Option<Box<dyn UrlConverter>>,
}

impl Rewriter {
    /// Use the compiled rules for every occurrence.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            converter: None,
        }
    }

    /// Hand every occurrence to `converter` instead.
    #[must_use]
    pub fn with_converter(mut self, converter: Box<dyn UrlConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// The compiled rules.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether a custom converter is in charge.
    #[must_use]
    pub fn has_custom_converter(&self) -> bool {
        self.converter.is_some()
    }

    /// Convert one URL occurrence.
    #[must_use]
    pub fn convert(&self, url: &str, kind: ResourceKind) -> String {
        match self.converter {
            Some(ref converter) => converter.convert(url, kind, &self.rules),
            None => rewrite(url, kind, &self.rules),
        }
    }

    /// Rewrite a whole document.
    #[must_use]
    pub fn rewrite_document(&self, text: &str, document_type: DocumentType) -> Rewritten {
        rewrite_document(text, document_type, &|url: &str, kind: ResourceKind| {
            self.convert(url, kind)
        })
    }
}

impl std::fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rewriter")
            .field("rules", &self.rules.len())
            .field("custom_converter", &self.converter.is_some())
            .finish()
    }
}

/// Compile the configured `maps`, reporting dropped entries through
/// `logger`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidMaps`] when `maps` is missing.
pub fn compile_task(config: &Config, logger: &Logger) -> Result<RuleSet> {
    let compilation = compile_config(config)?;
    for dropped in &compilation.dropped {
        logger.warn(&dropped.to_string());
    }
    logger.info(&format!(
        "{} rule(s) compiled, {} entr{} dropped",
        compilation.rules.len(),
        compilation.dropped.len(),
        if compilation.dropped.len() == 1 { "y" } else { "ies" }
    ));
    Ok(compilation.rules)
}

/// Process every file group of `config`.
///
/// Compiles the rules, plans the groups against `store`, then rewrites
/// each planned source with `converter` (the compiled rules when `None`).
///
/// # Errors
///
/// Returns an error only for configuration problems; per-file problems are
/// reported as warnings in the [`RunReport`].
///
/// # Examples
///
/// ```
/// use local2cdn::config::{Config, FileGroup, RawMaps};
/// use local2cdn::operations::{run, FsStore};
/// use local2cdn::{LogLevel, Logger};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("site.css"), "a{background:url(img/foo.png)}").unwrap();
///
/// let config = Config {
///     maps: Some(RawMaps::object([("foo.png", "/xxx/foo.png")])),
///     prefix: Some("http://cdn.bootcss.com/".into()),
///     files: Some(vec![FileGroup::new("site.css", "dist/site.css")]),
///     ..Default::default()
/// };
/// let store = FsStore::with_base(dir.path());
/// let report = run(&config, &store, None, &Logger::new(LogLevel::Quiet)).unwrap();
///
/// assert_eq!(report.replaced(), 1);
/// assert_eq!(
///     std::fs::read_to_string(dir.path().join("dist/site.css")).unwrap(),
///     "a{background:url(http://cdn.bootcss.com/xxx/foo.png)}"
/// );
/// ```
pub fn run(
    config: &Config,
    store: &dyn DocumentStore,
    converter: Option<Box<dyn UrlConverter>>,
    logger: &Logger,
) -> Result<RunReport> {
    run_with_options(config, store, converter, logger, RunOptions::default())
}

/// How a run treats its destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Read and rewrite every source but write nothing.
    pub dry_run: bool,
}

/// [`run`] with explicit [`RunOptions`].
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_options(
    config: &Config,
    store: &dyn DocumentStore,
    converter: Option<Box<dyn UrlConverter>>,
    logger: &Logger,
    options: RunOptions,
) -> Result<RunReport> {
    let rules = compile_task(config, logger)?;
    let rewriter = match converter {
        Some(converter) => Rewriter::new(rules).with_converter(converter),
        None => Rewriter::new(rules),
    };

    let groups = config.files.as_deref().unwrap_or_default();
    let plan = RunPlan::build(groups, store);
    Ok(RunExecutor::new(store, *logger)
        .dry_run(options.dry_run)
        .execute(&plan, &rewriter))
}
