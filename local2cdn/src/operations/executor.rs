//! Execution of a run plan.
//!
//! The executor reads each planned source, rewrites it and writes the
//! destination. Failures on one document are recorded as warnings and the
//! remaining groups still run.

use std::path::PathBuf;

use crate::document::DocumentType;
use crate::error::Result;
use crate::logging::Logger;

use super::plan::{PlannedGroup, RunPlan, RunWarning};
use super::run::Rewriter;
use super::store::DocumentStore;

/// One destination produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// The source that was read.
    pub source: PathBuf,
    /// The destination that was written.
    pub dest: PathBuf,
    /// How the source was scanned.
    pub document_type: DocumentType,
    /// Number of references that received a new value.
    pub replaced: usize,
}

/// The outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Destinations written (or, in a dry run, that would be written).
    pub written: Vec<DocumentReport>,
    /// Every warning, in the order it was raised.
    pub warnings: Vec<RunWarning>,
    /// Whether destinations were left untouched.
    pub dry_run: bool,
}

impl RunReport {
    /// Total references replaced across all documents.
    #[must_use]
    pub fn replaced(&self) -> usize {
        self.written.iter().map(|d| d.replaced).sum()
    }

    /// Whether the run raised no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Executes a [`RunPlan`].
///
/// In dry-run mode sources are read and rewritten but nothing is written.
pub struct RunExecutor<'a> {
    store: &'a dyn DocumentStore,
    logger: Logger,
    dry_run: bool,
}

impl std::fmt::Debug for RunExecutor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunExecutor")
            .field("logger", &self.logger)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> RunExecutor<'a> {
    /// Create an executor writing through `store`.
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore, logger: Logger) -> Self {
        Self {
            store,
            logger,
            dry_run: false,
        }
    }

    /// Set dry-run mode.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every planned group in order.
    pub fn execute(&self, plan: &RunPlan, rewriter: &Rewriter) -> RunReport {
        let mut report = RunReport {
            dry_run: self.dry_run,
            ..RunReport::default()
        };

        for group in &plan.groups {
            for warning in &group.warnings {
                self.logger.warn(&warning.to_string());
                report.warnings.push(warning.clone());
            }

            match self.execute_group(group, rewriter) {
                Ok(Some(document)) => report.written.push(document),
                Ok(None) => {}
                Err(e) => {
                    let warning = RunWarning::DocumentFailed {
                        dest: group.dest.clone(),
                        reason: e.to_string(),
                    };
                    self.logger.warn(&warning.to_string());
                    report.warnings.push(warning);
                }
            }
        }

        report
    }

    fn execute_group(
        &self,
        group: &PlannedGroup,
        rewriter: &Rewriter,
    ) -> Result<Option<DocumentReport>> {
        let Some(ref source) = group.source else {
            return Ok(None);
        };
        let document_type = DocumentType::from_path(source);

        let original = self.store.read(source)?;
        let rewritten = rewriter.rewrite_document(&original, document_type);
        self.logger.debug(&format!(
            "{}: {} reference(s) rewritten",
            source.display(),
            rewritten.replaced
        ));

        if self.dry_run {
            self.logger.info(&format!(
                "Would write {} file: \"{}\"",
                document_type.label(),
                group.dest.display()
            ));
        } else {
            self.store.write(&group.dest, &rewritten.text)?;
            self.logger.ok(&format!(
                "Wrote {} file: \"{}\"",
                document_type.label(),
                group.dest.display()
            ));
        }

        Ok(Some(DocumentReport {
            source: source.clone(),
            dest: group.dest.clone(),
            document_type,
            replaced: rewritten.replaced,
        }))
    }
}
