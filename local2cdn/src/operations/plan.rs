//! Planning of a run.
//!
//! A [`RunPlan`] decides, for every file group, which source will be
//! rewritten into its destination, without reading or writing anything.
//! Source problems become [`RunWarning`]s attached to the group they belong
//! to, so they can be reported in order alongside the group's result.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::FileGroup;
use crate::document::DocumentType;

use super::store::DocumentStore;

/// A recoverable problem encountered during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunWarning {
    /// A declared source does not exist.
    SourceMissing {
        /// The missing source.
        path: PathBuf,
    },
    /// None of a group's sources exist; the destination is skipped.
    NoValidSource {
        /// The skipped destination.
        dest: PathBuf,
    },
    /// Several sources exist for one destination; only the first is used.
    MultipleSources {
        /// The destination.
        dest: PathBuf,
        /// The source that will be used.
        used: PathBuf,
        /// How many existing sources there were.
        count: usize,
    },
    /// Reading, rewriting or writing one document failed.
    DocumentFailed {
        /// The destination that was not produced.
        dest: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceMissing { path } => {
                write!(f, "Source file \"{}\" not found.", path.display())
            }
            Self::NoValidSource { dest } => {
                write!(f, "No valid source file found for \"{}\".", dest.display())
            }
            Self::MultipleSources { dest, used, count } => write!(
                f,
                "Multiple source files ({count}) supplied for single destination \"{}\"; only the first (\"{}\") will be used.",
                dest.display(),
                used.display()
            ),
            Self::DocumentFailed { dest, reason } => {
                write!(f, "Failed to produce \"{}\": {reason}", dest.display())
            }
        }
    }
}

/// The planned handling of one file group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGroup {
    /// The source to rewrite, or `None` when the group is skipped.
    pub source: Option<PathBuf>,
    /// The destination to write.
    pub dest: PathBuf,
    /// Warnings raised while resolving the sources.
    pub warnings: Vec<RunWarning>,
}

impl PlannedGroup {
    /// How the source will be scanned, if there is one.
    #[must_use]
    pub fn document_type(&self) -> Option<DocumentType> {
        self.source.as_deref().map(DocumentType::from_path)
    }
}

/// The planned handling of every file group, in declaration order.
///
/// # Examples
///
/// ```
/// use local2cdn::config::FileGroup;
/// use local2cdn::operations::{FsStore, RunPlan, RunWarning};
/// use std::path::PathBuf;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a.html"), "").unwrap();
///
/// let groups = vec![
///     FileGroup::new("a.html", "dist/a.html"),
///     FileGroup::new("missing.css", "dist/b.css"),
/// ];
/// let plan = RunPlan::build(&groups, &FsStore::with_base(dir.path()));
///
/// assert_eq!(plan.groups[0].source, Some(PathBuf::from("a.html")));
/// assert_eq!(plan.groups[1].source, None);
/// assert_eq!(plan.warnings().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunPlan {
    /// One entry per file group.
    pub groups: Vec<PlannedGroup>,
}

impl RunPlan {
    /// Resolve the sources of every group against `store`.
    pub fn build(groups: &[FileGroup], store: &dyn DocumentStore) -> Self {
        Self {
            groups: groups.iter().map(|g| Self::plan_group(g, store)).collect(),
        }
    }

    fn plan_group(group: &FileGroup, store: &dyn DocumentStore) -> PlannedGroup {
        let mut warnings = Vec::new();

        let existing: Vec<&Path> = group
            .src
            .paths()
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| {
                let found = store.exists(path);
                if !found {
                    warnings.push(RunWarning::SourceMissing {
                        path: path.to_path_buf(),
                    });
                }
                found
            })
            .collect();

        let source = match existing.as_slice() {
            [] => {
                warnings.push(RunWarning::NoValidSource {
                    dest: group.dest.clone(),
                });
                None
            }
            [only] => Some(only.to_path_buf()),
            [first, ..] => {
                warnings.push(RunWarning::MultipleSources {
                    dest: group.dest.clone(),
                    used: first.to_path_buf(),
                    count: existing.len(),
                });
                Some(first.to_path_buf())
            }
        };

        PlannedGroup {
            source,
            dest: group.dest.clone(),
            warnings,
        }
    }

    /// Every warning in the plan, in group order.
    pub fn warnings(&self) -> impl Iterator<Item = &RunWarning> {
        self.groups.iter().flat_map(|g| g.warnings.iter())
    }

    /// Groups that will produce a destination.
    pub fn actionable(&self) -> impl Iterator<Item = &PlannedGroup> {
        self.groups.iter().filter(|g| g.source.is_some())
    }
}
