//! Document storage.
//!
//! The run driver reads sources and writes destinations through a
//! [`DocumentStore`], so tests and embedders can swap the filesystem out.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where documents are read from and written to.
pub trait DocumentStore {
    /// Whether a document exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the document at `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    fn read(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, replacing any existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// A [`DocumentStore`] over the local filesystem.
///
/// Relative paths are resolved against an optional base directory (the
/// process working directory otherwise). Parent directories are created on
/// write.
///
/// # Examples
///
/// ```
/// use local2cdn::operations::{DocumentStore, FsStore};
/// use std::path::Path;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = FsStore::with_base(dir.path());
///
/// store.write(Path::new("dist/css/site.css"), "a{}").unwrap();
/// assert!(store.exists(Path::new("dist/css/site.css")));
/// assert_eq!(store.read(Path::new("dist/css/site.css")).unwrap(), "a{}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    base: Option<PathBuf>,
}

impl FsStore {
    /// A store that resolves relative paths against the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that resolves relative paths against `base`.
    #[must_use]
    pub fn with_base(base: &Path) -> Self {
        Self {
            base: Some(base.to_path_buf()),
        }
    }

    /// The path actually touched for `path`.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match self.base {
            Some(ref base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        let resolved = self.resolve(path);
        fs::read_to_string(&resolved).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::PathNotFound { path: resolved }
            } else {
                Error::InvalidPath {
                    path: resolved,
                    reason: format!("cannot read document: {e}"),
                }
            }
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let resolved = self.resolve(path);
        if let Some(parent) = resolved.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&resolved, contents)?;
        log::debug!("wrote {} bytes to {}", contents.len(), resolved.display());
        Ok(())
    }
}
