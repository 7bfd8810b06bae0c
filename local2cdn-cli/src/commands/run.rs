//! Run command implementation.
//!
//! Rewrites every file group of the configuration. Per-file problems are
//! reported as warnings and do not change the exit code.

use crate::error::CliError;
use crate::utils::{load_project, GlobalOptions};
use clap::Args;
use local2cdn::operations::{run_with_options, FsStore, RunOptions};
use std::io::Write;
use std::path::PathBuf;

/// Rewrite every configured file group.
#[derive(Args)]
pub struct RunCommand {
    /// Read and rewrite sources without writing any destination
    #[arg(long)]
    pub dry_run: bool,

    /// Resolve `src` and `dest` paths against this directory instead of the
    /// directory holding the configuration file
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

impl RunCommand {
    /// Execute the run command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and locate the project
        let (config, root) = load_project(global)?;
        let store = match self.base_dir.or(root) {
            Some(ref dir) => FsStore::with_base(dir),
            None => FsStore::new(),
        };

        // 2. Compile, plan and execute
        let report = run_with_options(
            &config,
            &store,
            None,
            &global.logger,
            RunOptions {
                dry_run: self.dry_run,
            },
        )?;

        if config.files.as_deref().unwrap_or_default().is_empty() {
            global.logger.warn("No file groups configured; nothing to do.");
            return Ok(());
        }

        // 3. Summarize
        if self.dry_run {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            for document in &report.written {
                writeln!(
                    handle,
                    "{}\t{}\t{}",
                    document.dest.display(),
                    document.document_type.label(),
                    document.replaced
                )?;
            }
        }

        global.logger.info(&format!(
            "{} file(s) {}, {} reference(s) rewritten, {} warning(s)",
            report.written.len(),
            if report.dry_run { "checked" } else { "written" },
            report.replaced(),
            report.warnings.len()
        ));

        Ok(())
    }
}
