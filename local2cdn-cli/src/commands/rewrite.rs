//! Rewrite command implementation.
//!
//! Rewrites one document outside of any file group, writing the result to
//! a file or to stdout.

use crate::error::CliError;
use crate::utils::{load_rules, GlobalOptions};
use clap::Args;
use local2cdn::operations::{DocumentStore, FsStore, Rewriter};
use local2cdn::DocumentType;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Rewrite a single document.
#[derive(Args)]
pub struct RewriteCommand {
    /// Document to rewrite (`-` reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Treat the input as a stylesheet regardless of its extension
    #[arg(long)]
    pub css: bool,
}

impl RewriteCommand {
    /// Execute the rewrite command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_, rules) = load_rules(global)?;
        let store = FsStore::new();

        let from_stdin = self.input == Path::new("-");
        let text = if from_stdin {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            if !store.exists(&self.input) {
                return Err(CliError::InvalidArguments(format!(
                    "File not found: {}",
                    self.input.display()
                )));
            }
            store.read(&self.input)?
        };

        let document_type = if self.css {
            DocumentType::Stylesheet
        } else if from_stdin {
            DocumentType::Markup
        } else {
            DocumentType::from_path(&self.input)
        };

        let rewritten = Rewriter::new(rules).rewrite_document(&text, document_type);
        global.logger.debug(&format!(
            "{} reference(s) rewritten",
            rewritten.replaced
        ));

        match self.output {
            Some(ref output) => {
                store.write(output, &rewritten.text)?;
                global.logger.ok(&format!(
                    "Wrote {} file: \"{}\"",
                    document_type.label(),
                    output.display()
                ));
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(rewritten.text.as_bytes())?;
                handle.flush()?;
            }
        }

        Ok(())
    }
}
