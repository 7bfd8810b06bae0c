//! Resolve command implementation.

use crate::error::CliError;
use crate::utils::{load_rules, GlobalOptions};
use clap::Args;
use local2cdn::{rewrite, ResourceKind};

/// Print what a single URL rewrites to.
#[derive(Args)]
pub struct ResolveCommand {
    /// URL as it appears in a document
    #[arg(value_name = "URL")]
    pub url: String,

    /// Kind of reference (js, css or image)
    #[arg(long, value_name = "KIND")]
    pub kind: ResourceKind,

    /// Exit with status 1 when no rule rewrites the URL
    #[arg(long)]
    pub strict: bool,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_, rules) = load_rules(global)?;

        let resolved = rewrite(&self.url, self.kind, &rules);
        println!("{resolved}");

        if self.strict && resolved == self.url {
            return Err(CliError::SemanticFailure(format!(
                "No {} rule rewrites '{}'",
                self.kind, self.url
            )));
        }

        Ok(())
    }
}
