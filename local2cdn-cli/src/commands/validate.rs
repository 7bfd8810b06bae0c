//! Command to validate a local2cdn configuration file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use local2cdn::config::{Config, ConfigValidator};
use local2cdn::rules::compile_config;
use std::path::PathBuf;

/// Validate a local2cdn configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check file exists
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        // 2. Parse the file
        let contents = std::fs::read_to_string(&self.config_path)?;
        let config: Config = match serde_yaml::from_str(&contents) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        // 3. Validate the configuration
        if let Err(e) = ConfigValidator::validate(&config) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(
                "Configuration validation failed".to_string(),
            ));
        }

        // 4. Compile the maps, if any; dropped entries are warnings only
        if config.maps.is_some() {
            let compilation = compile_config(&config)?;
            for dropped in &compilation.dropped {
                global.logger.warn(&dropped.to_string());
            }
        } else {
            global
                .logger
                .warn("No maps defined; `run`, `rewrite` and `resolve` will refuse this file.");
        }

        println!("Configuration is valid");
        Ok(())
    }
}
