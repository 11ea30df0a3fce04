//! Command to validate a cfgtree options file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use cfgtree::options::OptionsValidator;
use cfgtree::LoadOptionsBuilder;
use clap::Args;
use std::path::PathBuf;

/// Validate a cfgtree options file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Options file to validate (defaults to the --options file)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Pick the file
        let path = self.file.or_else(|| global.options.clone()).ok_or_else(|| {
            CliError::InvalidArguments("No options file given (pass FILE or --options)".to_string())
        })?;

        // 2. Check file exists
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        // 3. Parse the file
        let layer = match LoadOptionsBuilder::read_options_file(&path) {
            Ok(layer) => layer,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::Config("Options file is invalid".to_string()));
            }
        };

        // 4. Validate the values
        match OptionsValidator::validate_layer(&layer) {
            Ok(()) => {
                println!("Options file is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::Config("Options validation failed".to_string()))
            }
        }
    }
}
