//! `skel generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use skel_config::{CliSettings, Config};
use skel_generate::{GenerateRequest, GeneratorClient};

use super::{read_input, report_generate_error};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Component source file (default: read stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover skel.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model to generate with (overrides config).
    #[arg(long)]
    model: Option<String>,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// or generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            model: self.model,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source = read_input(self.file.as_deref())?;

        let client = GeneratorClient::from_config(&config.generator);
        output.info(&format!("Generating with {}", client.model()));

        let response = client
            .generate(&GenerateRequest::new(source))
            .inspect_err(|e| report_generate_error(&output, e))?;

        output.result(&response.skeleton_code)?;
        output.success(&format!(
            "Generated {} skeleton with {}",
            response.framework, response.generated_with
        ));
        Ok(())
    }
}
