//! `skel transform` command implementation.

use std::path::PathBuf;

use clap::Args;
use skel_config::Config;

use super::{local_generator, read_input, skeleton_text};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the transform command.
#[derive(Args)]
pub(crate) struct TransformArgs {
    /// Component markup file (default: read stdin).
    file: Option<PathBuf>,

    /// Print the skeleton on a single line.
    #[arg(long)]
    compact: bool,

    /// Print the placeholder tree as JSON instead of markup.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover skel.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TransformArgs {
    /// Execute the transform command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// or the markup is malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let source = read_input(self.file.as_deref())?;

        match local_generator(&config, self.compact).generate(&source)? {
            Some(skeleton) => output.result(&skeleton_text(skeleton, self.json)?)?,
            None => output.warning("Component has no content, no skeleton generated"),
        }
        Ok(())
    }
}
