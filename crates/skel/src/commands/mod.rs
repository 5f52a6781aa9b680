//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod serve;
pub(crate) mod transform;
pub(crate) mod watch;

pub(crate) use generate::GenerateArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use transform::TransformArgs;
pub(crate) use watch::WatchArgs;

use std::io::Read;
use std::path::Path;

use skel_config::Config;
use skel_engine::{RenderStyle, Skeleton, SkeletonGenerator};
use skel_generate::GenerateError;
use skel_server::shape_options_from_config;

use crate::error::CliError;
use crate::output::Output;

/// Read the component from `file`, or from stdin when no file is given.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Local generator configured from the `[engine]` section.
fn local_generator(config: &Config, compact: bool) -> SkeletonGenerator {
    let style = if compact {
        RenderStyle::Compact
    } else {
        RenderStyle::Pretty
    };
    SkeletonGenerator::with_options(shape_options_from_config(&config.engine)).render_style(style)
}

/// Text to print for a skeleton: rendered markup, or the tree as JSON.
fn skeleton_text(skeleton: Skeleton, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(&skeleton.tree)?)
    } else {
        Ok(skeleton.markup)
    }
}

/// Print the details and suggestion attached to a generation failure.
fn report_generate_error(output: &Output, err: &GenerateError) {
    let response = err.to_response();
    if let Some(details) = &response.details {
        output.warning(&format!("Details: {details}"));
    }
    if let Some(suggestion) = &response.suggestion {
        output.warning(suggestion);
    }
}
