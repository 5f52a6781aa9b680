//! skel CLI - Skeleton loader generator.
//!
//! Provides commands for:
//! - `transform`: Convert component markup with the local rule engine
//! - `generate`: Convert a component with the remote generation service
//! - `watch`: Re-run a conversion whenever the input file changes
//! - `serve`: Start the HTTP API

mod commands;
mod debouncer;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateArgs, ServeArgs, TransformArgs, WatchArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// skel - Skeleton loader generator.
#[derive(Parser)]
#[command(name = "skel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert component markup into a skeleton with the local engine.
    Transform(TransformArgs),
    /// Convert a component with the remote generation service.
    Generate(GenerateArgs),
    /// Watch a component file and regenerate on every change.
    Watch(WatchArgs),
    /// Start the HTTP API server.
    Serve(ServeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Transform(args) => args.execute(),
        Commands::Generate(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(error::CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
