//! flexdocs CLI - documentation site metadata builder.
//!
//! Provides commands for:
//! - `build`: Write the site manifest, sitemap and robots.txt
//! - `env`: Show the resolved deployment environment
//! - `outline`: Show anchor ids and outlines of one Markdown file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, EnvArgs, OutlineArgs};
use output::Output;

/// flexdocs - documentation site metadata builder.
#[derive(Parser)]
#[command(name = "flexdocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build site metadata for the resolved environment.
    Build(BuildArgs),
    /// Show the resolved deployment environment.
    Env(EnvArgs),
    /// Show anchor ids and outlines of a Markdown file.
    Outline(OutlineArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
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
        Commands::Build(args) => args.execute(),
        Commands::Env(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
