//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Parser, Subcommand};

mod build_config;
mod snapshot;

/// vitrine - runtime configuration for the marketing-site front end
#[derive(Parser, Debug)]
#[command(
    name = "vitrine",
    version,
    about = "Resolve and inspect the site's runtime configuration",
    long_about = "Resolves the configuration snapshot the site boots from: device, browser, \
                  host and breakpoint detection plus deployment path resolution"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the configuration snapshot for a given environment
    Snapshot(snapshot::SnapshotArgs),

    /// Show the effective asset-pipeline configuration
    BuildConfig(build_config::BuildConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Snapshot(args) => snapshot::execute(args),
            Commands::BuildConfig(args) => build_config::execute(args),
        }
    }
}
