//! Build-config command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use vitrine_core::build::BuildConfig;

/// Show the effective asset-pipeline configuration
#[derive(Args, Debug)]
pub struct BuildConfigArgs {
    /// Path to the build configuration file
    #[arg(long, default_value = "vitrine.toml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the build-config command
pub fn execute(args: BuildConfigArgs) -> Result<()> {
    let exists = args.config.exists();
    let config = BuildConfig::load(&args.config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let source = if exists { "file" } else { "defaults" };
    println!("Build configuration ({}, from {source}):", args.config.display());
    println!("Mode:");
    println!("  prod: {}  deploy: {}", config.mode.is_prod, config.mode.is_deploy);
    println!(
        "  mapped: {}  watched: {}  stripped: {}",
        config.mode.is_mapped, config.mode.is_watched, config.mode.is_stripped
    );
    println!(
        "  php: {}  aspx: {}  partial: {}",
        config.mode.has_php, config.mode.has_aspx, config.mode.has_partial
    );
    println!("Files:");
    println!("  dev root: {}", config.files.root.dev);
    println!("  prod root: {}", config.files.root.prod);
    println!("  deploy root: {}", config.files.root.deploy);
    println!("  styles main: {}", config.files.styles.main);
    println!("  scripts main: {}", config.files.scripts.main);
    println!("  data: {}", config.files.data);
    println!("Icons:");
    println!("  font: {} ({})", config.icons.name, config.icons.formats.join(", "));
    println!("Server:");
    println!(
        "  port: {}  https: {}  livereload: {}  open: {}",
        config.server.port, config.server.https, config.server.livereload, config.server.open
    );
    Ok(())
}
