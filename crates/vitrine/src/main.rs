//! vitrine - runtime configuration for the marketing-site front end
//!
//! A thin CLI over `vitrine-core`: feed it the environment a page would see
//! (user agent, host, breakpoint token, build flags) and it prints the
//! configuration snapshot the site would boot from.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    vitrine_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
