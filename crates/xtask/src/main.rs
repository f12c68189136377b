//! Development tasks for the combat engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Profiles, Simulate};

/// Development tasks for the combat engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the tactical combat AI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run AI-controlled turns on a scenario file
    Simulate(Simulate),

    /// Print the built-in archetype weight tables
    Profiles(Profiles),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Profiles(cmd) => cmd.execute(),
    }
}
