//! CLI for tablesift
//!
//! Evaluates report page snapshots against their filters:
//! - apply: run the filters of a snapshot and list the visible rows
//! - replay: feed recorded UI events to a snapshot, one pass per event
//! - config: show the effective settings

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "tablesift")]
#[command(about = "tablesift - row filters for report tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a snapshot's filters and list the visible rows
    Apply(commands::apply::ApplyArgs),

    /// Replay recorded UI events against a snapshot
    Replay(commands::replay::ReplayArgs),

    /// Print the effective settings
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        output::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Apply(args) => {
            init_tracing(args.page.verbose);
            commands::apply::run(args)
        }
        Commands::Replay(args) => {
            init_tracing(args.page.verbose);
            commands::replay::run(args)
        }
        Commands::Config(args) => commands::config::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
