//! Command-line runner for the flood solver.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

/// Shallow-water flood solver
#[derive(Parser)]
#[command(name = "flood-swe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Finite-volume shallow-water flood solver", long_about = None)]
struct Cli {
    /// More log output (-v per-iteration steps, -vv everything)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a built-in scenario
    Run(commands::run::RunArgs),
    /// Check a configuration file
    Validate(commands::validate::ValidateArgs),
}

/// Progress and alarms log at info, per-iteration steps at debug.
fn max_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so a summary on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_max_level(max_level(cli.verbose, cli.quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
