//! CLI for traceprint — weighted device identifiers from environment signals.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "traceprint")]
#[command(about = "traceprint — weighted device identifiers from environment signals")]
#[command(version = traceprint_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the visitor identifier for this machine
    Id {
        /// Entropy-adjust the weight table from a fresh probe run first
        #[arg(long)]
        adjust: bool,

        /// Emit JSON (identifier, weights, per-signal stats)
        #[arg(long)]
        json: bool,
    },

    /// List built-in signals and their availability on this machine
    Signals {
        /// Probe each available signal and show its raw value (truncated)
        #[arg(long)]
        raw: bool,
    },

    /// Show or mutate the weight table
    Weights {
        /// Merge entries into the table before showing it, e.g. --set canvas=0.5
        #[arg(long, value_name = "NAME=WEIGHT")]
        set: Vec<String>,

        /// Entropy-adjust the table from a fresh probe run
        #[arg(long)]
        adjust: bool,

        /// Emit the table as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Id { adjust, json } => commands::id::run(adjust, json),
        Commands::Signals { raw } => commands::signals::run(raw),
        Commands::Weights { set, adjust, json } => commands::weights::run(&set, adjust, json),
    }
}
