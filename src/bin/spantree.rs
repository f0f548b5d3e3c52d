//! spantree CLI - toolkit for the spanning-tree construction game
//!
//! This CLI provides a unified interface for:
//! - Playing batches of episodes with built-in policies
//! - Inspecting individual episodes move by move
//! - Exporting per-episode records for further analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spantree")]
#[command(version, about = "Toolkit for the spanning-tree construction game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes with a policy and report returns
    Rollout(spantree::cli::commands::rollout::RolloutArgs),

    /// Step through an episode move by move
    Inspect(spantree::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rollout(args) => spantree::cli::commands::rollout::execute(args),
        Commands::Inspect(args) => spantree::cli::commands::inspect::execute(args),
    }
}
