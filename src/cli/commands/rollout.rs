//! Rollout command - play batches of episodes and report returns

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::output,
    descriptor::{GameParams, SpanningTreeGame},
    export::EpisodeCsvExporter,
    rollout::{
        PolicyKind, ProgressObserver, RolloutConfig, RolloutRunner, RolloutSummary,
        random_symmetric_weights,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Play episodes with a policy and report returns")]
pub struct RolloutArgs {
    /// Number of nodes in the graph
    #[arg(long, short = 'n', default_value_t = 5)]
    pub nodes: usize,

    /// Comma-separated edge weights (row-major, length nodes^2); random
    /// symmetric weights are generated when omitted
    #[arg(long, short = 'w')]
    pub weights: Option<String>,

    /// Number of episodes to play
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Policy used to pick edges (random, greedy)
    #[arg(long, short = 'p', default_value = "random")]
    pub policy: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export per-episode records to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the summary to a JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

pub fn execute(args: RolloutArgs) -> Result<()> {
    let kind: PolicyKind = args.policy.parse()?;
    let game = build_game(args.nodes, args.weights.as_deref(), args.seed)?;

    output::print_section("Rollout Configuration");
    output::print_kv("Nodes", &game.num_nodes().to_string());
    output::print_kv("Episodes", &args.episodes.to_string());
    output::print_kv("Policy", &args.policy);
    if let Some(seed) = args.seed {
        output::print_kv("Seed", &seed.to_string());
    }

    let mut policy = kind.build(args.seed);
    let mut runner = RolloutRunner::new(RolloutConfig {
        episodes: args.episodes,
        seed: args.seed,
    });
    if !args.quiet {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }

    let records = runner.run(&game, policy.as_mut())?;

    if let Some(summary) = RolloutSummary::from_records(&records) {
        output::print_section("Results");
        output::print_kv("Episodes", &summary.episodes.to_string());
        output::print_kv("Mean return", &format!("{:.4}", summary.mean_return));
        output::print_kv("Std dev", &format!("{:.4}", summary.std_dev_return));
        output::print_kv("Best return", &format!("{:.4}", summary.best_return));
        output::print_kv("Worst return", &format!("{:.4}", summary.worst_return));
        output::print_kv("Mean length", &format!("{:.2}", summary.mean_length));

        if let Some(path) = &args.summary {
            summary.save(path)?;
            println!("\nSummary written to: {}", path.display());
        }
    }

    if let Some(path) = &args.export {
        EpisodeCsvExporter::write(path, &records)?;
        println!("Episode records written to: {}", path.display());
    }

    Ok(())
}

/// Build the game from an explicit weight string, or generate a random
/// symmetric table when none is given.
pub(crate) fn build_game(
    nodes: usize,
    weights: Option<&str>,
    seed: Option<u64>,
) -> Result<SpanningTreeGame> {
    let game = match weights {
        Some(weights) => SpanningTreeGame::from_params(&GameParams {
            num_nodes: nodes,
            weights: weights.to_string(),
        })?,
        None => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::seed_from_u64(rand::random::<u64>()),
            };
            SpanningTreeGame::new(nodes, random_symmetric_weights(nodes, &mut rng))?
        }
    };
    Ok(game)
}
