//! Inspect command - walk a move sequence through a single episode

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output,
    descriptor::GAME_DESCRIPTOR,
    spanning::AGENT,
};

use super::rollout::build_game;

#[derive(Parser, Debug)]
#[command(about = "Step through an episode move by move")]
pub struct InspectArgs {
    /// Number of nodes in the graph
    #[arg(long, short = 'n', default_value_t = 4)]
    pub nodes: usize,

    /// Comma-separated edge weights (row-major, length nodes^2); random
    /// symmetric weights are generated when omitted
    #[arg(long, short = 'w')]
    pub weights: Option<String>,

    /// Comma-separated edge indices to apply in order
    #[arg(long, short = 'm')]
    pub moves: Option<String>,

    /// Random seed used when generating weights
    #[arg(long)]
    pub seed: Option<u64>,

    /// Undo the final move afterwards and show the restored state
    #[arg(long)]
    pub undo_last: bool,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let game = build_game(args.nodes, args.weights.as_deref(), args.seed)?;
    let mut state = game.new_initial_state();

    output::print_section(GAME_DESCRIPTOR.long_name);
    output::print_kv("Nodes", &game.num_nodes().to_string());
    output::print_kv("Distinct actions", &game.num_distinct_actions().to_string());
    output::print_kv(
        "Tensor shape",
        &format!("{:?}", game.observation_tensor_shape()),
    );

    output::print_subsection("Initial state");
    println!("{state}");
    println!("Legal actions: {:?}", state.legal_actions());

    let moves = parse_moves(args.moves.as_deref())?;
    for edge in &moves {
        let rendered = state.action_to_string(AGENT, *edge)?;
        state.apply(*edge)?;

        output::print_subsection(&format!("Applied {rendered}"));
        println!("{state}");
        output::print_kv("Reward", &format!("{:.4}", state.rewards()[0]));
        output::print_kv("Return", &format!("{:.4}", state.returns()[0]));
        println!("Legal actions: {:?}", state.legal_actions());
    }

    output::print_subsection("Episode status");
    output::print_kv("Moves played", &state.move_count().to_string());
    output::print_kv("Terminal", &state.is_terminal().to_string());
    output::print_kv(
        "History",
        &state.information_state_string(AGENT)?,
    );

    if args.undo_last {
        if let Some(&last) = state.history().last() {
            state.undo(AGENT, last)?;
            output::print_subsection(&format!("After undoing edge {last}"));
            println!("{state}");
            println!("Legal actions: {:?}", state.legal_actions());
        } else {
            println!("\nNothing to undo.");
        }
    }

    Ok(())
}

fn parse_moves(moves: Option<&str>) -> Result<Vec<usize>> {
    let Some(moves) = moves else {
        return Ok(Vec::new());
    };

    moves
        .split(',')
        .map(|token| {
            let trimmed = token.trim();
            trimmed
                .parse::<usize>()
                .with_context(|| format!("invalid move token '{trimmed}'"))
        })
        .collect()
}
