//! Spanning-tree construction game engine
//!
//! This crate provides:
//! - An incremental graph-state engine: edge status record, adjacency
//!   bookkeeping, and cycle detection gating which edges may be chosen
//! - A single-agent transition engine with apply/undo, rewards, and
//!   deterministic legal-action enumeration
//! - Host-facing encodings: state strings and a one-hot observation tensor
//! - A rollout toolkit with seedable policies, observers, and CSV export

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod ports;
pub mod rollout;
pub mod spanning;

pub use descriptor::{
    GAME_DESCRIPTOR, GameDescriptor, GameParams, ParameterSpec, SpanningTreeGame, parse_weights,
};
pub use error::{Error, Result};
pub use spanning::{
    AGENT, CycleScan, DisjointSet, EdgeState, GraphState, TERMINAL_PLAYER, TreeState,
    edge_state_for_player,
};
