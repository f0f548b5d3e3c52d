//! Spanning-tree construction game implementation

pub mod cycles;
pub mod graph;
pub mod observation;
pub mod state;
pub mod validation;

pub use cycles::CycleScan;
pub use graph::{EdgeState, GraphState, MAX_NODES, MIN_NODES};
pub use observation::{EDGE_STATE_PLANES, edge_state_for_player};
pub use state::{AGENT, TERMINAL_PLAYER, TreeState};
pub use validation::DisjointSet;
