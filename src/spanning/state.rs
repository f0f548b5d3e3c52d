//! Episode state and the transition engine built on the graph record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{
    cycles::CycleScan,
    graph::{EdgeState, GraphState},
};

/// Player id of the single agent.
pub const AGENT: i32 = 0;

/// Sentinel player id reported once the episode is over.
pub const TERMINAL_PLAYER: i32 = -4;

/// One episode of incremental spanning-tree construction.
///
/// The agent repeatedly picks one of the enumerated legal edges until the
/// tree is complete. Legality (no reuse, no cycles) is enforced by the
/// enumerator; [`TreeState::apply`] trusts its caller to submit only
/// enumerated edges and re-checks availability alone.
///
/// Cloning produces a fully independent episode: the status record,
/// adjacency lists, weights, and history are value-copied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeState {
    graph: GraphState,
    history: Vec<usize>,
    last_reward: f64,
    total_return: f64,
    forced_terminal: bool,
}

impl TreeState {
    /// Start a fresh episode over `num_nodes` nodes with the given
    /// row-major weight table of length `num_nodes * num_nodes`.
    ///
    /// # Errors
    ///
    /// Returns error if the node count is out of range or the weight table
    /// has the wrong length or non-finite entries.
    pub fn new(num_nodes: usize, weights: Vec<f64>) -> Result<Self> {
        Ok(Self::from_graph(GraphState::new(num_nodes, weights)?))
    }

    pub(crate) fn from_graph(graph: GraphState) -> Self {
        TreeState {
            graph,
            history: Vec::new(),
            last_reward: 0.0,
            total_return: 0.0,
            forced_terminal: false,
        }
    }

    /// Read-only view of the underlying graph record
    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    /// Edge indices chosen so far, oldest first
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Id of the player to act, or the terminal sentinel once the episode is over
    pub fn current_player(&self) -> i32 {
        if self.is_terminal() {
            TERMINAL_PLAYER
        } else {
            AGENT
        }
    }

    /// The episode ends once a full spanning tree is built (`N - 1`
    /// undirected edges, i.e. `2 * (N - 1)` connected matrix entries) or the
    /// host has forced termination. A cycle-free graph with `N - 1` edges
    /// over `N` nodes is automatically connected, so no reachability check
    /// is needed here.
    pub fn is_terminal(&self) -> bool {
        self.forced_terminal
            || self.graph.connected_entries() == 2 * (self.graph.num_nodes() - 1)
    }

    /// Force early termination on behalf of the host framework.
    pub fn force_terminal(&mut self) {
        self.forced_terminal = true;
    }

    /// Every available edge whose addition keeps the graph a forest, in
    /// ascending index order. Empty once the episode is terminal.
    ///
    /// Two engines given the same history produce identical sequences.
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        let mut scan = CycleScan::new(self.graph.num_nodes());
        let mut actions = Vec::new();
        for edge in 0..self.graph.num_edges() {
            if self.graph.status(edge) == EdgeState::Available {
                let (row, column) = self.graph.endpoints(edge);
                if !scan.creates_cycle(&self.graph, row, column) {
                    actions.push(edge);
                }
            }
        }
        actions
    }

    /// Would connecting the endpoints of `(row, column)` close a cycle?
    pub fn would_close_cycle(&self, row: usize, column: usize) -> bool {
        CycleScan::new(self.graph.num_nodes()).creates_cycle(&self.graph, row, column)
    }

    /// Apply a chosen edge: connect it, accrue the negative of its weight,
    /// and append it to the history.
    ///
    /// Acyclicity is the enumerator's contract and is not re-checked here.
    ///
    /// # Errors
    ///
    /// Returns error if the edge is out of range or not currently available.
    pub fn apply(&mut self, edge: usize) -> Result<()> {
        self.graph.connect(edge)?;
        self.last_reward = -self.graph.weight(edge);
        self.total_return += self.last_reward;
        self.history.push(edge);
        Ok(())
    }

    /// Undo the most recently applied edge on behalf of `player`, restoring
    /// the status record, adjacency lists, rewards, and history to their
    /// pre-apply values. Only the single most recent move may be undone.
    ///
    /// # Errors
    ///
    /// Returns error if `player` is not the agent, the history is empty, or
    /// `edge` is not the most recent move.
    pub fn undo(&mut self, player: i32, edge: usize) -> Result<()> {
        if player != AGENT {
            return Err(Error::InvalidPlayer { player });
        }
        let last = *self.history.last().ok_or(Error::NoMovesToUndo)?;
        if last != edge {
            return Err(Error::UndoMismatch { last, got: edge });
        }

        self.graph.disconnect(edge)?;
        self.history.pop();
        self.forced_terminal = false;
        // Refold the return from the remaining history instead of adding the
        // weight back, so apply-then-undo restores the exact bit pattern.
        self.total_return = self
            .history
            .iter()
            .map(|&previous| -self.graph.weight(previous))
            .sum();
        self.last_reward = match self.history.last() {
            Some(&previous) => -self.graph.weight(previous),
            None => 0.0,
        };
        Ok(())
    }

    /// Per-step reward vector: the single agent's reward for the last apply
    pub fn rewards(&self) -> Vec<f64> {
        vec![self.last_reward]
    }

    /// Cumulative return vector: the negative sum of all chosen weights
    pub fn returns(&self) -> Vec<f64> {
        vec![self.total_return]
    }
}

impl fmt::Display for TreeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.graph.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_node_state() -> TreeState {
        let weights = vec![
            0.0, 1.0, 5.0, 9.0, //
            1.0, 0.0, 3.0, 6.0, //
            5.0, 3.0, 0.0, 2.0, //
            9.0, 6.0, 2.0, 0.0,
        ];
        TreeState::new(4, weights).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = four_node_state();
        assert_eq!(state.current_player(), AGENT);
        assert_eq!(state.move_count(), 0);
        assert!(!state.is_terminal());
        assert_eq!(state.rewards(), vec![0.0]);
        assert_eq!(state.returns(), vec![0.0]);
    }

    #[test]
    fn test_apply_accrues_negative_weight() {
        let mut state = four_node_state();
        state.apply(1).unwrap();

        assert_eq!(state.rewards(), vec![-1.0]);
        assert_eq!(state.returns(), vec![-1.0]);
        assert_eq!(state.history(), &[1]);

        state.apply(6).unwrap();
        assert_eq!(state.rewards(), vec![-3.0]);
        assert_eq!(state.returns(), vec![-4.0]);
        assert_eq!(state.move_count(), 2);
    }

    #[test]
    fn test_apply_rejects_connected_mirror() {
        let mut state = four_node_state();
        state.apply(1).unwrap();
        assert!(matches!(
            state.apply(4),
            Err(Error::EdgeNotAvailable { edge: 4, .. })
        ));
    }

    #[test]
    fn test_legal_actions_initially_all_non_diagonal() {
        let state = four_node_state();
        assert_eq!(
            state.legal_actions(),
            vec![1, 2, 3, 4, 6, 7, 8, 9, 11, 12, 13, 14]
        );
    }

    #[test]
    fn test_legal_actions_exclude_cycle_closers() {
        let mut state = four_node_state();
        state.apply(1).unwrap(); // 0-1
        state.apply(6).unwrap(); // 1-2

        // Edge 2 = (0,2) and its mirror 8 would close the 0-1-2 triangle
        assert_eq!(state.legal_actions(), vec![3, 7, 11, 12, 13, 14]);
        assert!(state.would_close_cycle(0, 2));
        assert!(!state.would_close_cycle(2, 3));
    }

    #[test]
    fn test_terminal_after_spanning_tree() {
        let mut state = four_node_state();
        state.apply(1).unwrap();
        state.apply(6).unwrap();
        state.apply(11).unwrap();

        assert!(state.is_terminal());
        assert_eq!(state.current_player(), TERMINAL_PLAYER);
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.returns(), vec![-6.0]);
    }

    #[test]
    fn test_single_node_episode_is_trivially_terminal() {
        let state = TreeState::new(1, vec![0.0]).unwrap();
        assert!(state.is_terminal());
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.current_player(), TERMINAL_PLAYER);
    }

    #[test]
    fn test_force_terminal_sentinel() {
        let mut state = four_node_state();
        state.force_terminal();

        assert!(state.is_terminal());
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.current_player(), TERMINAL_PLAYER);
    }

    #[test]
    fn test_undo_restores_previous_configuration() {
        let mut state = four_node_state();
        state.apply(1).unwrap();
        let before = state.clone();

        state.apply(6).unwrap();
        state.undo(AGENT, 6).unwrap();

        assert_eq!(state, before);
        assert_eq!(state.rewards(), vec![-1.0]);
        assert_eq!(state.returns(), vec![-1.0]);
    }

    #[test]
    fn test_undo_clears_forced_termination() {
        let mut state = four_node_state();
        state.apply(1).unwrap();
        state.force_terminal();
        assert!(state.is_terminal());

        state.undo(AGENT, 1).unwrap();
        assert!(!state.is_terminal());
        assert_eq!(state.current_player(), AGENT);
    }

    #[test]
    fn test_undo_guards() {
        let mut state = four_node_state();
        assert!(matches!(state.undo(AGENT, 1), Err(Error::NoMovesToUndo)));

        state.apply(1).unwrap();
        assert!(matches!(
            state.undo(AGENT, 2),
            Err(Error::UndoMismatch { last: 1, got: 2 })
        ));
        assert!(matches!(
            state.undo(1, 1),
            Err(Error::InvalidPlayer { player: 1 })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = four_node_state();
        original.apply(1).unwrap();

        let mut copy = original.clone();
        copy.apply(6).unwrap();

        assert_eq!(original.move_count(), 1);
        assert_eq!(original.returns(), vec![-1.0]);
        assert_eq!(original.graph().neighbors(1), &[0]);
        assert_eq!(copy.move_count(), 2);
        assert_eq!(copy.graph().neighbors(1), &[0, 2]);

        original.undo(AGENT, 1).unwrap();
        assert_eq!(copy.move_count(), 2);
        assert_eq!(copy.returns(), vec![-4.0]);
    }
}
