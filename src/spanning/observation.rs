//! Host-facing encodings: observation tensor, state strings, action strings

use crate::error::{Error, Result};

use super::{
    graph::EdgeState,
    state::{AGENT, TreeState},
};

/// Number of planes in the one-hot observation tensor
pub const EDGE_STATE_PLANES: usize = 3;

/// Map a host player id onto the edge-status token space: `-1` renders as
/// unusable, `0` as available, `1` as connected.
///
/// # Errors
///
/// Returns error for any other id.
pub fn edge_state_for_player(player: i32) -> Result<EdgeState> {
    match player {
        -1 => Ok(EdgeState::Unusable),
        0 => Ok(EdgeState::Available),
        1 => Ok(EdgeState::Connected),
        other => Err(Error::InvalidPlayer { player: other }),
    }
}

fn check_player(player: i32) -> Result<()> {
    if player == AGENT {
        Ok(())
    } else {
        Err(Error::InvalidPlayer { player })
    }
}

impl TreeState {
    /// One-hot observation tensor of shape `(3, N, N)`, flattened
    /// plane-major: exactly one plane holds `1.0` for every `(row, column)`
    /// cell, selected by that cell's status.
    ///
    /// # Errors
    ///
    /// Returns error if `player` is not the agent.
    pub fn observation_tensor(&self, player: i32) -> Result<Vec<f64>> {
        check_player(player)?;

        let cells = self.graph().num_edges();
        let mut values = vec![0.0; EDGE_STATE_PLANES * cells];
        for cell in 0..cells {
            values[self.graph().status(cell).plane() * cells + cell] = 1.0;
        }
        Ok(values)
    }

    /// The status-matrix rendering (same as `Display`), gated on a valid player id.
    ///
    /// # Errors
    ///
    /// Returns error if `player` is not the agent.
    pub fn observation_string(&self, player: i32) -> Result<String> {
        check_player(player)?;
        Ok(self.to_string())
    }

    /// History of chosen edge indices, oldest first, joined by `", "`.
    ///
    /// # Errors
    ///
    /// Returns error if `player` is not the agent.
    pub fn information_state_string(&self, player: i32) -> Result<String> {
        check_player(player)?;
        let entries: Vec<String> = self.history().iter().map(usize::to_string).collect();
        Ok(entries.join(", "))
    }

    /// Render a chosen edge as `"<token>(<column>,<row>)"` where the token
    /// is the acting player's edge-status token.
    ///
    /// # Errors
    ///
    /// Returns error if the player id has no token mapping or the edge is
    /// out of range.
    pub fn action_to_string(&self, player: i32, edge: usize) -> Result<String> {
        let limit = self.graph().num_edges();
        if edge >= limit {
            return Err(Error::EdgeOutOfRange { edge, limit });
        }
        let token = edge_state_for_player(player)?.token();
        let (row, column) = self.graph().endpoints(edge);
        Ok(format!("{token}({column},{row})"))
    }
}
