//! Edge status record, weight table, and adjacency bookkeeping
//!
//! [`GraphState`] owns the symmetric N×N status matrix, the per-edge weight
//! table, and the per-node adjacency lists derived from connected edges.
//! All mutation goes through [`GraphState::connect`] and
//! [`GraphState::disconnect`]; everything else is a read-only view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest accepted node count.
pub const MIN_NODES: usize = 1;
/// Largest accepted node count.
pub const MAX_NODES: usize = 100;

/// Status of a single edge slot in the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeState {
    /// Never selectable (the diagonal self-edges)
    Unusable,
    /// May still be chosen
    Available,
    /// Part of the tree under construction
    Connected,
}

impl EdgeState {
    /// Plane index of this status in the one-hot observation tensor
    pub fn plane(self) -> usize {
        match self {
            EdgeState::Unusable => 0,
            EdgeState::Available => 1,
            EdgeState::Connected => 2,
        }
    }

    /// Matrix-rendering token: connected edges print as `1`, everything else as `0`
    pub fn token(self) -> char {
        match self {
            EdgeState::Connected => '1',
            _ => '0',
        }
    }

    /// Lowercase name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            EdgeState::Unusable => "unusable",
            EdgeState::Available => "available",
            EdgeState::Connected => "connected",
        }
    }
}

/// The evolving graph record of one episode
///
/// Edges are addressed by flattened row-major index `row * N + column`.
/// The status of an edge and its mirror are always equal; the adjacency
/// lists contain exactly the endpoints of connected edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    num_nodes: usize,
    statuses: Vec<EdgeState>,
    weights: Vec<f64>,
    neighbors: Vec<Vec<usize>>,
}

impl GraphState {
    /// Check construction parameters without building a state.
    ///
    /// # Errors
    ///
    /// Returns error if the node count is out of range or the weight table
    /// does not hold exactly `N * N` finite entries.
    pub fn validate(num_nodes: usize, weights: &[f64]) -> Result<()> {
        if !(MIN_NODES..=MAX_NODES).contains(&num_nodes) {
            return Err(Error::InvalidNodeCount {
                nodes: num_nodes,
                min: MIN_NODES,
                max: MAX_NODES,
            });
        }

        let expected = num_nodes * num_nodes;
        if weights.len() != expected {
            return Err(Error::WeightCountMismatch {
                nodes: num_nodes,
                expected,
                got: weights.len(),
            });
        }

        if let Some(position) = weights.iter().position(|w| !w.is_finite()) {
            return Err(Error::NonFiniteWeight {
                value: weights[position],
                position,
            });
        }

        Ok(())
    }

    /// Create a fresh record: every non-diagonal edge available, adjacency empty.
    ///
    /// # Errors
    ///
    /// Returns error if the parameters fail [`GraphState::validate`].
    pub fn new(num_nodes: usize, weights: Vec<f64>) -> Result<Self> {
        Self::validate(num_nodes, &weights)?;
        Ok(Self::new_unchecked(num_nodes, weights))
    }

    /// Construct from parameters already validated by the caller.
    pub(crate) fn new_unchecked(num_nodes: usize, weights: Vec<f64>) -> Self {
        debug_assert!(Self::validate(num_nodes, &weights).is_ok());

        let mut statuses = vec![EdgeState::Available; num_nodes * num_nodes];
        for node in 0..num_nodes {
            statuses[node * num_nodes + node] = EdgeState::Unusable;
        }

        GraphState {
            num_nodes,
            statuses,
            weights,
            neighbors: vec![Vec::new(); num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of edge slots in the matrix (`N * N`, mirrors and diagonal included)
    pub fn num_edges(&self) -> usize {
        self.statuses.len()
    }

    /// Decompose a flattened edge index into its `(row, column)` pair
    pub fn endpoints(&self, edge: usize) -> (usize, usize) {
        (edge / self.num_nodes, edge % self.num_nodes)
    }

    /// Flattened index of the edge `(row, column)`
    pub fn edge_index(&self, row: usize, column: usize) -> usize {
        row * self.num_nodes + column
    }

    /// Status of an edge by flattened index
    pub fn status(&self, edge: usize) -> EdgeState {
        self.statuses[edge]
    }

    /// Status of an edge by `(row, column)` pair
    pub fn status_at(&self, row: usize, column: usize) -> EdgeState {
        self.statuses[self.edge_index(row, column)]
    }

    /// Weight of an edge by flattened index
    pub fn weight(&self, edge: usize) -> f64 {
        self.weights[edge]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Nodes reachable from `node` over a single connected edge, in connection order
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    /// Count of connected entries over the whole matrix (mirrors counted separately)
    pub fn connected_entries(&self) -> usize {
        self.statuses
            .iter()
            .filter(|&&status| status == EdgeState::Connected)
            .count()
    }

    /// Mark an available edge and its mirror as connected and record the
    /// endpoints in each other's adjacency list.
    ///
    /// # Errors
    ///
    /// Returns error if the edge index is out of range or the edge is not
    /// currently available. The diagonal is unusable, so a self-edge can
    /// never pass this check.
    pub(crate) fn connect(&mut self, edge: usize) -> Result<()> {
        if edge >= self.statuses.len() {
            return Err(Error::EdgeOutOfRange {
                edge,
                limit: self.statuses.len(),
            });
        }
        if self.statuses[edge] != EdgeState::Available {
            return Err(Error::EdgeNotAvailable {
                edge,
                status: self.statuses[edge].name().to_string(),
            });
        }

        let (row, column) = self.endpoints(edge);
        let mirror = self.edge_index(column, row);
        self.statuses[edge] = EdgeState::Connected;
        self.statuses[mirror] = EdgeState::Connected;
        self.neighbors[row].push(column);
        self.neighbors[column].push(row);
        Ok(())
    }

    /// Revert a connected edge and its mirror to available and drop the
    /// adjacency entries added by the matching [`GraphState::connect`].
    ///
    /// Removal targets the last occurrence of each endpoint so that the
    /// remaining entries keep their original order; the transition engine
    /// only ever disconnects the most recently connected edge.
    ///
    /// # Errors
    ///
    /// Returns error if the edge index is out of range or the edge is not
    /// currently connected.
    pub(crate) fn disconnect(&mut self, edge: usize) -> Result<()> {
        if edge >= self.statuses.len() {
            return Err(Error::EdgeOutOfRange {
                edge,
                limit: self.statuses.len(),
            });
        }
        if self.statuses[edge] != EdgeState::Connected {
            return Err(Error::EdgeNotConnected {
                edge,
                status: self.statuses[edge].name().to_string(),
            });
        }

        let (row, column) = self.endpoints(edge);
        let mirror = self.edge_index(column, row);
        self.statuses[edge] = EdgeState::Available;
        self.statuses[mirror] = EdgeState::Available;

        if let Some(position) = self.neighbors[row].iter().rposition(|&n| n == column) {
            self.neighbors[row].remove(position);
        }
        if let Some(position) = self.neighbors[column].iter().rposition(|&n| n == row) {
            self.neighbors[column].remove(position);
        }
        Ok(())
    }
}

impl fmt::Display for GraphState {
    /// Render the status matrix row by row: every cell prints its token
    /// followed by a comma, rows are separated by newlines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.num_nodes {
            for column in 0..self.num_nodes {
                write!(f, "{},", self.status_at(row, column).token())?;
            }
            if row < self.num_nodes - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_weights(num_nodes: usize) -> Vec<f64> {
        vec![0.0; num_nodes * num_nodes]
    }

    #[test]
    fn test_new_graph_statuses() {
        let graph = GraphState::new(3, zero_weights(3)).unwrap();

        for node in 0..3 {
            assert_eq!(graph.status_at(node, node), EdgeState::Unusable);
            assert!(graph.neighbors(node).is_empty());
        }
        assert_eq!(graph.status_at(0, 1), EdgeState::Available);
        assert_eq!(graph.status_at(2, 0), EdgeState::Available);
        assert_eq!(graph.connected_entries(), 0);
    }

    #[test]
    fn test_rejects_out_of_range_node_count() {
        let result = GraphState::new(0, Vec::new());
        assert!(matches!(result, Err(Error::InvalidNodeCount { .. })));

        let result = GraphState::new(101, zero_weights(101));
        assert!(matches!(result, Err(Error::InvalidNodeCount { .. })));
    }

    #[test]
    fn test_rejects_wrong_weight_count() {
        let result = GraphState::new(3, vec![0.0; 8]);
        assert!(matches!(
            result,
            Err(Error::WeightCountMismatch {
                expected: 9,
                got: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_non_finite_weight() {
        let mut weights = zero_weights(2);
        weights[2] = f64::NAN;
        let result = GraphState::new(2, weights);
        assert!(matches!(
            result,
            Err(Error::NonFiniteWeight { position: 2, .. })
        ));
    }

    #[test]
    fn test_connect_updates_both_mirrors_and_adjacency() {
        let mut graph = GraphState::new(3, zero_weights(3)).unwrap();
        graph.connect(graph.edge_index(0, 1)).unwrap();

        assert_eq!(graph.status_at(0, 1), EdgeState::Connected);
        assert_eq!(graph.status_at(1, 0), EdgeState::Connected);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert_eq!(graph.connected_entries(), 2);
    }

    #[test]
    fn test_connect_rejects_connected_edge_and_mirror() {
        let mut graph = GraphState::new(3, zero_weights(3)).unwrap();
        graph.connect(1).unwrap();

        assert!(matches!(
            graph.connect(1),
            Err(Error::EdgeNotAvailable { edge: 1, .. })
        ));
        // Mirror was flipped together with the edge
        assert!(matches!(
            graph.connect(3),
            Err(Error::EdgeNotAvailable { edge: 3, .. })
        ));
    }

    #[test]
    fn test_connect_rejects_self_edge() {
        let mut graph = GraphState::new(3, zero_weights(3)).unwrap();
        let result = graph.connect(graph.edge_index(1, 1));
        assert!(matches!(result, Err(Error::EdgeNotAvailable { .. })));
    }

    #[test]
    fn test_connect_rejects_out_of_range_edge() {
        let mut graph = GraphState::new(2, zero_weights(2)).unwrap();
        assert!(matches!(
            graph.connect(4),
            Err(Error::EdgeOutOfRange { edge: 4, limit: 4 })
        ));
    }

    #[test]
    fn test_disconnect_restores_statuses_and_adjacency() {
        let mut graph = GraphState::new(3, zero_weights(3)).unwrap();
        let before = graph.clone();

        graph.connect(1).unwrap();
        graph.disconnect(1).unwrap();

        assert_eq!(graph, before);
    }

    #[test]
    fn test_disconnect_keeps_earlier_adjacency_order() {
        let mut graph = GraphState::new(4, zero_weights(4)).unwrap();
        graph.connect(graph.edge_index(0, 1)).unwrap();
        graph.connect(graph.edge_index(0, 2)).unwrap();
        graph.connect(graph.edge_index(0, 3)).unwrap();

        graph.disconnect(graph.edge_index(0, 3)).unwrap();

        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert!(graph.neighbors(3).is_empty());
    }

    #[test]
    fn test_disconnect_rejects_available_edge() {
        let mut graph = GraphState::new(3, zero_weights(3)).unwrap();
        assert!(matches!(
            graph.disconnect(1),
            Err(Error::EdgeNotConnected { edge: 1, .. })
        ));
    }

    #[test]
    fn test_display_matrix() {
        let mut graph = GraphState::new(2, zero_weights(2)).unwrap();
        assert_eq!(graph.to_string(), "0,0,\n0,0,");

        graph.connect(1).unwrap();
        assert_eq!(graph.to_string(), "0,1,\n1,0,");
    }

    #[test]
    fn test_single_node_graph() {
        let graph = GraphState::new(1, vec![0.0]).unwrap();
        assert_eq!(graph.status(0), EdgeState::Unusable);
        assert_eq!(graph.to_string(), "0,");
    }
}
