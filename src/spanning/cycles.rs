//! Cycle detection over the connected subgraph

use super::graph::GraphState;

/// Reusable scan answering whether connecting two nodes would close a cycle.
///
/// The connected subgraph is always a forest, so connecting `row` and
/// `column` closes a cycle exactly when `row` is already reachable from
/// `column`. The scan walks the component of `column` depth-first with an
/// explicit stack, treating `row` as pre-visited: meeting any visited node
/// other than the traversal parent is a back edge.
///
/// Both scratch buffers are retained between queries so a full legal-action
/// sweep does not allocate per candidate edge.
#[derive(Debug, Clone)]
pub struct CycleScan {
    visited: Vec<bool>,
    stack: Vec<(usize, usize)>,
}

impl CycleScan {
    pub fn new(num_nodes: usize) -> Self {
        CycleScan {
            visited: vec![false; num_nodes],
            stack: Vec::with_capacity(num_nodes),
        }
    }

    /// Would connecting `row` and `column` close a cycle in `graph`?
    ///
    /// Reads only the current adjacency lists; the candidate edge itself is
    /// never part of the traversal.
    pub fn creates_cycle(&mut self, graph: &GraphState, row: usize, column: usize) -> bool {
        debug_assert_eq!(self.visited.len(), graph.num_nodes());

        self.visited.fill(false);
        self.visited[row] = true;
        self.visited[column] = true;
        self.stack.clear();
        self.stack.push((column, row));

        while let Some((node, parent)) = self.stack.pop() {
            for &next in graph.neighbors(node) {
                if !self.visited[next] {
                    self.visited[next] = true;
                    self.stack.push((next, node));
                } else if next != parent {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_edges(num_nodes: usize, edges: &[(usize, usize)]) -> GraphState {
        let mut graph =
            GraphState::new(num_nodes, vec![0.0; num_nodes * num_nodes]).unwrap();
        for &(row, column) in edges {
            graph.connect(graph.edge_index(row, column)).unwrap();
        }
        graph
    }

    #[test]
    fn test_empty_graph_never_cycles() {
        let graph = graph_with_edges(4, &[]);
        let mut scan = CycleScan::new(4);

        for row in 0..4 {
            for column in 0..4 {
                if row != column {
                    assert!(!scan.creates_cycle(&graph, row, column));
                }
            }
        }
    }

    #[test]
    fn test_closing_a_path_is_a_cycle() {
        // 0-1-2 path; adding 0-2 closes the triangle
        let graph = graph_with_edges(3, &[(0, 1), (1, 2)]);
        let mut scan = CycleScan::new(3);

        assert!(scan.creates_cycle(&graph, 0, 2));
        assert!(scan.creates_cycle(&graph, 2, 0));
    }

    #[test]
    fn test_extending_a_path_is_safe() {
        let graph = graph_with_edges(4, &[(0, 1), (1, 2)]);
        let mut scan = CycleScan::new(4);

        assert!(!scan.creates_cycle(&graph, 2, 3));
        assert!(!scan.creates_cycle(&graph, 0, 3));
    }

    #[test]
    fn test_joining_components_is_safe() {
        // Two components: 0-1 and 2-3
        let graph = graph_with_edges(4, &[(0, 1), (2, 3)]);
        let mut scan = CycleScan::new(4);

        assert!(!scan.creates_cycle(&graph, 1, 2));
        assert!(!scan.creates_cycle(&graph, 0, 3));
    }

    #[test]
    fn test_distant_reconnection_cycles() {
        // Star at 0 plus a chain hanging off node 3
        let graph = graph_with_edges(6, &[(0, 1), (0, 2), (0, 3), (3, 4)]);
        let mut scan = CycleScan::new(6);

        assert!(scan.creates_cycle(&graph, 1, 4));
        assert!(scan.creates_cycle(&graph, 2, 3));
        assert!(!scan.creates_cycle(&graph, 4, 5));
    }

    #[test]
    fn test_scan_is_reusable_across_queries() {
        let graph = graph_with_edges(5, &[(0, 1), (1, 2)]);
        let mut scan = CycleScan::new(5);

        assert!(scan.creates_cycle(&graph, 0, 2));
        // A fresh query after a positive result must not inherit stale marks
        assert!(!scan.creates_cycle(&graph, 3, 4));
        assert!(!scan.creates_cycle(&graph, 2, 3));
    }
}
