//! Independent structural checks for the graph record
//!
//! These checks are deliberately implemented on top of union-find rather
//! than the depth-first [`CycleScan`](super::cycles::CycleScan) so tests can
//! cross-validate the engine with a second opinion.

use super::graph::{EdgeState, GraphState};

/// Union-find over node indices with union by rank and path compression
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Representative of the set containing `node`
    pub fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`; returns false if they were
    /// already joined (i.e. the edge `a`-`b` would close a cycle).
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

impl GraphState {
    /// Connected edges as `(row, column)` pairs with `row < column`
    pub fn connected_edge_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for row in 0..self.num_nodes() {
            for column in (row + 1)..self.num_nodes() {
                if self.status_at(row, column) == EdgeState::Connected {
                    pairs.push((row, column));
                }
            }
        }
        pairs
    }

    /// Does the connected subgraph contain no cycle?
    pub fn is_acyclic(&self) -> bool {
        let mut sets = DisjointSet::new(self.num_nodes());
        self.connected_edge_pairs()
            .into_iter()
            .all(|(row, column)| sets.union(row, column))
    }

    /// Is the connected subgraph a spanning tree: acyclic, touching every
    /// node, with exactly `N - 1` edges?
    pub fn is_spanning_tree(&self) -> bool {
        let pairs = self.connected_edge_pairs();
        if pairs.len() != self.num_nodes() - 1 {
            return false;
        }

        let mut sets = DisjointSet::new(self.num_nodes());
        if !pairs.into_iter().all(|(row, column)| sets.union(row, column)) {
            return false;
        }

        let root = sets.find(0);
        (1..self.num_nodes()).all(|node| sets.find(node) == root)
    }

    /// Do the adjacency lists agree exactly with the connected entries of
    /// the status record? Compared as sorted multisets per node, so the
    /// append order of connections does not matter.
    pub fn adjacency_matches_statuses(&self) -> bool {
        for node in 0..self.num_nodes() {
            let mut listed: Vec<usize> = self.neighbors(node).to_vec();
            listed.sort_unstable();

            let expected: Vec<usize> = (0..self.num_nodes())
                .filter(|&other| self.status_at(node, other) == EdgeState::Connected)
                .collect();

            if listed != expected {
                return false;
            }
        }
        true
    }
}
