//! Undirected adjacency graph over region handles.
//!
//! Nodes are the indices `0..node_count`; adding a node only extends that
//! range. Edges are unordered pairs carrying a payload, keyed by
//! `(min, max)` so the two directions share one entry.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NeighborGraph<E> {
    node_count: usize,
    edges: HashMap<(usize, usize), E>,
}

impl<E> NeighborGraph<E> {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: HashMap::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Append a node, returning its index.
    pub fn add_node(&mut self) -> usize {
        self.node_count += 1;
        self.node_count - 1
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        (a.min(b), a.max(b))
    }

    /// Connect `a` and `b`. Self-edges and out-of-range indices are
    /// rejected; returns whether the edge was stored. An existing edge
    /// between the pair is overwritten.
    pub fn add_edge(&mut self, a: usize, b: usize, value: E) -> bool {
        if a == b || a >= self.node_count || b >= self.node_count {
            return false;
        }
        self.edges.insert(Self::key(a, b), value);
        true
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a != b && self.edges.contains_key(&Self::key(a, b))
    }

    pub fn edge_value(&self, a: usize, b: usize) -> Option<&E> {
        if a == b {
            return None;
        }
        self.edges.get(&Self::key(a, b))
    }

    /// All nodes sharing an edge with `node`, in ascending order.
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .edges
            .keys()
            .filter_map(|&(a, b)| {
                if a == node {
                    Some(b)
                } else if b == node {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// All edges as `(a, b, &value)` with `a < b`, in key order.
    pub fn edges(&self) -> Vec<(usize, usize, &E)> {
        let mut out: Vec<(usize, usize, &E)> =
            self.edges.iter().map(|(&(a, b), v)| (a, b, v)).collect();
        out.sort_unstable_by_key(|&(a, b, _)| (a, b));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_undirected() {
        let mut g = NeighborGraph::new(3);
        assert!(g.add_edge(2, 0, 7.5f32));
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(2, 0));
        assert_eq!(g.edge_value(0, 2), Some(&7.5));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn self_edges_and_out_of_range_are_rejected() {
        let mut g: NeighborGraph<()> = NeighborGraph::new(2);
        assert!(!g.add_edge(1, 1, ()));
        assert!(!g.add_edge(0, 2, ()));
        assert!(!g.add_edge(5, 0, ()));
        assert_eq!(g.edge_count(), 0);
        assert!(!g.has_edge(1, 1));
    }

    #[test]
    fn neighbors_come_back_sorted() {
        let mut g = NeighborGraph::new(5);
        g.add_edge(2, 4, ());
        g.add_edge(0, 2, ());
        g.add_edge(2, 1, ());
        assert_eq!(g.neighbors(2), vec![0, 1, 4]);
        assert!(g.neighbors(3).is_empty());
    }

    #[test]
    fn added_nodes_extend_the_index_range() {
        let mut g: NeighborGraph<u8> = NeighborGraph::new(1);
        let n = g.add_node();
        assert_eq!(n, 1);
        assert!(g.add_edge(0, n, 3));
    }

    #[test]
    fn re_adding_an_edge_overwrites_its_value() {
        let mut g = NeighborGraph::new(2);
        g.add_edge(0, 1, 1.0f32);
        g.add_edge(1, 0, 2.0f32);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_value(0, 1), Some(&2.0));
    }
}
