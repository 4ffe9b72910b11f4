//! Depth-First Reachability
//!
//! An iterative depth-first walk over any [`DirectedNeighbors`]. The walk keeps
//! its own stack, so deep graphs do not consume call-stack frames.

use std::collections::HashSet;

use super::view::DirectedNeighbors;

/// Yields every vertex reachable from a start vertex, start vertex first.
///
/// Each vertex is yielded exactly once, even when several paths lead to it.
pub struct DepthFirst<G: DirectedNeighbors> {
    graph: G,
    stack: Vec<G::Vertex>,
    seen: HashSet<G::Vertex>,
}

impl<G: DirectedNeighbors> DepthFirst<G> {
    /// Start a walk at `start`.
    pub fn new(graph: G, start: G::Vertex) -> Self {
        let mut seen = HashSet::new();
        seen.insert(start.clone());
        Self {
            graph,
            stack: vec![start],
            seen,
        }
    }
}

impl<G: DirectedNeighbors> Iterator for DepthFirst<G> {
    type Item = G::Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.stack.pop()?;

        // Push in reverse so the first successor is explored first.
        for next in self.graph.successors(&vertex).into_iter().rev() {
            if self.seen.insert(next.clone()) {
                self.stack.push(next);
            }
        }

        Some(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyStorage, Forward, GraphStorage, Reversed};

    #[test]
    fn visits_each_reachable_vertex_once() {
        // Diamond: 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let mut storage = AdjacencyStorage::new();
        for v in 0..5 {
            storage.add_vertex(v);
        }
        storage.add_edge(&0, &1).unwrap();
        storage.add_edge(&0, &2).unwrap();
        storage.add_edge(&1, &3).unwrap();
        storage.add_edge(&2, &3).unwrap();

        let order: Vec<_> = DepthFirst::new(Forward::new(&storage), 0).collect();
        assert_eq!(order, vec![0, 1, 3, 2]);

        let back: Vec<_> = DepthFirst::new(Reversed::new(&storage), 3).collect();
        assert_eq!(back.len(), 4);
        assert_eq!(back[0], 3);
        assert!(!back.contains(&4));
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let mut storage = AdjacencyStorage::new();
        let n = 100_000u32;
        for v in 0..n {
            storage.add_vertex(v);
        }
        for v in 1..n {
            storage.add_edge(&(v - 1), &v).unwrap();
        }

        assert_eq!(DepthFirst::new(Forward::new(&storage), 0).count(), n as usize);
    }
}
