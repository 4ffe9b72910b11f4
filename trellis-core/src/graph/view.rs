//! Directed Views
//!
//! Lightweight read-only views that expose a storage as a successor relation.
//! `Reversed` flips every edge, so walking its successors from a vertex walks
//! the vertex's predecessors in the underlying graph.

use smallvec::SmallVec;

use super::storage::GraphStorage;

/// Successor lists used by the traversal iterators.
pub type Successors<V> = SmallVec<[V; 8]>;

/// A directed successor relation over some vertex type.
pub trait DirectedNeighbors {
    type Vertex: Clone + Eq + std::hash::Hash;

    /// Vertices directly reachable from `vertex`. Empty if `vertex` is absent.
    fn successors(&self, vertex: &Self::Vertex) -> Successors<Self::Vertex>;
}

/// The storage with edges in their stored direction.
#[derive(Debug, Clone, Copy)]
pub struct Forward<'a, S> {
    storage: &'a S,
}

impl<'a, S> Forward<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }
}

impl<S: GraphStorage> DirectedNeighbors for Forward<'_, S> {
    type Vertex = S::Vertex;

    fn successors(&self, vertex: &S::Vertex) -> Successors<S::Vertex> {
        self.storage
            .outgoing_edges_of(vertex)
            .map(|edges| {
                edges
                    .iter()
                    .filter_map(|edge| self.storage.edge_target(*edge).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The storage with every edge reversed.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'a, S> {
    storage: &'a S,
}

impl<'a, S> Reversed<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }
}

impl<S: GraphStorage> DirectedNeighbors for Reversed<'_, S> {
    type Vertex = S::Vertex;

    fn successors(&self, vertex: &S::Vertex) -> Successors<S::Vertex> {
        self.storage
            .incoming_edges_of(vertex)
            .map(|edges| {
                edges
                    .iter()
                    .filter_map(|edge| self.storage.edge_source(*edge).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
