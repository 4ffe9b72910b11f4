//! Graph Storage
//!
//! The storage owns vertices and edges. The DAG engine never touches edge
//! payloads directly; it only asks the storage for the incident edges of a
//! vertex and for the endpoints of an edge.
//!
//! `AdjacencyStorage` is the default implementation:
//!
//! - Vertices are kept in an `IndexMap`, so iteration follows insertion order.
//! - Each vertex keeps both its incoming and outgoing edge ids, which makes
//!   traversal in either direction a direct lookup.
//! - Edge endpoints live in a separate edge table keyed by `EdgeId`. Its
//!   iteration order is unspecified once edges have been removed.

use std::hash::Hash;

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::vertex::EdgeId;
use crate::error::{GraphError, Result};

/// The operations the DAG engine needs from a graph storage.
pub trait GraphStorage {
    /// Vertex identity. Supplied by the caller, never constructed by the storage.
    type Vertex: Clone + Eq + Hash;

    /// Edge identity issued by the storage.
    type Edge: Copy + Eq + Hash;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Add a vertex. Returns `false` if it was already present.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Remove a vertex together with every edge touching it.
    ///
    /// Returns `false` if the vertex was not present. For [`AdjacencyStorage`]
    /// this costs O(V + d) for a vertex of degree `d`, since the remaining
    /// vertices keep their insertion order.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> bool;

    /// Add an edge from `source` to `target`.
    fn add_edge(&mut self, source: &Self::Vertex, target: &Self::Vertex) -> Result<Self::Edge>;

    /// Remove one edge from `source` to `target`, if any.
    fn remove_edge(&mut self, source: &Self::Vertex, target: &Self::Vertex) -> Option<Self::Edge>;

    fn remove_edge_by_id(&mut self, edge: Self::Edge) -> bool;

    fn contains_edge(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool;

    fn incoming_edges_of(&self, vertex: &Self::Vertex) -> Result<&[Self::Edge]>;

    fn outgoing_edges_of(&self, vertex: &Self::Vertex) -> Result<&[Self::Edge]>;

    fn edge_source(&self, edge: Self::Edge) -> Option<&Self::Vertex>;

    fn edge_target(&self, edge: Self::Edge) -> Option<&Self::Vertex>;

    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex> + '_;

    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}

type EdgeList = SmallVec<[EdgeId; 4]>;

/// Incident edges of a single vertex.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    incoming: EdgeList,
    outgoing: EdgeList,
}

/// Adjacency-list storage for directed graphs without self-loops.
#[derive(Debug, Clone)]
pub struct AdjacencyStorage<V> {
    vertices: IndexMap<V, Adjacency>,
    edges: IndexMap<EdgeId, (V, V)>,
    next_edge: u64,
    allow_multiple_edges: bool,
}

impl<V> AdjacencyStorage<V>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty storage that rejects parallel edges.
    pub fn new() -> Self {
        Self::with_multiple_edges(false)
    }

    /// Create an empty storage, choosing whether parallel edges are accepted.
    pub fn with_multiple_edges(allow_multiple_edges: bool) -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            next_edge: 0,
            allow_multiple_edges,
        }
    }

    /// Whether parallel edges are accepted.
    pub fn allows_multiple_edges(&self) -> bool {
        self.allow_multiple_edges
    }

    fn find_edge(&self, source: &V, target: &V) -> Option<EdgeId> {
        let adjacency = self.vertices.get(source)?;
        adjacency
            .outgoing
            .iter()
            .copied()
            .find(|edge| matches!(self.edges.get(edge), Some((_, t)) if t == target))
    }

    /// Drop `edge` from the incident lists of both endpoints.
    fn detach(&mut self, edge: EdgeId, source: &V, target: &V) {
        if let Some(adjacency) = self.vertices.get_mut(source) {
            adjacency.outgoing.retain(|e| *e != edge);
        }
        if let Some(adjacency) = self.vertices.get_mut(target) {
            adjacency.incoming.retain(|e| *e != edge);
        }
    }
}

impl<V> Default for AdjacencyStorage<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> GraphStorage for AdjacencyStorage<V>
where
    V: Clone + Eq + Hash,
{
    type Vertex = V;
    type Edge = EdgeId;

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }

    fn add_vertex(&mut self, vertex: V) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        self.vertices.insert(vertex, Adjacency::default());
        true
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(adjacency) = self.vertices.shift_remove(vertex) else {
            return false;
        };

        for edge in adjacency.incoming.iter().chain(adjacency.outgoing.iter()) {
            if let Some((source, target)) = self.edges.swap_remove(edge) {
                self.detach(*edge, &source, &target);
            }
        }
        true
    }

    fn add_edge(&mut self, source: &V, target: &V) -> Result<EdgeId> {
        if !self.vertices.contains_key(source) || !self.vertices.contains_key(target) {
            return Err(GraphError::NotFound);
        }
        if source == target {
            return Err(GraphError::LoopNotPermitted);
        }
        if !self.allow_multiple_edges && self.find_edge(source, target).is_some() {
            return Err(GraphError::DuplicateEdge);
        }

        let edge = EdgeId::from_raw(self.next_edge);
        self.next_edge += 1;

        self.edges.insert(edge, (source.clone(), target.clone()));
        if let Some(adjacency) = self.vertices.get_mut(source) {
            adjacency.outgoing.push(edge);
        }
        if let Some(adjacency) = self.vertices.get_mut(target) {
            adjacency.incoming.push(edge);
        }
        Ok(edge)
    }

    fn remove_edge(&mut self, source: &V, target: &V) -> Option<EdgeId> {
        let edge = self.find_edge(source, target)?;
        self.remove_edge_by_id(edge);
        Some(edge)
    }

    fn remove_edge_by_id(&mut self, edge: EdgeId) -> bool {
        match self.edges.swap_remove(&edge) {
            Some((source, target)) => {
                self.detach(edge, &source, &target);
                true
            }
            None => false,
        }
    }

    fn contains_edge(&self, source: &V, target: &V) -> bool {
        self.find_edge(source, target).is_some()
    }

    fn incoming_edges_of(&self, vertex: &V) -> Result<&[EdgeId]> {
        self.vertices
            .get(vertex)
            .map(|adjacency| adjacency.incoming.as_slice())
            .ok_or(GraphError::NotFound)
    }

    fn outgoing_edges_of(&self, vertex: &V) -> Result<&[EdgeId]> {
        self.vertices
            .get(vertex)
            .map(|adjacency| adjacency.outgoing.as_slice())
            .ok_or(GraphError::NotFound)
    }

    fn edge_source(&self, edge: EdgeId) -> Option<&V> {
        self.edges.get(&edge).map(|(source, _)| source)
    }

    fn edge_target(&self, edge: EdgeId) -> Option<&V> {
        self.edges.get(&edge).map(|(_, target)| target)
    }

    fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.keys()
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn add_and_remove_vertices() {
        let mut storage = AdjacencyStorage::new();

        assert!(storage.add_vertex("a"));
        assert!(storage.add_vertex("b"));
        assert!(!storage.add_vertex("a"));
        assert_eq!(storage.vertex_count(), 2);

        assert!(storage.remove_vertex(&"a"));
        assert!(!storage.remove_vertex(&"a"));
        assert_eq!(storage.vertex_count(), 1);
        assert!(!storage.contains_vertex(&"a"));
        assert!(storage.contains_vertex(&"b"));
    }

    #[test]
    fn add_and_remove_edges() {
        let mut storage = AdjacencyStorage::new();
        storage.add_vertex(1);
        storage.add_vertex(2);

        let edge = storage.add_edge(&1, &2).unwrap();

        assert!(storage.contains_edge(&1, &2));
        assert!(!storage.contains_edge(&2, &1));
        assert_eq!(storage.edge_source(edge), Some(&1));
        assert_eq!(storage.edge_target(edge), Some(&2));
        assert_eq!(storage.outgoing_edges_of(&1).unwrap(), &[edge]);
        assert_eq!(storage.incoming_edges_of(&2).unwrap(), &[edge]);

        assert_eq!(storage.remove_edge(&1, &2), Some(edge));
        assert!(!storage.contains_edge(&1, &2));
        assert!(storage.outgoing_edges_of(&1).unwrap().is_empty());
        assert!(storage.incoming_edges_of(&2).unwrap().is_empty());
        assert_eq!(storage.edge_count(), 0);
    }

    #[test]
    fn rejects_loops_duplicates_and_missing_vertices() {
        let mut storage = AdjacencyStorage::new();
        storage.add_vertex('x');
        storage.add_vertex('y');

        assert_eq!(storage.add_edge(&'x', &'x'), Err(GraphError::LoopNotPermitted));
        assert_eq!(storage.add_edge(&'x', &'z'), Err(GraphError::NotFound));

        storage.add_edge(&'x', &'y').unwrap();
        assert_eq!(storage.add_edge(&'x', &'y'), Err(GraphError::DuplicateEdge));
        assert_eq!(storage.edge_count(), 1);
    }

    #[test]
    fn multiple_edges_when_allowed() {
        let mut storage = AdjacencyStorage::with_multiple_edges(true);
        storage.add_vertex(0);
        storage.add_vertex(1);

        let first = storage.add_edge(&0, &1).unwrap();
        let second = storage.add_edge(&0, &1).unwrap();
        assert_ne!(first, second);
        assert_eq!(storage.edge_count(), 2);

        assert!(storage.remove_edge_by_id(first));
        assert!(storage.contains_edge(&0, &1));
    }

    #[test]
    fn removing_vertex_detaches_incident_edges() {
        let mut storage = AdjacencyStorage::new();
        for v in 0..3 {
            storage.add_vertex(v);
        }
        storage.add_edge(&0, &1).unwrap();
        storage.add_edge(&1, &2).unwrap();
        storage.add_edge(&0, &2).unwrap();

        storage.remove_vertex(&1);

        assert_eq!(storage.edge_count(), 1);
        assert!(storage.contains_edge(&0, &2));
        assert_eq!(storage.outgoing_edges_of(&0).unwrap().len(), 1);
        assert_eq!(storage.incoming_edges_of(&2).unwrap().len(), 1);
        assert_eq!(storage.outgoing_edges_of(&1), Err(GraphError::NotFound));
    }

    #[test]
    fn removing_many_edges_stays_linear() {
        let n = 100_000u32;
        let mut storage = AdjacencyStorage::new();
        for v in 0..=n {
            storage.add_vertex(v);
        }
        let edges: Vec<EdgeId> = (0..n).map(|v| storage.add_edge(&v, &(v + 1)).unwrap()).collect();

        let started = Instant::now();
        for edge in edges {
            assert!(storage.remove_edge_by_id(edge));
        }
        assert_eq!(storage.edge_count(), 0);
        // A quadratic edge table needs minutes here.
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[test]
    fn vertices_iterate_in_insertion_order() {
        let mut storage = AdjacencyStorage::new();
        for v in ["c", "a", "b"] {
            storage.add_vertex(v);
        }
        storage.remove_vertex(&"a");
        let order: Vec<_> = storage.vertices().copied().collect();
        assert_eq!(order, vec!["c", "b"]);
    }
}
