//! Topological Iteration
//!
//! Both iterators scan indices upward from the minimum bound to the maximum,
//! skipping holes left by removed vertices.

use std::hash::Hash;
use std::iter::FusedIterator;

use super::engine::DirectedAcyclicGraph;
use super::TopoIndex;
use crate::error::Result;
use crate::graph::GraphStorage;

/// Borrowing iterator over a graph's vertices in topological order.
///
/// The borrow keeps the graph immutable for the iterator's lifetime.
pub struct TopoIter<'a, V, S> {
    graph: &'a DirectedAcyclicGraph<V, S>,
    next: TopoIndex,
    max: TopoIndex,
}

impl<'a, V, S> TopoIter<'a, V, S>
where
    V: Clone + Eq + Hash,
    S: GraphStorage<Vertex = V>,
{
    pub(crate) fn new(graph: &'a DirectedAcyclicGraph<V, S>) -> Self {
        let (min, max) = graph.index_bounds();
        Self { graph, next: min, max }
    }
}

impl<'a, V, S> Iterator for TopoIter<'a, V, S>
where
    V: Clone + Eq + Hash,
    S: GraphStorage<Vertex = V>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        while self.next <= self.max {
            let index = self.next;
            self.next += 1;
            if let Some(vertex) = graph.vertex_at(index) {
                return Some(vertex);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let span = usize::try_from(self.max - self.next + 1).unwrap_or(0);
        (0, Some(span))
    }
}

impl<V, S> FusedIterator for TopoIter<'_, V, S>
where
    V: Clone + Eq + Hash,
    S: GraphStorage<Vertex = V>,
{
}

/// A position in the topological order that does not borrow the graph.
///
/// The cursor remembers the graph's modification count when it was created.
/// Every call to [`advance`](Self::advance) compares it against the graph and
/// fails with [`GraphError::ConcurrentMutation`](crate::GraphError::ConcurrentMutation)
/// once any vertex has been added, removed, or reindexed. Removing edges does
/// not invalidate a cursor.
///
/// A cursor must only be advanced against the graph that created it.
///
/// ```rust
/// use trellis_core::{DirectedAcyclicGraph, GraphError};
///
/// let mut dag = DirectedAcyclicGraph::new();
/// dag.add_vertex(1);
/// dag.add_vertex(2);
///
/// let mut cursor = dag.cursor();
/// assert_eq!(cursor.advance(&dag), Ok(Some(1)));
///
/// dag.add_vertex(3);
/// assert!(matches!(cursor.advance(&dag), Err(GraphError::ConcurrentMutation { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopoCursor {
    next: TopoIndex,
    expected: u64,
}

impl TopoCursor {
    pub(crate) fn new(start: TopoIndex, expected: u64) -> Self {
        Self { next: start, expected }
    }

    /// The next vertex in order, or `None` once the order is exhausted.
    pub fn advance<V, S>(&mut self, graph: &DirectedAcyclicGraph<V, S>) -> Result<Option<V>>
    where
        V: Clone + Eq + Hash,
        S: GraphStorage<Vertex = V>,
    {
        graph.check_modifications(self.expected)?;
        let (_, max) = graph.index_bounds();
        while self.next <= max {
            let index = self.next;
            self.next += 1;
            if let Some(vertex) = graph.vertex_at(index) {
                return Ok(Some(vertex.clone()));
            }
        }
        Ok(None)
    }

    /// Whether another vertex remains, without moving the cursor.
    pub fn has_next<V, S>(&self, graph: &DirectedAcyclicGraph<V, S>) -> Result<bool>
    where
        V: Clone + Eq + Hash,
        S: GraphStorage<Vertex = V>,
    {
        graph.check_modifications(self.expected)?;
        let (_, max) = graph.index_bounds();
        Ok((self.next..=max).any(|index| graph.vertex_at(index).is_some()))
    }
}
