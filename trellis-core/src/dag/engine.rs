//! DAG Engine
//!
//! A mutable directed graph that refuses any edge that would close a cycle
//! and keeps a topological index for every vertex as edges are added.
//!
//! # Algorithm
//!
//! Every vertex holds a unique topological index and every edge `(u, v)`
//! satisfies `index(u) < index(v)`. New vertices take the next index above
//! the current maximum, which can never violate the order. Inserting an edge
//! `source -> target` is where the work happens:
//!
//! 1. If `index(target) > index(source)` the order already agrees with the
//!    new edge and the storage simply records it.
//! 2. Otherwise the indices in `[index(target), index(source)]` form the
//!    affected region. A forward search from `target` collects the vertices
//!    reachable inside the region; reaching `source` proves a cycle and the
//!    insertion is refused before anything has changed.
//! 3. A backward search from `source` collects the vertices inside the region
//!    that can reach it.
//! 4. The indices held by both sets are pooled, sorted, and handed out again:
//!    first to the backward set, then to the forward set, each in its previous
//!    relative order. Indices outside the region are never touched.
//!
//! The cost is bounded by the size of the region and the edges touching it,
//! not by the size of the graph. Both searches keep an explicit stack.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use tracing::{debug, trace};

use super::order_map::{OrderMap, OrderMapKind, TopoOrderMap};
use super::region::Region;
use super::topo_iter::{TopoCursor, TopoIter};
use super::visited::{VisitedStrategy, VisitedStrategyKind};
use super::TopoIndex;
use crate::config::DagConfig;
use crate::error::{GraphError, Result};
use crate::graph::{AdjacencyStorage, DepthFirst, Forward, GraphStorage, Reversed, VertexId};

/// Vertices found by one discovery pass, with the index each held when found.
type Discovered<V> = Vec<(TopoIndex, V)>;

/// A directed acyclic graph with an incrementally maintained topological order.
///
/// # Type Parameters
///
/// - `V`: vertex identity, supplied by the caller.
/// - `S`: the storage holding vertices and edges.
///
/// The graph is single-threaded. Iterating with [`iter`](Self::iter) borrows
/// the graph, so it cannot be mutated until the iterator is dropped. A
/// detached [`TopoCursor`] is available for callers that must interleave
/// other work; it reports [`GraphError::ConcurrentMutation`] if the graph
/// changed underneath it.
///
/// # Example
///
/// ```rust
/// use trellis_core::{DirectedAcyclicGraph, GraphError};
///
/// let mut dag = DirectedAcyclicGraph::new();
/// for v in ["a", "b", "c"] {
///     dag.add_vertex(v);
/// }
/// dag.add_edge(&"b", &"c").unwrap();
/// dag.add_edge(&"a", &"b").unwrap();
///
/// assert_eq!(dag.add_edge(&"c", &"a"), Err(GraphError::CycleDetected));
/// assert_eq!(dag.topological_order(), vec!["a", "b", "c"]);
/// ```
pub struct DirectedAcyclicGraph<V, S = AdjacencyStorage<V>> {
    storage: S,
    order: OrderMap<V>,
    min_index: TopoIndex,
    max_index: TopoIndex,
    modifications: u64,
    visited_kind: VisitedStrategyKind,
    /// Retained marks for strategies that reuse their allocation.
    visited: Option<VisitedStrategy>,
    vertex_supplier: Option<Box<dyn FnMut() -> V>>,
}

impl<V> DirectedAcyclicGraph<V>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DagConfig::default())
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: DagConfig) -> Self {
        let storage = AdjacencyStorage::with_multiple_edges(config.allow_multiple_edges);
        Self::empty(storage, config.visited, config.order_map)
    }
}

impl<V> Default for DirectedAcyclicGraph<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedAcyclicGraph<VertexId> {
    /// Create an empty graph whose [`add_new_vertex`](Self::add_new_vertex)
    /// hands out fresh [`VertexId`]s.
    pub fn with_vertex_ids() -> Self {
        Self::new().with_vertex_supplier(VertexId::issue)
    }
}

impl<V, S> DirectedAcyclicGraph<V, S>
where
    V: Clone + Eq + Hash,
    S: GraphStorage<Vertex = V>,
{
    fn empty(storage: S, visited_kind: VisitedStrategyKind, order_map: OrderMapKind) -> Self {
        Self {
            storage,
            order: OrderMap::new(order_map),
            min_index: 0,
            max_index: -1,
            modifications: 0,
            visited_kind,
            visited: None,
            vertex_supplier: None,
        }
    }

    /// Wrap an existing storage, ordering its vertices with Kahn's algorithm.
    ///
    /// Sources are taken in storage iteration order. Fails with
    /// [`GraphError::CycleDetected`] if the stored edges contain a cycle.
    ///
    /// Only `config.visited` and `config.order_map` apply. The storage keeps
    /// its own policy for parallel edges, so `config.allow_multiple_edges` is
    /// ignored.
    pub fn from_storage(storage: S, config: DagConfig) -> Result<Self> {
        let mut in_degree: HashMap<V, usize> = HashMap::with_capacity(storage.vertex_count());
        let mut queue = VecDeque::new();

        for vertex in storage.vertices() {
            let degree = storage.incoming_edges_of(vertex)?.len();
            in_degree.insert(vertex.clone(), degree);
            if degree == 0 {
                queue.push_back(vertex.clone());
            }
        }

        let mut sorted = Vec::with_capacity(in_degree.len());
        while let Some(vertex) = queue.pop_front() {
            for edge in storage.outgoing_edges_of(&vertex)? {
                let Some(target) = storage.edge_target(*edge) else {
                    continue;
                };
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(target.clone());
                    }
                }
            }
            sorted.push(vertex);
        }

        if sorted.len() != in_degree.len() {
            debug!(
                sorted = sorted.len(),
                vertices = in_degree.len(),
                "storage contains a cycle"
            );
            return Err(GraphError::CycleDetected);
        }

        let mut dag = Self::empty(storage, config.visited, config.order_map);
        for vertex in sorted {
            dag.max_index += 1;
            dag.order.put(dag.max_index, vertex);
        }
        Ok(dag)
    }

    /// Install the supplier used by [`add_new_vertex`](Self::add_new_vertex).
    pub fn with_vertex_supplier<F>(mut self, supplier: F) -> Self
    where
        F: FnMut() -> V + 'static,
    {
        self.vertex_supplier = Some(Box::new(supplier));
        self
    }

    /// Create a vertex with the installed supplier and add it.
    ///
    /// Fails with [`GraphError::Unsupported`] if no supplier is installed and
    /// with [`GraphError::DuplicateVertex`] if the supplier repeats a vertex.
    pub fn add_new_vertex(&mut self) -> Result<V> {
        let supplier = self
            .vertex_supplier
            .as_mut()
            .ok_or(GraphError::Unsupported("no vertex supplier installed"))?;
        let vertex = supplier();
        if !self.add_vertex(vertex.clone()) {
            return Err(GraphError::DuplicateVertex);
        }
        Ok(vertex)
    }

    /// Add a vertex at the top of the order.
    ///
    /// Returns `false`, changing nothing, if the vertex is already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if !self.storage.add_vertex(vertex.clone()) {
            return false;
        }
        self.max_index += 1;
        self.order.put(self.max_index, vertex);
        self.modifications = self.modifications.wrapping_add(1);
        true
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// Returns `false` if the vertex was not present.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        if !self.storage.remove_vertex(vertex) {
            return false;
        }
        if let Some(index) = self.order.remove(vertex) {
            self.contract_bounds(index);
        }
        self.modifications = self.modifications.wrapping_add(1);
        true
    }

    /// Pull the index bounds back onto present vertices after a removal.
    ///
    /// Holes left inside the range are skipped by iteration.
    fn contract_bounds(&mut self, removed: TopoIndex) {
        if self.order.is_empty() {
            self.min_index = 0;
            self.max_index = -1;
            return;
        }
        if removed == self.min_index {
            while self.min_index < self.max_index && self.order.get(self.min_index).is_none() {
                self.min_index += 1;
            }
        }
        if removed == self.max_index {
            while self.max_index > self.min_index && self.order.get(self.max_index).is_none() {
                self.max_index -= 1;
            }
        }
        trace!(min = self.min_index, max = self.max_index, "contracted index bounds");
    }

    /// Add an edge from `source` to `target`, repairing the order if needed.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] if either vertex is absent.
    /// - [`GraphError::CycleDetected`] if `target` already reaches `source`.
    ///   Nothing is modified.
    /// - Any error from the storage (duplicate edge, self-loop). The order may
    ///   already have been repaired at that point; it remains a valid order
    ///   for the unchanged edge set.
    pub fn add_edge(&mut self, source: &V, target: &V) -> Result<S::Edge> {
        let (Some(upper), Some(lower)) = (self.order.index_of(source), self.order.index_of(target)) else {
            return Err(GraphError::NotFound);
        };

        if lower < upper {
            let region = Region::new(lower, upper)?;
            let mut visited = self.visited_for(region);

            let forward = match self.discover_forward(target, region, &mut visited) {
                Ok(forward) => forward,
                Err(err) => {
                    if err == GraphError::CycleDetected {
                        debug!(source = upper, target = lower, "rejected edge: would induce a cycle");
                    }
                    self.recycle(visited);
                    return Err(err);
                }
            };
            let backward = match self.discover_backward(source, &mut visited) {
                Ok(backward) => backward,
                Err(err) => {
                    self.recycle(visited);
                    return Err(err);
                }
            };
            self.recycle(visited);

            debug!(
                start = region.start(),
                finish = region.finish(),
                forward = forward.len(),
                backward = backward.len(),
                "reordering affected region"
            );
            self.reorder(forward, backward);
            self.modifications = self.modifications.wrapping_add(1);
            debug_assert!(self.validate_order());
        }

        self.storage.add_edge(source, target)
    }

    /// Remove one edge from `source` to `target`. The order is left as is.
    pub fn remove_edge(&mut self, source: &V, target: &V) -> Option<S::Edge> {
        self.storage.remove_edge(source, target)
    }

    /// Remove an edge by id. The order is left as is.
    pub fn remove_edge_by_id(&mut self, edge: S::Edge) -> bool {
        self.storage.remove_edge_by_id(edge)
    }

    fn visited_for(&mut self, region: Region) -> VisitedStrategy {
        match self.visited.take() {
            Some(mut visited) => {
                visited.rescope(region);
                visited
            }
            None => VisitedStrategy::new(self.visited_kind, region),
        }
    }

    fn recycle(&mut self, visited: VisitedStrategy) {
        if visited.kind() == VisitedStrategyKind::Array {
            self.visited = Some(visited);
        }
    }

    fn index_of_present(&self, vertex: &V) -> Result<TopoIndex> {
        self.order.index_of(vertex).ok_or(GraphError::NotFound)
    }

    /// Collect the vertices reachable from `target` inside `region`.
    ///
    /// Fails with [`GraphError::CycleDetected`] on reaching the vertex at
    /// `region.finish()`, which is the new edge's source.
    fn discover_forward(
        &self,
        target: &V,
        region: Region,
        visited: &mut VisitedStrategy,
    ) -> Result<Discovered<V>> {
        let mut found = Vec::new();
        let mut stack = vec![target.clone()];

        while let Some(vertex) = stack.pop() {
            let index = self.index_of_present(&vertex)?;
            if visited.is_visited(index) {
                continue;
            }
            visited.mark_visited(index);

            for edge in self.storage.outgoing_edges_of(&vertex)? {
                let Some(next) = self.storage.edge_target(*edge) else {
                    continue;
                };
                let next_index = self.index_of_present(next)?;
                if next_index == region.finish() {
                    found.push((index, vertex));
                    Self::unmark(visited, &found);
                    return Err(GraphError::CycleDetected);
                }
                if region.contains(next_index) && !visited.is_visited(next_index) {
                    stack.push(next.clone());
                }
            }
            found.push((index, vertex));
        }

        Ok(found)
    }

    /// Collect the vertices inside the region that can reach `source`.
    fn discover_backward(&self, source: &V, visited: &mut VisitedStrategy) -> Result<Discovered<V>> {
        let region = visited.region();
        let mut found = Vec::new();
        let mut stack = vec![source.clone()];

        while let Some(vertex) = stack.pop() {
            let index = self.index_of_present(&vertex)?;
            if visited.is_visited(index) {
                continue;
            }
            visited.mark_visited(index);

            for edge in self.storage.incoming_edges_of(&vertex)? {
                let Some(prev) = self.storage.edge_source(*edge) else {
                    continue;
                };
                let prev_index = self.index_of_present(prev)?;
                if region.contains(prev_index) && !visited.is_visited(prev_index) {
                    stack.push(prev.clone());
                }
            }
            found.push((index, vertex));
        }

        Ok(found)
    }

    /// Best-effort unmarking; strategies that cannot clear are dropped anyway.
    fn unmark(visited: &mut VisitedStrategy, found: &Discovered<V>) {
        for (index, _) in found {
            if let Err(err) = visited.clear_visited(*index) {
                trace!(%err, "visited marks left in place");
                return;
            }
        }
    }

    /// Hand the pooled indices back out, backward set first.
    fn reorder(&mut self, mut forward: Discovered<V>, mut backward: Discovered<V>) {
        forward.sort_unstable_by_key(|(index, _)| *index);
        backward.sort_unstable_by_key(|(index, _)| *index);

        let mut indices: Vec<TopoIndex> = backward
            .iter()
            .chain(forward.iter())
            .map(|(index, _)| *index)
            .collect();
        indices.sort_unstable();

        let vertices = backward.into_iter().chain(forward).map(|(_, vertex)| vertex);
        for (index, vertex) in indices.into_iter().zip(vertices) {
            self.order.put(index, vertex);
        }
    }

    /// Every vertex that can reach `vertex`, excluding `vertex` itself.
    pub fn ancestors(&self, vertex: &V) -> Result<IndexSet<V>> {
        if !self.storage.contains_vertex(vertex) {
            return Err(GraphError::NotFound);
        }
        Ok(DepthFirst::new(Reversed::new(&self.storage), vertex.clone())
            .filter(|v| v != vertex)
            .collect())
    }

    /// Every vertex reachable from `vertex`, excluding `vertex` itself.
    pub fn descendants(&self, vertex: &V) -> Result<IndexSet<V>> {
        if !self.storage.contains_vertex(vertex) {
            return Err(GraphError::NotFound);
        }
        Ok(DepthFirst::new(Forward::new(&self.storage), vertex.clone())
            .filter(|v| v != vertex)
            .collect())
    }

    /// Check if a vertex is present.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.storage.contains_vertex(vertex)
    }

    /// Check if an edge from `source` to `target` is present.
    pub fn contains_edge(&self, source: &V, target: &V) -> bool {
        self.storage.contains_edge(source, target)
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.storage.vertex_count()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.storage.edge_count()
    }

    /// Check if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// The vertex's current topological index.
    ///
    /// Indices are a witness of the order, not stable identifiers: any edge
    /// insertion may reassign them.
    pub fn topological_index(&self, vertex: &V) -> Option<TopoIndex> {
        self.order.index_of(vertex)
    }

    /// Bumped whenever any vertex's index is assigned, changed, or dropped.
    pub fn modification_count(&self) -> u64 {
        self.modifications
    }

    /// Read-only access to the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The visited strategy used by order repairs.
    pub fn visited_strategy(&self) -> VisitedStrategyKind {
        self.visited_kind
    }

    /// The layout of the vertex/index map.
    pub fn order_map_kind(&self) -> OrderMapKind {
        self.order.kind()
    }

    /// Iterate vertices in topological order.
    pub fn iter(&self) -> TopoIter<'_, V, S> {
        TopoIter::new(self)
    }

    /// A detached position in the topological order. See [`TopoCursor`].
    pub fn cursor(&self) -> TopoCursor {
        TopoCursor::new(self.min_index, self.modifications)
    }

    /// Snapshot of all vertices in topological order.
    pub fn topological_order(&self) -> Vec<V> {
        self.iter().cloned().collect()
    }

    pub(crate) fn index_bounds(&self) -> (TopoIndex, TopoIndex) {
        (self.min_index, self.max_index)
    }

    pub(crate) fn vertex_at(&self, index: TopoIndex) -> Option<&V> {
        self.order.get(index)
    }

    pub(crate) fn check_modifications(&self, expected: u64) -> Result<()> {
        if self.modifications != expected {
            return Err(GraphError::ConcurrentMutation {
                expected,
                found: self.modifications,
            });
        }
        Ok(())
    }

    /// Check that the order is a bijection over the stored vertices and that
    /// every stored edge points forward in it.
    pub fn validate_order(&self) -> bool {
        if self.order.len() != self.storage.vertex_count() {
            return false;
        }

        for vertex in self.storage.vertices() {
            let Some(index) = self.order.index_of(vertex) else {
                return false;
            };
            if index < self.min_index || index > self.max_index {
                return false;
            }
            if self.order.get(index) != Some(vertex) {
                return false;
            }
        }

        self.storage.edges().all(|edge| {
            let source = self.storage.edge_source(edge).and_then(|v| self.order.index_of(v));
            let target = self.storage.edge_target(edge).and_then(|v| self.order.index_of(v));
            matches!((source, target), (Some(s), Some(t)) if s < t)
        })
    }
}

impl<'a, V, S> IntoIterator for &'a DirectedAcyclicGraph<V, S>
where
    V: Clone + Eq + Hash,
    S: GraphStorage<Vertex = V>,
{
    type Item = &'a V;
    type IntoIter = TopoIter<'a, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, S> fmt::Debug for DirectedAcyclicGraph<V, S>
where
    V: Clone + Eq + Hash,
    S: GraphStorage<Vertex = V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectedAcyclicGraph")
            .field("vertices", &self.storage.vertex_count())
            .field("edges", &self.storage.edge_count())
            .field("min_index", &self.min_index)
            .field("max_index", &self.max_index)
            .field("modifications", &self.modifications)
            .field("visited", &self.visited_kind)
            .field("order_map", &self.order.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [VisitedStrategyKind; 4] = [
        VisitedStrategyKind::BitSet,
        VisitedStrategyKind::Array,
        VisitedStrategyKind::HashSet,
        VisitedStrategyKind::FixedArray,
    ];

    fn dag_with(kind: VisitedStrategyKind, order_map: OrderMapKind) -> DirectedAcyclicGraph<u32> {
        DirectedAcyclicGraph::with_config(DagConfig::default().with_visited(kind).with_order_map(order_map))
    }

    #[test]
    fn vertices_take_increasing_indices() {
        let mut dag = DirectedAcyclicGraph::new();
        for v in 0..4u32 {
            assert!(dag.add_vertex(v));
        }
        assert!(!dag.add_vertex(2));

        for v in 0..4u32 {
            assert_eq!(dag.topological_index(&v), Some(i64::from(v)));
        }
        assert_eq!(dag.modification_count(), 4);
    }

    #[test]
    fn consistent_edge_leaves_indices_alone() {
        let mut dag = DirectedAcyclicGraph::new();
        for v in 0..3u32 {
            dag.add_vertex(v);
        }
        let before = dag.modification_count();

        dag.add_edge(&0, &2).unwrap();

        assert_eq!(dag.modification_count(), before);
        assert_eq!(dag.topological_index(&0), Some(0));
        assert_eq!(dag.topological_index(&2), Some(2));
    }

    #[test]
    fn back_edge_reorders_region_only() {
        for kind in STRATEGIES {
            for order_map in [OrderMapKind::Hashed, OrderMapKind::Dense] {
                let mut dag = dag_with(kind, order_map);
                for v in 0..6u32 {
                    dag.add_vertex(v);
                }
                dag.add_edge(&1, &2).unwrap();

                // 4 -> 1 forces region [1, 4].
                dag.add_edge(&4, &1).unwrap();

                assert!(dag.validate_order(), "{kind:?} {order_map:?}");
                assert_eq!(dag.topological_index(&0), Some(0));
                assert_eq!(dag.topological_index(&5), Some(5));
                assert!(dag.topological_index(&4) < dag.topological_index(&1));
                assert!(dag.topological_index(&1) < dag.topological_index(&2));
            }
        }
    }

    #[test]
    fn cycle_is_rejected_without_changes() {
        for kind in STRATEGIES {
            let mut dag = dag_with(kind, OrderMapKind::Dense);
            for v in 0..4u32 {
                dag.add_vertex(v);
            }
            dag.add_edge(&0, &1).unwrap();
            dag.add_edge(&1, &2).unwrap();
            dag.add_edge(&2, &3).unwrap();

            let indices: Vec<_> = (0..4u32).map(|v| dag.topological_index(&v)).collect();
            let modifications = dag.modification_count();

            assert_eq!(dag.add_edge(&3, &0), Err(GraphError::CycleDetected));
            assert_eq!(dag.add_edge(&2, &1), Err(GraphError::CycleDetected));

            assert_eq!(dag.edge_count(), 3);
            assert_eq!(dag.modification_count(), modifications);
            let after: Vec<_> = (0..4u32).map(|v| dag.topological_index(&v)).collect();
            assert_eq!(indices, after);

            // The engine is still usable afterwards.
            dag.add_edge(&0, &3).unwrap();
            assert!(dag.validate_order());
        }
    }

    #[test]
    fn missing_vertices_are_reported() {
        let mut dag = DirectedAcyclicGraph::new();
        dag.add_vertex(1u32);
        assert_eq!(dag.add_edge(&1, &9), Err(GraphError::NotFound));
        assert_eq!(dag.add_edge(&9, &1), Err(GraphError::NotFound));
        assert_eq!(dag.ancestors(&9), Err(GraphError::NotFound));
        assert_eq!(dag.descendants(&9), Err(GraphError::NotFound));
    }

    #[test]
    fn storage_errors_propagate() {
        let mut dag = DirectedAcyclicGraph::new();
        dag.add_vertex('a');
        dag.add_vertex('b');

        assert_eq!(dag.add_edge(&'a', &'a'), Err(GraphError::LoopNotPermitted));
        dag.add_edge(&'a', &'b').unwrap();
        assert_eq!(dag.add_edge(&'a', &'b'), Err(GraphError::DuplicateEdge));
        assert!(dag.validate_order());
    }

    #[test]
    fn duplicate_back_edge_is_refused_by_storage() {
        let mut dag = DirectedAcyclicGraph::with_config(DagConfig::default());
        dag.add_vertex('a');
        dag.add_vertex('b');
        dag.add_edge(&'b', &'a').unwrap();

        assert_eq!(dag.add_edge(&'b', &'a'), Err(GraphError::DuplicateEdge));
        assert_eq!(dag.edge_count(), 1);
        assert!(dag.validate_order());
    }

    #[test]
    fn removal_contracts_bounds() {
        let mut dag = DirectedAcyclicGraph::new();
        for v in 0..4u32 {
            dag.add_vertex(v);
        }

        dag.remove_vertex(&3);
        assert_eq!(dag.index_bounds(), (0, 2));

        dag.remove_vertex(&0);
        assert_eq!(dag.index_bounds(), (1, 2));

        // Hole in the middle stays; the bounds still point at present vertices.
        dag.add_vertex(7);
        dag.remove_vertex(&2);
        assert_eq!(dag.index_bounds(), (1, 3));
        assert_eq!(dag.topological_order(), vec![1, 7]);

        dag.remove_vertex(&1);
        dag.remove_vertex(&7);
        assert!(dag.is_empty());
        assert_eq!(dag.index_bounds(), (0, -1));

        dag.add_vertex(9);
        assert_eq!(dag.topological_index(&9), Some(0));
    }

    #[test]
    fn removing_absent_vertex_changes_nothing() {
        let mut dag: DirectedAcyclicGraph<u32> = DirectedAcyclicGraph::new();
        assert!(!dag.remove_vertex(&3));
        assert_eq!(dag.modification_count(), 0);
    }

    #[test]
    fn removing_edge_keeps_order() {
        let mut dag = DirectedAcyclicGraph::new();
        dag.add_vertex(0u32);
        dag.add_vertex(1);
        dag.add_edge(&1, &0).unwrap();
        let order = dag.topological_order();
        let modifications = dag.modification_count();

        assert!(dag.remove_edge(&1, &0).is_some());
        assert!(dag.remove_edge(&1, &0).is_none());
        assert_eq!(dag.topological_order(), order);
        assert_eq!(dag.modification_count(), modifications);
    }

    #[test]
    fn vertex_supplier_creates_vertices() {
        let mut dag = DirectedAcyclicGraph::with_vertex_ids();
        let a = dag.add_new_vertex().unwrap();
        let b = dag.add_new_vertex().unwrap();
        assert_ne!(a, b);
        dag.add_edge(&b, &a).unwrap();
        assert_eq!(dag.topological_order(), vec![b, a]);

        let mut plain: DirectedAcyclicGraph<u8> = DirectedAcyclicGraph::new();
        assert!(matches!(plain.add_new_vertex(), Err(GraphError::Unsupported(_))));

        let mut repeating = DirectedAcyclicGraph::new().with_vertex_supplier(|| 1u8);
        assert_eq!(repeating.add_new_vertex(), Ok(1));
        assert_eq!(repeating.add_new_vertex(), Err(GraphError::DuplicateVertex));
    }

    #[test]
    fn from_storage_orders_existing_graph() {
        let mut storage = AdjacencyStorage::new();
        for v in ["c", "b", "a"] {
            storage.add_vertex(v);
        }
        storage.add_edge(&"a", &"b").unwrap();
        storage.add_edge(&"b", &"c").unwrap();

        let dag = DirectedAcyclicGraph::from_storage(storage, DagConfig::default()).unwrap();
        assert_eq!(dag.topological_order(), vec!["a", "b", "c"]);
        assert!(dag.validate_order());
    }

    #[test]
    fn from_storage_keeps_storage_edge_policy() {
        let mut storage = AdjacencyStorage::new();
        storage.add_vertex(0u32);
        storage.add_vertex(1);
        storage.add_edge(&0, &1).unwrap();

        let config = DagConfig::default()
            .with_multiple_edges(true)
            .with_visited(VisitedStrategyKind::HashSet)
            .with_order_map(OrderMapKind::Hashed);
        let mut dag = DirectedAcyclicGraph::from_storage(storage, config).unwrap();

        assert_eq!(dag.add_edge(&0, &1), Err(GraphError::DuplicateEdge));
        assert!(!dag.storage().allows_multiple_edges());
        assert_eq!(dag.visited_strategy(), VisitedStrategyKind::HashSet);
        assert_eq!(dag.order_map_kind(), OrderMapKind::Hashed);
    }

    #[test]
    fn from_storage_rejects_cycles() {
        let mut storage = AdjacencyStorage::new();
        for v in 0..3u32 {
            storage.add_vertex(v);
        }
        storage.add_edge(&0, &1).unwrap();
        storage.add_edge(&1, &2).unwrap();
        storage.add_edge(&2, &0).unwrap();

        assert!(matches!(
            DirectedAcyclicGraph::from_storage(storage, DagConfig::default()),
            Err(GraphError::CycleDetected)
        ));
    }

    #[test]
    fn array_strategy_reuses_marks() {
        let mut dag = dag_with(VisitedStrategyKind::Array, OrderMapKind::Dense);
        for v in 0..5u32 {
            dag.add_vertex(v);
        }
        dag.add_edge(&4, &0).unwrap();
        assert!(dag.visited.is_some());
        dag.add_edge(&3, &1).unwrap();
        assert!(dag.validate_order());

        let mut bits = dag_with(VisitedStrategyKind::BitSet, OrderMapKind::Dense);
        bits.add_vertex(0);
        bits.add_vertex(1);
        bits.add_edge(&1, &0).unwrap();
        assert!(bits.visited.is_none());
    }
}
