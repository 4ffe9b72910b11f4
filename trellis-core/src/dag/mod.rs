//! Directed Acyclic Graph
//!
//! A mutable DAG that maintains a topological order incrementally as edges
//! are inserted, refusing any edge that would close a cycle.
//!
//! # Architecture
//!
//! - [`DirectedAcyclicGraph`]: the engine, layered over a [`GraphStorage`](crate::graph::GraphStorage)
//! - [`OrderMap`]: the vertex/index bijection
//! - [`Region`]: the index span an insertion may reorder
//! - [`VisitedStrategy`]: marks used by the discovery searches
//! - [`TopoIter`] / [`TopoCursor`]: iteration in topological order

mod engine;
mod order_map;
mod region;
mod topo_iter;
mod visited;

/// A position in the topological order. May be negative.
pub type TopoIndex = i64;

pub use engine::DirectedAcyclicGraph;
pub use order_map::{DenseOrderMap, HashedOrderMap, OrderMap, OrderMapKind, TopoOrderMap};
pub use region::Region;
pub use topo_iter::{TopoCursor, TopoIter};
pub use visited::{VisitedStrategy, VisitedStrategyKind};
