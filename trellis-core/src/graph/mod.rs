//! Graph Storage and Traversal
//!
//! This module holds the pieces the DAG engine builds on:
//!
//! - `storage`: the [`GraphStorage`] contract and the default adjacency-list
//!   implementation that owns vertices and edges
//! - `vertex`: identities for graph-created vertices and storage-issued edges
//! - `view`: forward and reversed successor views over a storage
//! - `traversal`: iterative depth-first reachability over any view
//!
//! Nothing here knows about topological order. The storage accepts any
//! directed edge except a self-loop; keeping the graph acyclic is the job of
//! [`crate::dag::DirectedAcyclicGraph`].

mod storage;
mod traversal;
mod vertex;
mod view;

pub use storage::{AdjacencyStorage, GraphStorage};
pub use traversal::DepthFirst;
pub use vertex::{EdgeId, VertexId};
pub use view::{DirectedNeighbors, Forward, Reversed, Successors};
