//! Trellis Core
//!
//! This crate provides a mutable directed acyclic graph that keeps a
//! topological order up to date as vertices and edges come and go.
//! It implements:
//!
//! - Cycle-refusing edge insertion with local order repair
//! - Pluggable vertex/index maps and visited-marking strategies
//! - Borrowing and detached iteration in topological order
//! - Ancestor and descendant queries
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Vertex and edge storage, views, and depth-first traversal
//! - `dag`: The incremental topological order engine
//! - `config`: Engine options, loadable from JSON
//! - `error`: The shared error type
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{DirectedAcyclicGraph, GraphError};
//!
//! let mut dag = DirectedAcyclicGraph::new();
//! for task in ["link", "compile", "fetch"] {
//!     dag.add_vertex(task);
//! }
//!
//! dag.add_edge(&"fetch", &"compile").unwrap();
//! dag.add_edge(&"compile", &"link").unwrap();
//!
//! // Closing the loop is refused and nothing changes.
//! assert_eq!(dag.add_edge(&"link", &"fetch"), Err(GraphError::CycleDetected));
//!
//! let order: Vec<_> = dag.iter().copied().collect();
//! assert_eq!(order, ["fetch", "compile", "link"]);
//! ```

pub mod config;
pub mod dag;
pub mod error;
pub mod graph;

pub use config::DagConfig;
pub use dag::{DirectedAcyclicGraph, OrderMapKind, TopoCursor, TopoIndex, TopoIter, VisitedStrategyKind};
pub use error::{GraphError, Result};
pub use graph::{AdjacencyStorage, EdgeId, GraphStorage, VertexId};
