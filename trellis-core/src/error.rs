//! Error types for graph and DAG operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by the storage layer and the DAG engine.
///
/// Every failure leaves the graph in a valid, usable state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A referenced vertex is not present in the graph.
    #[error("vertex not found in graph")]
    NotFound,

    /// The requested edge would close a cycle.
    #[error("edge would induce a cycle")]
    CycleDetected,

    /// A vertex supplier produced a vertex that is already present.
    #[error("vertex already present in graph")]
    DuplicateVertex,

    /// The graph was mutated after a topological cursor was created.
    #[error("graph modified during iteration (expected modification {expected}, found {found})")]
    ConcurrentMutation { expected: u64, found: u64 },

    /// The storage does not accept parallel edges and one already exists.
    #[error("edge already present and multiple edges are not permitted")]
    DuplicateEdge,

    /// Self-loops are never stored.
    #[error("loops are not permitted")]
    LoopNotPermitted,

    /// A region was requested with `start > finish`.
    #[error("invalid region [{start}, {finish}]")]
    InvalidRegion { start: i64, finish: i64 },

    /// The operation is not supported by this implementation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
