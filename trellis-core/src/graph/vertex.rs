//! Vertex and Edge Identities
//!
//! The engine works with any caller-supplied vertex type. `VertexId` is the
//! identity handed out when the graph is asked to create a vertex itself.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identity of a vertex created by [`DirectedAcyclicGraph::add_new_vertex`].
///
/// Ids come from one process-wide sequence, so ids issued to different graphs
/// never collide. Issue order is preserved by `Ord`. Serialized as the bare
/// number and displayed as `v<n>`.
///
/// [`DirectedAcyclicGraph::add_new_vertex`]: crate::dag::DirectedAcyclicGraph::add_new_vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u64);

impl VertexId {
    /// Issue the next id in the sequence.
    pub fn issue() -> Self {
        static SEQUENCE: AtomicU64 = AtomicU64::new(0);
        Self(SEQUENCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Position of this id in the issue sequence.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Opaque identity of an edge held by a storage.
///
/// Ids are issued by the storage that created the edge and are never reused
/// within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u64);

impl EdgeId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}
