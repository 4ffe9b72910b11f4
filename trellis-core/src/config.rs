//! Engine Configuration
//!
//! Selects the storage tradeoffs used by a [`DirectedAcyclicGraph`]. The
//! defaults favour dense, insert-heavy workloads.
//!
//! Configuration can be built in code or read from JSON:
//!
//! ```rust
//! use trellis_core::{DagConfig, OrderMapKind, VisitedStrategyKind};
//!
//! let config = DagConfig::from_json(r#"{"visited": "hash_set", "order_map": "hashed"}"#).unwrap();
//! assert_eq!(config.visited, VisitedStrategyKind::HashSet);
//! assert_eq!(config.order_map, OrderMapKind::Hashed);
//! assert!(!config.allow_multiple_edges);
//! ```
//!
//! [`DirectedAcyclicGraph`]: crate::dag::DirectedAcyclicGraph

use serde::{Deserialize, Serialize};

use crate::dag::{OrderMapKind, VisitedStrategyKind};

/// Options for constructing a DAG engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DagConfig {
    /// How discovery passes record visited indices.
    pub visited: VisitedStrategyKind,

    /// How the vertex/index bijection is stored.
    pub order_map: OrderMapKind,

    /// Whether the default storage accepts parallel edges.
    pub allow_multiple_edges: bool,
}

impl DagConfig {
    /// Parse a configuration from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize this configuration as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Set the visited strategy.
    pub fn with_visited(mut self, visited: VisitedStrategyKind) -> Self {
        self.visited = visited;
        self
    }

    /// Set the order map layout.
    pub fn with_order_map(mut self, order_map: OrderMapKind) -> Self {
        self.order_map = order_map;
        self
    }

    /// Set whether the default storage accepts parallel edges.
    pub fn with_multiple_edges(mut self, allow: bool) -> Self {
        self.allow_multiple_edges = allow;
        self
    }
}
