//! Affected Region
//!
//! The inclusive span of topological indices an edge insertion may reorder.

use crate::error::{GraphError, Result};

use super::TopoIndex;

/// An inclusive interval `[start, finish]` of topological indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    start: TopoIndex,
    finish: TopoIndex,
}

impl Region {
    /// Create a region. Fails if `start > finish`.
    pub fn new(start: TopoIndex, finish: TopoIndex) -> Result<Self> {
        if start > finish {
            return Err(GraphError::InvalidRegion { start, finish });
        }
        Ok(Self { start, finish })
    }

    /// Lowest index in the region.
    pub fn start(&self) -> TopoIndex {
        self.start
    }

    /// Highest index in the region.
    pub fn finish(&self) -> TopoIndex {
        self.finish
    }

    /// Number of indices covered, `finish - start + 1`, saturating at `usize::MAX`.
    pub fn size(&self) -> usize {
        usize::try_from(self.finish.abs_diff(self.start)).map_or(usize::MAX, |span| span.saturating_add(1))
    }

    /// Whether `index` lies within `[start, finish]`.
    #[inline]
    pub fn contains(&self, index: TopoIndex) -> bool {
        self.start <= index && index <= self.finish
    }

    /// Zero-based slot of `index` within the region. Caller checks `contains` first.
    #[inline]
    pub(crate) fn offset(&self, index: TopoIndex) -> usize {
        debug_assert!(self.contains(index));
        usize::try_from(index.abs_diff(self.start)).unwrap_or(usize::MAX)
    }
}
