//! Visited Marking
//!
//! A discovery pass marks the topological indices it has already explored.
//! Indices are always inside the current [`Region`], so each strategy only
//! needs storage proportional to the region, not to the whole graph.
//!
//! | Strategy     | Memory                       | `clear_visited` |
//! |--------------|------------------------------|-----------------|
//! | `BitSet`     | one bit per region slot      | yes             |
//! | `Array`      | one byte per slot, reused    | yes             |
//! | `HashSet`    | proportional to visits       | no              |
//! | `FixedArray` | one byte per slot, per pass  | no              |
//!
//! Strategies that decline `clear_visited` are cheaper to drop and rebuild
//! than to reset; the engine tolerates the refusal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::region::Region;
use super::TopoIndex;
use crate::error::{GraphError, Result};

/// Selects a visited-marking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitedStrategyKind {
    /// Word-packed bits sized to the region.
    #[default]
    BitSet,

    /// Boolean array that keeps its allocation across passes.
    Array,

    /// Hash set of visited indices.
    HashSet,

    /// Boolean array allocated once per pass.
    FixedArray,
}

impl VisitedStrategyKind {
    /// Whether strategies of this kind can unmark a single index.
    pub fn supports_clear(self) -> bool {
        matches!(self, Self::BitSet | Self::Array)
    }
}

const WORD_BITS: usize = 64;

#[derive(Debug, Clone)]
enum Marks {
    BitSet(Vec<u64>),
    Array(Vec<bool>),
    HashSet(HashSet<TopoIndex>),
    FixedArray(Box<[bool]>),
}

/// Visited marks for one region.
///
/// Indices outside the region are never reported as visited and marking them
/// has no effect.
#[derive(Debug, Clone)]
pub struct VisitedStrategy {
    region: Region,
    marks: Marks,
}

impl VisitedStrategy {
    /// Allocate marks of the given kind for `region`, all unvisited.
    pub fn new(kind: VisitedStrategyKind, region: Region) -> Self {
        let size = region.size();
        let marks = match kind {
            VisitedStrategyKind::BitSet => Marks::BitSet(vec![0; size.div_ceil(WORD_BITS)]),
            VisitedStrategyKind::Array => Marks::Array(vec![false; size]),
            VisitedStrategyKind::HashSet => Marks::HashSet(HashSet::new()),
            VisitedStrategyKind::FixedArray => Marks::FixedArray(vec![false; size].into_boxed_slice()),
        };
        Self { region, marks }
    }

    /// The strategy these marks were built with.
    pub fn kind(&self) -> VisitedStrategyKind {
        match self.marks {
            Marks::BitSet(_) => VisitedStrategyKind::BitSet,
            Marks::Array(_) => VisitedStrategyKind::Array,
            Marks::HashSet(_) => VisitedStrategyKind::HashSet,
            Marks::FixedArray(_) => VisitedStrategyKind::FixedArray,
        }
    }

    /// The region these marks cover.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Scope these marks to a new region with every index unvisited.
    ///
    /// The `Array` strategy keeps its allocation, growing it when the new
    /// region is larger. Every other strategy starts over.
    pub fn rescope(&mut self, region: Region) {
        if let Marks::Array(flags) = &mut self.marks {
            flags.clear();
            flags.resize(region.size(), false);
            self.region = region;
            return;
        }
        *self = Self::new(self.kind(), region);
    }

    /// Mark `index` as visited.
    pub fn mark_visited(&mut self, index: TopoIndex) {
        if !self.region.contains(index) {
            return;
        }
        let slot = self.region.offset(index);
        match &mut self.marks {
            Marks::BitSet(words) => words[slot / WORD_BITS] |= 1u64 << (slot % WORD_BITS),
            Marks::Array(flags) => flags[slot] = true,
            Marks::HashSet(set) => {
                set.insert(index);
            }
            Marks::FixedArray(flags) => flags[slot] = true,
        }
    }

    /// Whether `index` has been marked.
    pub fn is_visited(&self, index: TopoIndex) -> bool {
        if !self.region.contains(index) {
            return false;
        }
        let slot = self.region.offset(index);
        match &self.marks {
            Marks::BitSet(words) => words[slot / WORD_BITS] & (1u64 << (slot % WORD_BITS)) != 0,
            Marks::Array(flags) => flags[slot],
            Marks::HashSet(set) => set.contains(&index),
            Marks::FixedArray(flags) => flags[slot],
        }
    }

    /// Unmark a single index.
    ///
    /// `HashSet` and `FixedArray` marks refuse with [`GraphError::Unsupported`].
    pub fn clear_visited(&mut self, index: TopoIndex) -> Result<()> {
        let contained = self.region.contains(index);
        let slot = if contained { self.region.offset(index) } else { 0 };
        match &mut self.marks {
            Marks::BitSet(words) if contained => words[slot / WORD_BITS] &= !(1u64 << (slot % WORD_BITS)),
            Marks::Array(flags) if contained => flags[slot] = false,
            Marks::BitSet(_) | Marks::Array(_) => {}
            Marks::HashSet(_) => return Err(GraphError::Unsupported("hash-set visited marks cannot be cleared")),
            Marks::FixedArray(_) => {
                return Err(GraphError::Unsupported("fixed-array visited marks cannot be cleared"))
            }
        }
        Ok(())
    }
}
