//! Topological Order Map
//!
//! The bijection between present vertices and their topological indices.
//!
//! Two layouts are available:
//!
//! - [`HashedOrderMap`]: a pair of hash maps. Works for any index
//!   distribution, including very sparse or very negative indices.
//! - [`DenseOrderMap`]: a growable slot array for index → vertex plus a hash
//!   map for vertex → index. Signed indices are folded onto array slots with a
//!   zig-zag transform (`i >= 0 → 2i`, `i < 0 → -2i - 1`) so the order can grow
//!   in either direction. The array grows by doubling.
//!
//! `put` overwrites any prior association of either the index or the vertex,
//! which lets a reorder reassign a permutation of indices one entry at a time.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::TopoIndex;

/// The vertex/index association contract.
pub trait TopoOrderMap<V> {
    /// Associate `index` with `vertex`, dropping any previous association of either.
    fn put(&mut self, index: TopoIndex, vertex: V);

    fn get(&self, index: TopoIndex) -> Option<&V>;

    fn index_of(&self, vertex: &V) -> Option<TopoIndex>;

    /// Remove `vertex` from both directions, returning its former index.
    fn remove(&mut self, vertex: &V) -> Option<TopoIndex>;

    /// Number of associated vertices.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selects an order map layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMapKind {
    /// Two hash maps.
    Hashed,

    /// Zig-zag indexed slot array plus a hash map.
    #[default]
    Dense,
}

/// Order map backed by two hash maps.
#[derive(Debug, Clone)]
pub struct HashedOrderMap<V> {
    by_index: HashMap<TopoIndex, V>,
    by_vertex: HashMap<V, TopoIndex>,
}

impl<V> HashedOrderMap<V>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty hashed order map.
    pub fn new() -> Self {
        Self {
            by_index: HashMap::new(),
            by_vertex: HashMap::new(),
        }
    }
}

impl<V> Default for HashedOrderMap<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TopoOrderMap<V> for HashedOrderMap<V>
where
    V: Clone + Eq + Hash,
{
    fn put(&mut self, index: TopoIndex, vertex: V) {
        if let Some(old) = self.by_vertex.insert(vertex.clone(), index) {
            if old != index && self.by_index.get(&old) == Some(&vertex) {
                self.by_index.remove(&old);
            }
        }
        if let Some(previous) = self.by_index.insert(index, vertex.clone()) {
            if previous != vertex && self.by_vertex.get(&previous) == Some(&index) {
                self.by_vertex.remove(&previous);
            }
        }
    }

    fn get(&self, index: TopoIndex) -> Option<&V> {
        self.by_index.get(&index)
    }

    fn index_of(&self, vertex: &V) -> Option<TopoIndex> {
        self.by_vertex.get(vertex).copied()
    }

    fn remove(&mut self, vertex: &V) -> Option<TopoIndex> {
        let index = self.by_vertex.remove(vertex)?;
        self.by_index.remove(&index);
        Some(index)
    }

    fn len(&self) -> usize {
        self.by_vertex.len()
    }
}

/// Fold a signed index onto a non-negative slot.
#[inline]
fn zigzag(index: TopoIndex) -> usize {
    if index >= 0 {
        (index as usize) << 1
    } else {
        ((-(index + 1)) as usize) << 1 | 1
    }
}

/// Order map backed by a zig-zag indexed slot array.
#[derive(Debug, Clone)]
pub struct DenseOrderMap<V> {
    slots: Vec<Option<V>>,
    by_vertex: HashMap<V, TopoIndex>,
}

impl<V> DenseOrderMap<V>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty dense order map.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_vertex: HashMap::new(),
        }
    }

    /// Number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, index: TopoIndex) -> &mut Option<V> {
        let slot = zigzag(index);
        if slot >= self.slots.len() {
            let grown = (slot + 1).max(self.slots.len() * 2);
            self.slots.resize(grown, None);
        }
        &mut self.slots[slot]
    }
}

impl<V> Default for DenseOrderMap<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TopoOrderMap<V> for DenseOrderMap<V>
where
    V: Clone + Eq + Hash,
{
    fn put(&mut self, index: TopoIndex, vertex: V) {
        if let Some(old) = self.by_vertex.insert(vertex.clone(), index) {
            if old != index && self.get(old) == Some(&vertex) {
                *self.slot_mut(old) = None;
            }
        }
        if let Some(previous) = self.slot_mut(index).replace(vertex.clone()) {
            if previous != vertex && self.by_vertex.get(&previous) == Some(&index) {
                self.by_vertex.remove(&previous);
            }
        }
    }

    fn get(&self, index: TopoIndex) -> Option<&V> {
        self.slots.get(zigzag(index)).and_then(Option::as_ref)
    }

    fn index_of(&self, vertex: &V) -> Option<TopoIndex> {
        self.by_vertex.get(vertex).copied()
    }

    fn remove(&mut self, vertex: &V) -> Option<TopoIndex> {
        let index = self.by_vertex.remove(vertex)?;
        if let Some(slot) = self.slots.get_mut(zigzag(index)) {
            *slot = None;
        }
        Some(index)
    }

    fn len(&self) -> usize {
        self.by_vertex.len()
    }
}

/// An order map of either layout, chosen at construction.
#[derive(Debug, Clone)]
pub enum OrderMap<V> {
    Hashed(HashedOrderMap<V>),
    Dense(DenseOrderMap<V>),
}

impl<V> OrderMap<V>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty order map of the given layout.
    pub fn new(kind: OrderMapKind) -> Self {
        match kind {
            OrderMapKind::Hashed => Self::Hashed(HashedOrderMap::new()),
            OrderMapKind::Dense => Self::Dense(DenseOrderMap::new()),
        }
    }

    /// The layout in use.
    pub fn kind(&self) -> OrderMapKind {
        match self {
            Self::Hashed(_) => OrderMapKind::Hashed,
            Self::Dense(_) => OrderMapKind::Dense,
        }
    }
}

impl<V> TopoOrderMap<V> for OrderMap<V>
where
    V: Clone + Eq + Hash,
{
    fn put(&mut self, index: TopoIndex, vertex: V) {
        match self {
            Self::Hashed(map) => map.put(index, vertex),
            Self::Dense(map) => map.put(index, vertex),
        }
    }

    fn get(&self, index: TopoIndex) -> Option<&V> {
        match self {
            Self::Hashed(map) => map.get(index),
            Self::Dense(map) => map.get(index),
        }
    }

    fn index_of(&self, vertex: &V) -> Option<TopoIndex> {
        match self {
            Self::Hashed(map) => map.index_of(vertex),
            Self::Dense(map) => map.index_of(vertex),
        }
    }

    fn remove(&mut self, vertex: &V) -> Option<TopoIndex> {
        match self {
            Self::Hashed(map) => map.remove(vertex),
            Self::Dense(map) => map.remove(vertex),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Hashed(map) => map.len(),
            Self::Dense(map) => map.len(),
        }
    }
}
