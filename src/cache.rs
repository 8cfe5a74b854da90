//! Incremental layout caches.
//!
//! Two best-effort memos and one externally owned dirty set. Correctness
//! never depends on any of them; they only prune recomputation. All three
//! are plain values threaded through every call, so there is no hidden
//! global to reset between frames or tests.

use std::collections::{HashMap, HashSet};

use crate::geometry::Size;
use crate::node::NodeId;

/// Nodes whose subtree changed since the last layout.
///
/// Owned by the embedder; the engine only reads membership and prunes
/// entries whose realized size proved unchanged.
pub type DirtySet = HashSet<NodeId>;

/// Per-node memos carried across frames.
#[derive(Debug, Default)]
pub struct LayoutCache {
    /// Last realized size per flow child.
    prev_size: HashMap<NodeId, Size>,
    /// Whether a node's cross size can change when its main size does
    /// (wrapping text, wrap containers). Settled on first measure.
    main_size_sensitive: HashMap<NodeId, bool>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last realized size, if this node has been laid out before.
    pub fn prev_size(&self, id: NodeId) -> Option<Size> {
        self.prev_size.get(&id).copied()
    }

    /// Record a realized size after layout.
    pub fn record_size(&mut self, id: NodeId, size: Size) {
        self.prev_size.insert(id, size);
    }

    /// Whether this node needs a re-measure when its final main size
    /// differs from the size it was measured at. None = not yet known.
    pub fn main_size_sensitive(&self, id: NodeId) -> Option<bool> {
        self.main_size_sensitive.get(&id).copied()
    }

    /// Memoize main-size sensitivity.
    pub fn mark_main_size_sensitive(&mut self, id: NodeId, sensitive: bool) {
        self.main_size_sensitive.insert(id, sensitive);
    }

    /// Drop all memos for one node.
    ///
    /// Embedders must call this when an id is reused for a structurally
    /// different node.
    pub fn forget(&mut self, id: NodeId) {
        self.prev_size.remove(&id);
        self.main_size_sensitive.remove(&id);
    }

    /// Drop every memo.
    pub fn clear(&mut self) {
        self.prev_size.clear();
        self.main_size_sensitive.clear();
    }

    /// Number of nodes with a cached size, for instrumentation.
    pub fn len(&self) -> usize {
        self.prev_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prev_size.is_empty()
    }
}
