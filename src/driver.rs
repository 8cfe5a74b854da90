//! Recursion seam between the stack algorithm and concrete node kinds.
//!
//! The stack resolver never matches on node kinds; it calls back through
//! [`LayoutDriver`] to measure and lay out children. [`TreeWalker`] is the
//! standard driver: it dispatches on [`NodeKind`], delegates leaf
//! measurement to the embedder's [`MeasureLeaf`], and borrows the memo
//! state from outside so incremental passes and cache lifetime stay under
//! the embedder's control.

use log::debug;

use crate::axis::Axis;
use crate::cache::{DirtySet, LayoutCache};
use crate::containers::{collection, overlay, split};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::node::{Node, NodeKind};
use crate::stack;
use crate::tree::LayoutTree;

// =============================================================================
// Hints
// =============================================================================

/// Size directives a parent passes when recursing into a child.
///
/// Forced dimensions commit the parent's allocation and win over the
/// child's own props; a precomputed size reuses an earlier measurement
/// for content-sized placement without re-measuring.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutHints {
    pub forced_width: Option<i32>,
    pub forced_height: Option<i32>,
    pub precomputed: Option<Size>,
}

impl LayoutHints {
    /// Hints that force both dimensions.
    pub fn forced(size: Size) -> Self {
        Self {
            forced_width: Some(size.width),
            forced_height: Some(size.height),
            precomputed: None,
        }
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Recursion callbacks plus access to the memo state.
///
/// `axis` is the parent's main axis; spacers extend along it and leaf
/// measurers may use it for orientation-dependent content.
pub trait LayoutDriver {
    /// Desired border-box size of `node` within the given bounds.
    fn measure_node(&mut self, node: &Node, max_w: i32, max_h: i32, axis: Axis) -> Result<Size>;

    /// Resolve `node` and its subtree at a committed position.
    #[allow(clippy::too_many_arguments)]
    fn layout_node(
        &mut self,
        node: &Node,
        x: i32,
        y: i32,
        max_w: i32,
        max_h: i32,
        axis: Axis,
        hints: LayoutHints,
    ) -> Result<LayoutTree>;

    fn cache(&mut self) -> &mut LayoutCache;

    fn dirty(&mut self) -> &mut DirtySet;
}

/// Content measurement for leaf nodes, supplied by the embedder.
pub trait MeasureLeaf {
    /// Natural border-box size of a leaf within the given bounds.
    fn measure(&mut self, node: &Node, max_w: i32, max_h: i32) -> Result<Size>;

    /// Whether the leaf's cross size depends on its main size, the way
    /// wrapping text trades width for height. Drives the re-measure pass
    /// after final main sizes settle.
    fn main_size_sensitive(&mut self, node: &Node) -> bool {
        let _ = node;
        false
    }
}

// =============================================================================
// TreeWalker
// =============================================================================

/// Standard driver: kind dispatch over externally owned memo state.
pub struct TreeWalker<'a, M> {
    leaf: M,
    cache: &'a mut LayoutCache,
    dirty: &'a mut DirtySet,
}

impl<'a, M: MeasureLeaf> TreeWalker<'a, M> {
    pub fn new(leaf: M, cache: &'a mut LayoutCache, dirty: &'a mut DirtySet) -> Self {
        Self { leaf, cache, dirty }
    }

    /// Measure the root's desired size within a viewport.
    pub fn measure_root(&mut self, node: &Node, width: i32, height: i32) -> Result<Size> {
        let axis = Axis::from_direction(node.props.direction);
        self.measure_node(node, width, height, axis)
    }

    /// Resolve a full frame: the root fills the viewport at (0, 0).
    ///
    /// On success every node is clean, so the dirty set drains.
    pub fn layout_root(&mut self, node: &Node, width: i32, height: i32) -> Result<LayoutTree> {
        debug!("layout root {} in {}x{} viewport", node.id, width, height);
        let axis = Axis::from_direction(node.props.direction);
        let hints = LayoutHints::forced(Size::new(width, height));
        let tree = self.layout_node(node, 0, 0, width, height, axis, hints)?;
        self.cache.record_size(node.id, tree.size());
        self.dirty.clear();
        Ok(tree)
    }
}

impl<M: MeasureLeaf> LayoutDriver for TreeWalker<'_, M> {
    fn measure_node(&mut self, node: &Node, max_w: i32, max_h: i32, axis: Axis) -> Result<Size> {
        match node.kind {
            k if k.is_collection() => collection::measure_collection(node, max_w, max_h),
            NodeKind::SplitPane | NodeKind::PanelGroup => {
                split::measure_split(node, max_w, max_h, self)
            }
            k if k.is_overlay() => overlay::measure_overlay(node, max_w, max_h, self),
            NodeKind::Spacer => {
                node.props.validate()?;
                Ok(axis.size(node.props.size.unwrap_or(0), 0))
            }
            k if k.is_leaf() => {
                node.props.validate()?;
                let size = self.leaf.measure(node, max_w, max_h)?;
                let sensitive = self.leaf.main_size_sensitive(node);
                self.cache.mark_main_size_sensitive(node.id, sensitive);
                Ok(size)
            }
            _ => stack::measure_stack(node, max_w, max_h, self),
        }
    }

    fn layout_node(
        &mut self,
        node: &Node,
        x: i32,
        y: i32,
        max_w: i32,
        max_h: i32,
        axis: Axis,
        hints: LayoutHints,
    ) -> Result<LayoutTree> {
        match node.kind {
            k if k.is_collection() => {
                collection::layout_collection(node, x, y, max_w, max_h, &hints)
            }
            NodeKind::SplitPane | NodeKind::PanelGroup => {
                split::layout_split(node, x, y, max_w, max_h, self, hints)
            }
            k if k.is_overlay() => overlay::layout_overlay(node, x, y, max_w, max_h, self, hints),
            NodeKind::Spacer => {
                node.props.validate()?;
                let natural = axis.size(node.props.size.unwrap_or(0), 0);
                let size = Size::new(
                    hints.forced_width.unwrap_or(natural.width),
                    hints.forced_height.unwrap_or(natural.height),
                );
                Ok(LayoutTree::new(
                    node.id,
                    node.kind,
                    Rect::new(x, y, size.width, size.height),
                ))
            }
            k if k.is_leaf() => {
                node.props.validate()?;
                let size = match (hints.forced_width, hints.forced_height) {
                    (Some(w), Some(h)) => Size::new(w, h),
                    (fw, fh) => {
                        let natural = match hints.precomputed {
                            Some(s) => s,
                            None => self.leaf.measure(node, max_w, max_h)?,
                        };
                        Size::new(
                            fw.unwrap_or(natural.width),
                            fh.unwrap_or(natural.height),
                        )
                    }
                };
                Ok(LayoutTree::new(
                    node.id,
                    node.kind,
                    Rect::new(x, y, size.width, size.height),
                ))
            }
            _ => stack::layout_stack(node, x, y, max_w, max_h, self, hints),
        }
    }

    fn cache(&mut self) -> &mut LayoutCache {
        &mut *self.cache
    }

    fn dirty(&mut self) -> &mut DirtySet {
        &mut *self.dirty
    }
}
