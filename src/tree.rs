//! Resolved layout output.
//!
//! A [`LayoutTree`] mirrors the input tree (gaps dropped) with every node
//! carrying its final cell rect. Containers that clip also carry
//! [`ScrollInfo`] so the renderer can clip purely by rect containment and
//! draw scrollbars without re-deriving content bounds.

use crate::geometry::{Rect, Size};
use crate::node::{NodeId, NodeKind};

// =============================================================================
// ScrollInfo
// =============================================================================

/// Clipping and scroll metadata for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollInfo {
    /// Applied horizontal offset after clamping.
    pub scroll_x: i32,
    /// Applied vertical offset after clamping.
    pub scroll_y: i32,
    /// Realized content extent, before clipping.
    pub content_width: i32,
    pub content_height: i32,
    /// Visible box the content scrolls within.
    pub viewport_width: i32,
    pub viewport_height: i32,
}

impl ScrollInfo {
    /// Largest valid horizontal offset.
    #[inline]
    pub const fn max_scroll_x(&self) -> i32 {
        let max = self.content_width - self.viewport_width;
        if max > 0 { max } else { 0 }
    }

    /// Largest valid vertical offset.
    #[inline]
    pub const fn max_scroll_y(&self) -> i32 {
        let max = self.content_height - self.viewport_height;
        if max > 0 { max } else { 0 }
    }

    /// Check if the content exceeds the viewport on either axis.
    #[inline]
    pub const fn scrollable(&self) -> bool {
        self.max_scroll_x() > 0 || self.max_scroll_y() > 0
    }
}

// =============================================================================
// LayoutTree
// =============================================================================

/// A positioned node with its resolved children.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    /// Identity of the source node.
    pub node: NodeId,
    /// Kind of the source node, for renderer dispatch.
    pub kind: NodeKind,
    /// Final rect in absolute cells.
    pub rect: Rect,
    /// Resolved children in source order, gaps dropped.
    pub children: Vec<LayoutTree>,
    /// Present when the container clips or scrolls.
    pub scroll: Option<ScrollInfo>,
}

impl LayoutTree {
    /// Create a childless resolved node.
    pub fn new(node: NodeId, kind: NodeKind, rect: Rect) -> Self {
        Self {
            node,
            kind,
            rect,
            children: Vec::new(),
            scroll: None,
        }
    }

    /// Size of this node's rect.
    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Depth-first search for a node by identity.
    pub fn find(&self, id: NodeId) -> Option<&LayoutTree> {
        if self.node == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth-first pre-order traversal.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Deepest node whose rect contains the point, preferring later
    /// children (painter's order puts them on top).
    pub fn hit(&self, x: i32, y: i32) -> Option<&LayoutTree> {
        if !self.rect.contains(x, y) {
            return None;
        }
        for child in self.children.iter().rev() {
            if let Some(hit) = child.hit(x, y) {
                return Some(hit);
            }
        }
        Some(self)
    }

    /// Translate this node and every descendant.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.rect = self.rect.translated(dx, dy);
        for child in &mut self.children {
            child.shift(dx, dy);
        }
    }
}

/// Iterator state for [`LayoutTree::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a LayoutTree>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a LayoutTree;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Reverse push keeps pre-order: first child pops first.
        for child in next.children.iter().rev() {
            self.stack.push(child);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::node::NodeId;

    fn tree() -> LayoutTree {
        let mut root = LayoutTree::new(NodeId(0), NodeKind::Box, Rect::new(0, 0, 20, 10));
        let mut a = LayoutTree::new(NodeId(1), NodeKind::Box, Rect::new(0, 0, 10, 10));
        a.children
            .push(LayoutTree::new(NodeId(3), NodeKind::Text, Rect::new(1, 1, 5, 1)));
        let b = LayoutTree::new(NodeId(2), NodeKind::Text, Rect::new(10, 0, 10, 10));
        root.children.push(a);
        root.children.push(b);
        root
    }

    #[test]
    fn test_find_by_id() {
        let t = tree();
        assert_eq!(t.find(NodeId(3)).unwrap().rect, Rect::new(1, 1, 5, 1));
        assert!(t.find(NodeId(9)).is_none());
    }

    #[test]
    fn test_iter_is_preorder() {
        let t = tree();
        let order: Vec<u32> = t.iter().map(|n| n.node.0).collect();
        assert_eq!(order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_hit_prefers_topmost_child() {
        let t = tree();
        assert_eq!(t.hit(1, 1).unwrap().node, NodeId(3));
        assert_eq!(t.hit(15, 5).unwrap().node, NodeId(2));
        assert_eq!(t.hit(0, 9).unwrap().node, NodeId(1));
        assert!(t.hit(25, 5).is_none());
    }

    #[test]
    fn test_shift_moves_whole_subtree() {
        let mut t = tree();
        t.shift(0, -3);
        assert_eq!(t.rect.y, -3);
        assert_eq!(t.find(NodeId(3)).unwrap().rect.y, -2);
    }

    #[test]
    fn test_scroll_info_max_offsets() {
        let info = ScrollInfo {
            scroll_x: 0,
            scroll_y: 5,
            content_width: 10,
            content_height: 50,
            viewport_width: 20,
            viewport_height: 20,
        };
        assert_eq!(info.max_scroll_x(), 0);
        assert_eq!(info.max_scroll_y(), 30);
        assert!(info.scrollable());
    }
}
