//! Shared fixtures for layout integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use flexcell::{
    DirtySet, LayoutCache, LayoutProps, LayoutTree, MeasureLeaf, Node, NodeId, NodeKind, Rect,
    Result, Size, SizeValue, TreeWalker,
};
use unicode_width::UnicodeWidthStr;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Leaf measurement
// =============================================================================

/// Leaf measurer over display columns, hard-wrapping at the offered width.
pub struct TextMeasurer {
    content: HashMap<NodeId, String>,
}

impl TextMeasurer {
    pub fn new() -> Self {
        Self {
            content: HashMap::new(),
        }
    }

    pub fn with(mut self, id: u32, text: &str) -> Self {
        self.content.insert(NodeId(id), text.to_string());
        self
    }
}

impl MeasureLeaf for TextMeasurer {
    fn measure(&mut self, node: &Node, max_w: i32, _max_h: i32) -> Result<Size> {
        let Some(text) = self.content.get(&node.id) else {
            return Ok(Size::ZERO);
        };
        let width = text.width() as i32;
        if width == 0 {
            return Ok(Size::ZERO);
        }
        if max_w <= 0 || width <= max_w {
            return Ok(Size::new(width, 1));
        }
        let lines = (width + max_w - 1) / max_w;
        Ok(Size::new(max_w, lines))
    }

    fn main_size_sensitive(&mut self, node: &Node) -> bool {
        self.content.contains_key(&node.id)
    }
}

// =============================================================================
// Tree builders
// =============================================================================

pub fn row(id: u32, children: Vec<Option<Node>>) -> Node {
    Node::new(id, NodeKind::Box, LayoutProps::row()).with_children(children)
}

pub fn column(id: u32, children: Vec<Option<Node>>) -> Node {
    Node::new(id, NodeKind::Box, LayoutProps::column()).with_children(children)
}

pub fn boxed(id: u32, props: LayoutProps, children: Vec<Option<Node>>) -> Node {
    Node::new(id, NodeKind::Box, props).with_children(children)
}

/// A box with explicit width and height in cells.
pub fn fixed(id: u32, w: i32, h: i32) -> Node {
    Node::new(
        id,
        NodeKind::Box,
        LayoutProps {
            width: SizeValue::Cells(w),
            height: SizeValue::Cells(h),
            ..Default::default()
        },
    )
}

/// A box with only a flex factor.
pub fn flexed(id: u32, factor: f32) -> Node {
    Node::new(
        id,
        NodeKind::Box,
        LayoutProps {
            flex: factor,
            ..Default::default()
        },
    )
}

/// A box with a percent width.
pub fn pct_width(id: u32, percent: f32) -> Node {
    Node::new(
        id,
        NodeKind::Box,
        LayoutProps {
            width: SizeValue::Percent(percent),
            ..Default::default()
        },
    )
}

pub fn text(id: u32) -> Node {
    Node::new(id, NodeKind::Text, LayoutProps::default())
}

// =============================================================================
// Resolution helpers
// =============================================================================

/// Resolve a frame with no leaf content.
pub fn layout(root: &Node, w: i32, h: i32) -> LayoutTree {
    layout_with(TextMeasurer::new(), root, w, h)
}

/// Resolve a frame with the given leaf content.
pub fn layout_with(leaf: TextMeasurer, root: &Node, w: i32, h: i32) -> LayoutTree {
    init_logs();
    let mut cache = LayoutCache::new();
    let mut dirty = DirtySet::new();
    let mut walker = TreeWalker::new(leaf, &mut cache, &mut dirty);
    walker
        .layout_root(root, w, h)
        .expect("layout should resolve")
}

/// Rect of a node by id; panics when the node is missing from the output.
pub fn rect_of(tree: &LayoutTree, id: u32) -> Rect {
    tree.find(NodeId(id))
        .unwrap_or_else(|| panic!("node #{id} missing from layout"))
        .rect
}
