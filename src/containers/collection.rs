//! Virtualized collections: lists, tables, trees, editors and the like.
//!
//! A collection renders its own rows from scroll state, so layout never
//! recurses into children. It resolves one rect, takes content extent from
//! the embedder's hints (or the viewport when absent), and always reports
//! scroll geometry.

use log::trace;

use crate::driver::LayoutHints;
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::node::Node;
use crate::numeric::clamp_within;
use crate::stack::resolve_own_size;
use crate::tree::{LayoutTree, ScrollInfo};

/// Collections fill the space they are given unless sized explicitly.
pub(crate) fn measure_collection(node: &Node, max_w: i32, max_h: i32) -> Result<Size> {
    node.props.validate()?;
    let own = resolve_own_size(&node.props, max_w, max_h, &LayoutHints::default());
    let w = clamp_within(own.width.unwrap_or(own.avail_w), own.min_w, own.max_w);
    let h = clamp_within(own.height.unwrap_or(own.avail_h), own.min_h, own.max_h);
    Ok(Size::new(w, h))
}

pub(crate) fn layout_collection(
    node: &Node,
    x: i32,
    y: i32,
    max_w: i32,
    max_h: i32,
    hints: &LayoutHints,
) -> Result<LayoutTree> {
    node.props.validate()?;
    let props = &node.props;
    let own = resolve_own_size(props, max_w, max_h, hints);
    let w = clamp_within(own.width.unwrap_or(own.avail_w), own.min_w, own.max_w);
    let h = clamp_within(own.height.unwrap_or(own.avail_h), own.min_h, own.max_h);

    let viewport_w = (w - props.padding.horizontal()).max(0);
    let viewport_h = (h - props.padding.vertical()).max(0);
    let content_w = props.content_width.unwrap_or(viewport_w).max(0);
    let content_h = props.content_height.unwrap_or(viewport_h).max(0);

    let max_x = (content_w - viewport_w).max(0);
    let max_y = (content_h - viewport_h).max(0);
    let scroll_x = props.scroll_x.clamp(0, max_x);
    let scroll_y = props.scroll_y.clamp(0, max_y);
    trace!(
        "collection {} viewport {}x{} content {}x{} at {},{}",
        node.id, viewport_w, viewport_h, content_w, content_h, scroll_x, scroll_y
    );

    let mut tree = LayoutTree::new(node.id, node.kind, Rect::new(x, y, w, h));
    tree.scroll = Some(ScrollInfo {
        scroll_x,
        scroll_y,
        content_width: content_w,
        content_height: content_h,
        viewport_width: viewport_w,
        viewport_height: viewport_h,
    });
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::props::{Edges, LayoutProps, SizeValue};

    #[test]
    fn test_fills_available_space() {
        let node = Node::new(1, NodeKind::List, LayoutProps::default());
        assert_eq!(measure_collection(&node, 40, 10).unwrap(), Size::new(40, 10));
    }

    #[test]
    fn test_explicit_size_wins() {
        let node = Node::new(
            1,
            NodeKind::Table,
            LayoutProps {
                width: SizeValue::Cells(20),
                height: SizeValue::Cells(6),
                ..Default::default()
            },
        );
        assert_eq!(measure_collection(&node, 40, 10).unwrap(), Size::new(20, 6));
    }

    #[test]
    fn test_missing_hints_pin_content_to_viewport() {
        let node = Node::new(
            1,
            NodeKind::List,
            LayoutProps {
                scroll_y: 30,
                ..Default::default()
            },
        );
        let tree = layout_collection(&node, 0, 0, 40, 10, &LayoutHints::default()).unwrap();
        let info = tree.scroll.unwrap();
        assert_eq!(info.content_height, 10);
        // Content equals viewport, so the requested offset clamps away.
        assert_eq!(info.scroll_y, 0);
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_content_hints_enable_scrolling() {
        let node = Node::new(
            1,
            NodeKind::Editor,
            LayoutProps {
                content_height: Some(200),
                scroll_y: 50,
                ..Default::default()
            },
        );
        let tree = layout_collection(&node, 0, 0, 80, 24, &LayoutHints::default()).unwrap();
        let info = tree.scroll.unwrap();
        assert_eq!(info.content_height, 200);
        assert_eq!(info.scroll_y, 50);
        assert_eq!(info.max_scroll_y(), 176);
    }

    #[test]
    fn test_padding_shrinks_viewport() {
        let node = Node::new(
            1,
            NodeKind::Console,
            LayoutProps {
                padding: Edges::all(1),
                content_height: Some(100),
                scroll_y: 500,
                ..Default::default()
            },
        );
        let tree = layout_collection(&node, 0, 0, 40, 12, &LayoutHints::default()).unwrap();
        let info = tree.scroll.unwrap();
        assert_eq!(info.viewport_height, 10);
        assert_eq!(info.scroll_y, 90);
    }
}
