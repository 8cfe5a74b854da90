//! Layers, modals, and dropdowns resolved through the full walker.

mod common;

use common::{column, fixed, layout, rect_of, row};
use flexcell::{
    AlignItems, LayoutProps, Node, NodeId, NodeKind, Position, Rect, SizeValue,
};

fn layers(id: u32, children: Vec<Option<Node>>) -> Node {
    Node::new(id, NodeKind::Layers, LayoutProps::default()).with_children(children)
}

/// Wrap a child so the column root does not stretch it across the viewport.
fn boxed_start(child: Node) -> Node {
    Node::new(
        90,
        NodeKind::Box,
        LayoutProps {
            align_items: AlignItems::FlexStart,
            ..LayoutProps::column()
        },
    )
    .with_children(vec![Some(child)])
}

#[test]
fn test_later_layers_win_hit_testing() {
    let root = layers(0, vec![Some(fixed(1, 10, 4)), Some(fixed(2, 6, 2))]);
    let tree = layout(&root, 80, 24);
    assert_eq!(tree.hit(1, 1).unwrap().node, NodeId(2));
    assert_eq!(tree.hit(8, 3).unwrap().node, NodeId(1));
}

#[test]
fn test_modal_percent_width_centers_in_layer() {
    let modal = Node::new(
        1,
        NodeKind::Modal,
        LayoutProps {
            width: SizeValue::Percent(50.0),
            height: SizeValue::Cells(10),
            ..Default::default()
        },
    );
    let root = layers(0, vec![Some(modal)]);
    let tree = layout(&root, 80, 24);
    assert_eq!(rect_of(&tree, 1), Rect::new(20, 7, 40, 10));
}

#[test]
fn test_dropdown_reserves_no_flow_space() {
    let dropdown =
        Node::new(2, NodeKind::Dropdown, LayoutProps::default()).with_children(vec![Some(fixed(3, 8, 3))]);
    let root = row(
        0,
        vec![Some(fixed(1, 10, 2)), Some(dropdown), Some(fixed(4, 5, 2))],
    );
    let tree = layout(&root, 40, 10);
    // Flow siblings pack as if the dropdown were not there.
    assert_eq!(rect_of(&tree, 1).x, 0);
    assert_eq!(rect_of(&tree, 4).x, 10);
    assert_eq!(rect_of(&tree, 2), Rect::new(0, 0, 8, 3));
}

#[test]
fn test_absolute_child_skips_layer_union() {
    let pinned = Node::new(
        2,
        NodeKind::Box,
        LayoutProps {
            position: Position::Absolute,
            left: Some(3),
            top: Some(2),
            width: SizeValue::Cells(5),
            height: SizeValue::Cells(2),
            ..Default::default()
        },
    );
    let inner = layers(1, vec![Some(fixed(3, 12, 4)), Some(pinned)]);
    let root = column(0, vec![Some(boxed_start(inner))]);
    let tree = layout(&root, 80, 24);
    // The union ignores the pinned child, so the layer is 12x4.
    assert_eq!(rect_of(&tree, 1).width, 12);
    assert_eq!(rect_of(&tree, 1).height, 4);
    assert_eq!(rect_of(&tree, 2), Rect::new(3, 2, 5, 2));
}

#[test]
fn test_stack_parent_forces_modal_placement() {
    let modal = Node::new(
        2,
        NodeKind::Modal,
        LayoutProps {
            width: SizeValue::Cells(20),
            height: SizeValue::Cells(6),
            ..Default::default()
        },
    );
    let root = column(0, vec![Some(fixed(1, 40, 2)), Some(modal)]);
    let tree = layout(&root, 40, 12);
    // In flow the committed position wins; no centering happens.
    assert_eq!(rect_of(&tree, 2), Rect::new(0, 2, 20, 6));
}

#[test]
fn test_layers_in_flow_sizes_to_union() {
    let inner = layers(1, vec![Some(fixed(2, 12, 3)), Some(fixed(3, 5, 6))]);
    let root = column(0, vec![Some(boxed_start(inner))]);
    let tree = layout(&root, 40, 24);
    let rect = rect_of(&tree, 1);
    assert_eq!(rect.width, 12);
    assert_eq!(rect.height, 6);
    assert_eq!(rect_of(&tree, 2).x, 0);
    assert_eq!(rect_of(&tree, 3).x, 0);
}
