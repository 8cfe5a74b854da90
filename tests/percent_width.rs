//! Percent sizing: integer-exact near-100% groups, collapse rescue, and
//! margin absorption.

mod common;

use common::{boxed, column, fixed, layout, pct_width, rect_of, row};
use flexcell::{Edges, LayoutProps, Node, NodeKind, SizeValue};

#[test]
fn test_thirds_of_ninety_nine_leave_no_zero_column() {
    let root = row(
        0,
        vec![
            Some(pct_width(1, 33.0)),
            Some(pct_width(2, 33.0)),
            Some(pct_width(3, 34.0)),
        ],
    );
    let tree = layout(&root, 99, 10);
    let widths: Vec<i32> = (1..=3).map(|id| rect_of(&tree, id).width).collect();
    assert_eq!(widths.iter().sum::<i32>(), 99);
    assert!(widths.iter().all(|&w| w > 0), "widths {widths:?}");
    assert_eq!(widths, vec![33, 33, 33]);
}

#[test]
fn test_halves_of_odd_width_split_exactly() {
    let root = row(0, vec![Some(pct_width(1, 50.0)), Some(pct_width(2, 50.0))]);
    let tree = layout(&root, 101, 10);
    assert_eq!(rect_of(&tree, 1).width, 51);
    assert_eq!(rect_of(&tree, 2).width, 50);
    assert_eq!(rect_of(&tree, 2).x, 51);
}

#[test]
fn test_two_full_width_children_rebalance_to_halves() {
    let root = row(0, vec![Some(pct_width(1, 100.0)), Some(pct_width(2, 100.0))]);
    let tree = layout(&root, 80, 10);
    assert_eq!(rect_of(&tree, 1).width, 40);
    assert_eq!(rect_of(&tree, 2).width, 40);
}

#[test]
fn test_trailing_flex_child_rescued_from_collapse() {
    let root = row(0, vec![Some(pct_width(1, 100.0)), Some(common::flexed(2, 1.0))]);
    let tree = layout(&root, 80, 10);
    // Sequential consumption starves the flex child; the rescue splits the
    // row by weight (percent 100 vs flex 100).
    assert_eq!(rect_of(&tree, 1).width, 40);
    assert_eq!(rect_of(&tree, 2).width, 40);
}

#[test]
fn test_full_percent_with_margin_fits_parent_exactly() {
    let child = boxed(
        1,
        LayoutProps {
            width: SizeValue::Percent(100.0),
            height: SizeValue::Cells(3),
            margin: Edges::vh(0, 2),
            ..Default::default()
        },
        vec![],
    );
    let root = row(0, vec![Some(child)]);
    let tree = layout(&root, 100, 10);
    let rect = rect_of(&tree, 1);
    assert_eq!(rect.x, 2);
    assert_eq!(rect.width, 96);
    assert_eq!(rect.right(), 98);
}

#[test]
fn test_percent_over_hundred_clamps_to_available() {
    let root = row(0, vec![Some(pct_width(1, 150.0))]);
    let tree = layout(&root, 100, 10);
    assert_eq!(rect_of(&tree, 1).width, 100);
}

#[test]
fn test_percent_heights_in_column() {
    let tall = |id, p| {
        boxed(
            id,
            LayoutProps {
                height: SizeValue::Percent(p),
                ..Default::default()
            },
            vec![],
        )
    };
    let root = column(0, vec![Some(tall(1, 50.0)), Some(tall(2, 50.0))]);
    let tree = layout(&root, 80, 99);
    assert_eq!(rect_of(&tree, 1).height, 50);
    assert_eq!(rect_of(&tree, 2).height, 49);
    assert_eq!(rect_of(&tree, 2).y, 50);
}

#[test]
fn test_fixed_and_fitting_percent_coexist() {
    let root = row(0, vec![Some(fixed(1, 20, 2)), Some(pct_width(2, 50.0))]);
    let tree = layout(&root, 100, 10);
    assert_eq!(rect_of(&tree, 1).width, 20);
    assert_eq!(rect_of(&tree, 2).width, 50);
    assert_eq!(rect_of(&tree, 2).x, 20);
}

#[test]
fn test_min_constrained_percent_skips_group_rebalance() {
    let constrained = boxed(
        1,
        LayoutProps {
            width: SizeValue::Percent(50.0),
            min_width: SizeValue::Cells(60),
            ..Default::default()
        },
        vec![],
    );
    let root = row(0, vec![Some(constrained), Some(pct_width(2, 50.0))]);
    let tree = layout(&root, 100, 10);
    // The minimum wins and the sibling takes what remains.
    assert_eq!(rect_of(&tree, 1).width, 60);
    assert_eq!(rect_of(&tree, 2).width, 40);
}

#[test]
fn test_percent_resolves_against_content_box() {
    let inner = pct_width(2, 50.0);
    let padded = boxed(
        1,
        LayoutProps {
            padding: Edges::all(2),
            ..LayoutProps::row()
        },
        vec![Some(inner)],
    );
    let root = column(0, vec![Some(padded)]);
    let tree = layout(&root, 84, 24);
    // Content box is 80 wide after padding.
    assert_eq!(rect_of(&tree, 2).width, 40);
    assert_eq!(rect_of(&tree, 2).x, 2);
}

#[test]
fn test_percent_width_of_nested_text_region() {
    let label = Node::new(3, NodeKind::Text, LayoutProps::default());
    let half = boxed(
        2,
        LayoutProps {
            width: SizeValue::Percent(50.0),
            align_items: flexcell::AlignItems::FlexStart,
            ..LayoutProps::column()
        },
        vec![Some(label)],
    );
    let root = row(0, vec![Some(half), Some(common::flexed(4, 1.0))]);
    let leaf = common::TextMeasurer::new().with(3, "status");
    let tree = common::layout_with(leaf, &root, 60, 10);
    assert_eq!(rect_of(&tree, 2).width, 30);
    assert_eq!(rect_of(&tree, 4).width, 30);
    assert_eq!(rect_of(&tree, 3).width, 6);
}
