//! Split containers: weighted panels along one axis.
//!
//! A split pane reserves divider cells between panels; a panel group packs
//! panels edge to edge. Panel weights come from percent constraints:
//! unspecified panels share what the declared percents leave of 100, or
//! weight 1 when the declared percents already exceed it.

use log::trace;

use crate::axis::Axis;
use crate::driver::{LayoutDriver, LayoutHints};
use crate::error::Result;
use crate::flex::{distribute_flex, FlexItem};
use crate::geometry::{Rect, Size};
use crate::node::{Node, NodeKind};
use crate::numeric::clamp_within;
use crate::props::PanelConstraint;
use crate::stack::resolve_own_size;
use crate::tree::LayoutTree;

fn divider_size(node: &Node) -> i32 {
    if node.kind == NodeKind::SplitPane {
        node.props.divider_size
    } else {
        0
    }
}

/// Splits fill the space they are given unless sized explicitly.
pub(crate) fn measure_split<D: LayoutDriver + ?Sized>(
    node: &Node,
    max_w: i32,
    max_h: i32,
    _driver: &mut D,
) -> Result<Size> {
    node.props.validate()?;
    let own = resolve_own_size(&node.props, max_w, max_h, &LayoutHints::default());
    let w = clamp_within(own.width.unwrap_or(own.avail_w), own.min_w, own.max_w);
    let h = clamp_within(own.height.unwrap_or(own.avail_h), own.min_h, own.max_h);
    Ok(Size::new(w, h))
}

/// Panel weights for `n` panels given the declared constraints.
fn panel_weights(panels: &[PanelConstraint], n: usize) -> Vec<f32> {
    let declared: f32 = panels
        .iter()
        .take(n)
        .filter_map(|p| p.size)
        .sum();
    let unspecified = n - panels.iter().take(n).filter(|p| p.size.is_some()).count();
    let fallback = if unspecified > 0 && declared <= 100.0 {
        (100.0 - declared) / unspecified as f32
    } else {
        1.0
    };
    (0..n)
        .map(|i| {
            panels
                .get(i)
                .and_then(|p| p.size)
                .unwrap_or(fallback)
        })
        .collect()
}

pub(crate) fn layout_split<D: LayoutDriver + ?Sized>(
    node: &Node,
    x: i32,
    y: i32,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
    hints: LayoutHints,
) -> Result<LayoutTree> {
    node.props.validate()?;
    let props = &node.props;
    let axis = Axis::from_direction(props.direction);
    let own = resolve_own_size(props, max_w, max_h, &hints);
    let w = clamp_within(own.width.unwrap_or(own.avail_w), own.min_w, own.max_w);
    let h = clamp_within(own.height.unwrap_or(own.avail_h), own.min_h, own.max_h);
    let rect = Rect::new(x, y, w, h);

    let cx = x + props.padding.left;
    let cy = y + props.padding.top;
    let cw = (w - props.padding.horizontal()).max(0);
    let ch = (h - props.padding.vertical()).max(0);
    let inner = Size::new(cw, ch);
    let inner_main = axis.main_of(inner);
    let inner_cross = axis.cross_of(inner);

    let panels: Vec<(usize, &Node)> = node.present_children().collect();
    let n = panels.len();
    let mut tree = LayoutTree::new(node.id, node.kind, rect);
    if n == 0 {
        return Ok(tree);
    }

    let divider = divider_size(node);
    let avail = (inner_main - divider * (n - 1) as i32).max(0);
    let weights = panel_weights(&props.panels, n);
    let items: Vec<FlexItem> = (0..n)
        .map(|i| {
            let c = props.panels.get(i);
            let min = c
                .and_then(|p| p.min_size)
                .map(|pct| (avail as f32 * pct / 100.0).floor() as i32)
                .unwrap_or(0);
            let max = c
                .and_then(|p| p.max_size)
                .map(|pct| (avail as f32 * pct / 100.0).floor() as i32)
                .unwrap_or(i32::MAX);
            FlexItem {
                index: i,
                flex: weights[i],
                shrink: 0.0,
                basis: 0,
                min,
                max,
            }
        })
        .collect();
    let shares = distribute_flex(avail, &items);
    trace!("split {} panels {:?} over {avail} cells", node.id, shares);

    let mut cursor = if axis.is_row() { cx } else { cy };
    let mut children = Vec::with_capacity(n);
    for (i, (_, panel)) in panels.iter().enumerate() {
        if i > 0 {
            cursor += divider;
        }
        let (px, py) = axis.point(cursor, if axis.is_row() { cy } else { cx });
        let size = axis.size(shares[i], inner_cross);
        let subtree = driver.layout_node(
            panel,
            px,
            py,
            cw,
            ch,
            axis,
            LayoutHints::forced(size),
        )?;
        driver.cache().record_size(panel.id, size);
        children.push(subtree);
        cursor += shares[i];
    }
    tree.children = children;
    Ok(tree)
}
