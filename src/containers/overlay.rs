//! Overlay containers: layers, modals, dropdowns.
//!
//! Layers stack children at the content origin in paint order (later
//! children on top). Modals center within the box they are offered, capped
//! to leave a one-cell viewport margin. Dropdowns resolve at natural size
//! and reserve no flow space; the embedder moves their rects to the anchor
//! afterwards.

use log::trace;

use crate::axis::Axis;
use crate::driver::{LayoutDriver, LayoutHints};
use crate::error::Result;
use crate::geometry::Size;
use crate::node::{Node, NodeKind};
use crate::stack::{self, place, scroll};
use crate::tree::LayoutTree;

pub(crate) fn measure_overlay<D: LayoutDriver + ?Sized>(
    node: &Node,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
) -> Result<Size> {
    match node.kind {
        NodeKind::Layers => measure_layers(node, max_w, max_h, driver),
        NodeKind::Modal => {
            let natural = stack::measure_stack(node, max_w, max_h, driver)?;
            Ok(Size::new(
                natural.width.min((max_w - 2).max(0)),
                natural.height.min((max_h - 2).max(0)),
            ))
        }
        _ => stack::measure_stack(node, max_w, max_h, driver),
    }
}

pub(crate) fn layout_overlay<D: LayoutDriver + ?Sized>(
    node: &Node,
    x: i32,
    y: i32,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
    hints: LayoutHints,
) -> Result<LayoutTree> {
    match node.kind {
        NodeKind::Layers => layout_layers(node, x, y, max_w, max_h, driver, hints),
        NodeKind::Modal => layout_modal(node, x, y, max_w, max_h, driver, hints),
        _ => layout_dropdown(node, x, y, max_w, max_h, driver, hints),
    }
}

// =============================================================================
// Layers
// =============================================================================

/// Children whose natural size joins a layer's sizing union. Dropdowns
/// reserve no space anywhere; absolute children place themselves from
/// insets. Both passes must agree, or an auto layer commits a size below
/// its own measurement.
fn joins_union(child: &Node) -> bool {
    !child.props.is_absolute() && child.kind != NodeKind::Dropdown
}

/// Content size of a layers node is the union of its children's naturals.
fn measure_layers<D: LayoutDriver + ?Sized>(
    node: &Node,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
) -> Result<Size> {
    node.props.validate()?;
    let props = &node.props;
    let own = stack::resolve_own_size(props, max_w, max_h, &LayoutHints::default());
    let inner_w = (own.width.unwrap_or(own.avail_w) - props.padding.horizontal()).max(0);
    let inner_h = (own.height.unwrap_or(own.avail_h) - props.padding.vertical()).max(0);

    let mut content = Size::ZERO;
    for (_, child) in node.present_children() {
        if !joins_union(child) {
            continue;
        }
        let axis = Axis::from_direction(child.props.direction);
        let natural = driver.measure_node(child, inner_w, inner_h, axis)?;
        content.width = content.width.max(natural.width + child.props.margin.horizontal());
        content.height = content.height.max(natural.height + child.props.margin.vertical());
    }

    Ok(Size::new(
        own.settle_width(content.width, props.padding.horizontal()),
        own.settle_height(content.height, props.padding.vertical()),
    ))
}

fn layout_layers<D: LayoutDriver + ?Sized>(
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
    let own = stack::resolve_own_size(props, max_w, max_h, &hints);

    // Children land at the content origin; the union sizes an auto layer.
    let inner_w = (own.width.unwrap_or(own.avail_w) - props.padding.horizontal()).max(0);
    let inner_h = (own.height.unwrap_or(own.avail_h) - props.padding.vertical()).max(0);
    let mut naturals = Vec::new();
    let mut content = Size::ZERO;
    for (slot, child) in node.present_children() {
        if !joins_union(child) {
            continue;
        }
        let child_axis = Axis::from_direction(child.props.direction);
        let natural = driver.measure_node(child, inner_w, inner_h, child_axis)?;
        content.width = content.width.max(natural.width + child.props.margin.horizontal());
        content.height = content.height.max(natural.height + child.props.margin.vertical());
        naturals.push((slot, natural));
    }

    let w = own.settle_width(content.width, props.padding.horizontal());
    let h = own.settle_height(content.height, props.padding.vertical());
    let rect = crate::geometry::Rect::new(x, y, w, h);
    let cx = x + props.padding.left;
    let cy = y + props.padding.top;
    let cw = (w - props.padding.horizontal()).max(0);
    let ch = (h - props.padding.vertical()).max(0);
    trace!("layers {} at {},{} size {}x{}", node.id, x, y, w, h);

    let mut placed = Vec::new();
    let mut absolute = Vec::new();
    let mut natural_iter = naturals.into_iter();
    for (slot, child) in node.present_children() {
        if child.props.is_absolute() {
            absolute.push((slot, child));
            continue;
        }
        if child.kind.is_overlay() {
            // Measured for the union only; floating children position
            // themselves within the content box.
            if joins_union(child) {
                natural_iter.next();
            }
            let subtree =
                driver.layout_node(child, cx, cy, cw, ch, axis, LayoutHints::default())?;
            placed.push((slot, subtree));
            continue;
        }
        let (_, natural) = natural_iter
            .next()
            .unwrap_or((slot, Size::ZERO));
        let px = cx + child.props.margin.left;
        let py = cy + child.props.margin.top;
        let subtree =
            driver.layout_node(child, px, py, cw, ch, axis, LayoutHints::forced(natural))?;
        driver.cache().record_size(child.id, natural);
        placed.push((slot, subtree));
    }
    placed.extend(place::place_absolute(&absolute, cx, cy, cw, ch, driver)?);
    placed.sort_by_key(|(slot, _)| *slot);

    let mut tree = LayoutTree::new(node.id, node.kind, rect);
    tree.children = placed.into_iter().map(|(_, child)| child).collect();
    scroll::apply_overflow(props, &mut tree, cx, cy, cw, ch);
    Ok(tree)
}

// =============================================================================
// Modal
// =============================================================================

/// Center a modal within the offered box, keeping a one-cell margin.
fn layout_modal<D: LayoutDriver + ?Sized>(
    node: &Node,
    x: i32,
    y: i32,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
    hints: LayoutHints,
) -> Result<LayoutTree> {
    if let (Some(w), Some(h)) = (hints.forced_width, hints.forced_height) {
        // A parent that commits a size also commits the position.
        return stack::layout_stack(node, x, y, max_w, max_h, driver, LayoutHints::forced(Size::new(w, h)));
    }

    node.props.validate()?;
    let size = measure_overlay(node, max_w, max_h, driver)?;
    let mx = x + ((max_w - size.width) / 2).max(0);
    let my = y + ((max_h - size.height) / 2).max(0);
    trace!("modal {} centered at {mx},{my} size {}x{}", node.id, size.width, size.height);
    stack::layout_stack(node, mx, my, max_w, max_h, driver, LayoutHints::forced(size))
}

// =============================================================================
// Dropdown
// =============================================================================

/// Dropdowns lay out at natural size; flow parents anchor them at the
/// content origin and the embedder shifts the rects afterwards.
fn layout_dropdown<D: LayoutDriver + ?Sized>(
    node: &Node,
    x: i32,
    y: i32,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
    hints: LayoutHints,
) -> Result<LayoutTree> {
    let size = match (hints.forced_width, hints.forced_height) {
        (Some(w), Some(h)) => Size::new(w, h),
        _ => stack::measure_stack(node, max_w, max_h, driver)?,
    };
    stack::layout_stack(node, x, y, max_w, max_h, driver, LayoutHints::forced(size))
}
