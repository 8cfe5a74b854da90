//! Placement: justify/align arithmetic, recursion into children, and
//! out-of-flow positioning.

use log::trace;

use crate::axis::Axis;
use crate::driver::{LayoutDriver, LayoutHints};
use crate::error::Result;
use crate::geometry::Size;
use crate::node::Node;
use crate::numeric::distribute_integer;
use crate::props::LayoutProps;
use crate::tree::LayoutTree;
use crate::types::{AlignItems, JustifyContent};

use super::flow::Line;
use super::{ChildInfo, resolved_border_size};

// =============================================================================
// Justify arithmetic
// =============================================================================

/// Leading offset and per-gap extras for one line.
///
/// The spacing modes hand the leftover to integer pockets so the line edge
/// still lands exactly; with negative leftover they fall back to packed
/// start while center/end shift by the truncated half/full deficit.
pub(super) fn justify_offsets(
    justify: JustifyContent,
    leftover: i32,
    n: usize,
) -> (i32, Vec<i32>) {
    if n == 0 {
        return (0, Vec::new());
    }
    let between = n - 1;
    let no_extras = vec![0i32; between];
    match justify {
        JustifyContent::FlexStart => (0, no_extras),
        JustifyContent::Center => (leftover / 2, no_extras),
        JustifyContent::FlexEnd => (leftover, no_extras),
        JustifyContent::SpaceBetween => {
            if leftover <= 0 || between == 0 {
                return (0, no_extras);
            }
            (0, distribute_integer(leftover, &vec![1.0; between]))
        }
        JustifyContent::SpaceAround => {
            if leftover <= 0 {
                return (0, no_extras);
            }
            let mut weights = vec![2.0f32; n + 1];
            weights[0] = 1.0;
            weights[n] = 1.0;
            let pockets = distribute_integer(leftover, &weights);
            (pockets[0], pockets[1..n].to_vec())
        }
        JustifyContent::SpaceEvenly => {
            if leftover <= 0 {
                return (0, no_extras);
            }
            let pockets = distribute_integer(leftover, &vec![1.0; n + 1]);
            (pockets[0], pockets[1..n].to_vec())
        }
    }
}

fn align_offset(align: AlignItems, free: i32) -> i32 {
    match align {
        AlignItems::Stretch | AlignItems::FlexStart => 0,
        AlignItems::Center => free / 2,
        AlignItems::FlexEnd => free,
    }
}

// =============================================================================
// Flow placement
// =============================================================================

/// Place every flow child and recurse through the driver.
///
/// Sizes are committed here, so each child is laid out with forced
/// dimensions. A dirty child whose committed size matches its remembered
/// size cannot move any later sibling, so those siblings leave the dirty
/// set.
pub(super) fn place_flow<D: LayoutDriver + ?Sized>(
    props: &LayoutProps,
    flow: &[ChildInfo<'_>],
    lines: &[Line],
    axis: Axis,
    cx: i32,
    cy: i32,
    cw: i32,
    ch: i32,
    driver: &mut D,
) -> Result<Vec<(usize, LayoutTree)>> {
    let mut placed = Vec::with_capacity(flow.len());
    let inner_main = axis.main_of(Size::new(cw, ch));
    let (main_origin, cross_origin) = match axis {
        Axis::Row => (cx, cy),
        Axis::Column => (cy, cx),
    };

    let mut cross_cursor = cross_origin;
    for (li, line) in lines.iter().enumerate() {
        if li > 0 {
            cross_cursor += props.gap;
        }
        let members = &flow[line.start..line.end];
        let n = members.len();
        let occupied: i32 = members.iter().map(|c| c.outer_main(axis)).sum::<i32>()
            + props.gap * n.saturating_sub(1) as i32;
        let (lead, extras) = justify_offsets(props.justify_content, inner_main - occupied, n);

        let mut main_cursor = main_origin + lead;
        for (mi, member) in members.iter().enumerate() {
            if mi > 0 {
                main_cursor += props.gap + extras[mi - 1];
            }
            let margin = &member.node.props.margin;
            let main_pos = main_cursor + margin.main_leading(axis);

            let align = member.node.props.align_self.resolve(props.align_items);
            let free = line.cross - member.outer_cross(axis);
            let cross_pos = cross_cursor + align_offset(align, free) + margin.cross_leading(axis);

            let (x, y, w, h) = match axis {
                Axis::Row => (main_pos, cross_pos, member.main, member.cross),
                Axis::Column => (cross_pos, main_pos, member.cross, member.main),
            };
            let size = Size::new(w, h);
            let id = member.node.id;

            // A dirty child settling at its remembered size cannot shift the
            // siblings after it.
            if driver.dirty().contains(&id) && driver.cache().prev_size(id) == Some(size) {
                trace!("{id} settled at {w}x{h}, later siblings stay clean");
                for later in flow[line.start + mi + 1..].iter() {
                    driver.dirty().remove(&later.node.id);
                }
            }

            let hints = LayoutHints {
                forced_width: Some(w),
                forced_height: Some(h),
                precomputed: None,
            };
            let subtree = driver.layout_node(member.node, x, y, cw, ch, axis, hints)?;
            driver.cache().record_size(id, size);
            placed.push((member.slot, subtree));

            main_cursor += member.outer_main(axis);
        }
        cross_cursor += line.cross;
    }
    Ok(placed)
}

// =============================================================================
// Out-of-flow placement
// =============================================================================

/// Place absolutely positioned children against the content box.
///
/// Insets measure from the content box edges to the child's border box,
/// with margins added on the anchored side. Opposing insets with an auto
/// size stretch the child between them.
pub(crate) fn place_absolute<D: LayoutDriver + ?Sized>(
    children: &[(usize, &Node)],
    cx: i32,
    cy: i32,
    cw: i32,
    ch: i32,
    driver: &mut D,
) -> Result<Vec<(usize, LayoutTree)>> {
    let mut placed = Vec::with_capacity(children.len());
    for &(slot, node) in children {
        let props = &node.props;
        let (explicit_w, explicit_h) = resolved_border_size(props, cw, ch);
        let margin = &props.margin;

        let stretch_w = explicit_w.is_none() && props.left.is_some() && props.right.is_some();
        let stretch_h = explicit_h.is_none() && props.top.is_some() && props.bottom.is_some();

        let mut w = explicit_w.unwrap_or(0);
        let mut h = explicit_h.unwrap_or(0);
        if stretch_w {
            w = (cw
                - props.left.unwrap_or(0)
                - props.right.unwrap_or(0)
                - margin.horizontal())
            .max(0);
        }
        if stretch_h {
            h = (ch
                - props.top.unwrap_or(0)
                - props.bottom.unwrap_or(0)
                - margin.vertical())
            .max(0);
        }
        if (explicit_w.is_none() && !stretch_w) || (explicit_h.is_none() && !stretch_h) {
            let axis = Axis::from_direction(props.direction);
            let natural = driver.measure_node(node, cw, ch, axis)?;
            if explicit_w.is_none() && !stretch_w {
                w = natural.width;
            }
            if explicit_h.is_none() && !stretch_h {
                h = natural.height;
            }
        }

        let x = match (props.left, props.right) {
            (Some(left), _) => cx + left + margin.left,
            (None, Some(right)) => cx + cw - right - margin.right - w,
            (None, None) => cx + margin.left,
        };
        let y = match (props.top, props.bottom) {
            (Some(top), _) => cy + top + margin.top,
            (None, Some(bottom)) => cy + ch - bottom - margin.bottom - h,
            (None, None) => cy + margin.top,
        };

        let hints = LayoutHints {
            forced_width: Some(w),
            forced_height: Some(h),
            precomputed: None,
        };
        let axis = Axis::from_direction(props.direction);
        let subtree = driver.layout_node(node, x, y, cw, ch, axis, hints)?;
        driver.cache().record_size(node.id, Size::new(w, h));
        placed.push((slot, subtree));
    }
    Ok(placed)
}

/// Place anchored overlay children at the content origin at natural size.
///
/// They reserve no flow space; the embedder repositions the produced rects
/// against their anchors after resolution.
pub(super) fn place_anchored<D: LayoutDriver + ?Sized>(
    children: &[(usize, &Node)],
    cx: i32,
    cy: i32,
    cw: i32,
    ch: i32,
    driver: &mut D,
) -> Result<Vec<(usize, LayoutTree)>> {
    let mut placed = Vec::with_capacity(children.len());
    for &(slot, node) in children {
        let axis = Axis::from_direction(node.props.direction);
        let natural = driver.measure_node(node, cw, ch, axis)?;
        let hints = LayoutHints {
            forced_width: Some(natural.width),
            forced_height: Some(natural.height),
            precomputed: None,
        };
        let subtree = driver.layout_node(node, cx, cy, cw, ch, axis, hints)?;
        driver.cache().record_size(node.id, natural);
        placed.push((slot, subtree));
    }
    Ok(placed)
}
