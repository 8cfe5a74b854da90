//! Flow sizing: child measurement, wrap-line packing, and main/cross
//! resolution per strategy.

use log::{debug, trace};

use crate::axis::Axis;
use crate::driver::LayoutDriver;
use crate::error::Result;
use crate::flex::{distribute_flex, shrink_flex, FlexItem};
use crate::geometry::Size;
use crate::numeric::clamp_within;
use crate::props::LayoutProps;
use crate::types::AlignItems;

use super::{ChildFlags, ChildInfo, MeasureStrategy, percent, resolved_border_size};

// =============================================================================
// Measurement
// =============================================================================

/// Measure every flow child's natural border-box size at the inner bounds.
///
/// Children with both dimensions explicit skip the measure callback. Under
/// full flexbox a set basis replaces the natural main size, so packing and
/// free-space math start from the same numbers grow/shrink will.
pub(super) fn measure_children<D: LayoutDriver + ?Sized>(
    children: &mut [ChildInfo<'_>],
    inner_w: i32,
    inner_h: i32,
    axis: Axis,
    strategy: MeasureStrategy,
    driver: &mut D,
) -> Result<()> {
    for child in children.iter_mut() {
        let props = &child.node.props;
        let (explicit_w, explicit_h) = resolved_border_size(props, inner_w, inner_h);

        let (mut w, mut h) = match (explicit_w, explicit_h) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                // Bound the measure at the explicit size where one exists so
                // size-sensitive leaves see their real wrap width.
                let bound_w = explicit_w
                    .map(|w| w + props.margin.horizontal())
                    .unwrap_or(inner_w);
                let bound_h = explicit_h
                    .map(|h| h + props.margin.vertical())
                    .unwrap_or(inner_h);
                let natural = driver.measure_node(child.node, bound_w, bound_h, axis)?;
                (
                    explicit_w.unwrap_or(natural.width),
                    explicit_h.unwrap_or(natural.height),
                )
            }
        };

        if strategy == MeasureStrategy::BasisGrowShrink {
            if let Some(basis) = props.flex_basis.resolve(if axis.is_row() {
                inner_w
            } else {
                inner_h
            }) {
                match axis {
                    Axis::Row => w = basis,
                    Axis::Column => h = basis,
                }
            }
        }

        let min_w = props.min_width.resolve(inner_w).unwrap_or(0);
        let max_w = props.max_width.resolve_max(inner_w, i32::MAX);
        let min_h = props.min_height.resolve(inner_h).unwrap_or(0);
        let max_h = props.max_height.resolve_max(inner_h, i32::MAX);

        // Explicit sizes may exceed availability; auto sizes are capped by
        // the measure bound already.
        w = clamp_within(w, min_w, max_w);
        h = clamp_within(h, min_h, max_h);

        child.measured = Size::new(w, h);
        child.main = axis.main_of(child.measured);
        child.cross = axis.cross_of(child.measured);
    }
    Ok(())
}

// =============================================================================
// Wrap lines
// =============================================================================

/// One cross-axis band of consecutive flow children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Line {
    pub start: usize,
    /// Exclusive end index into the flow children.
    pub end: usize,
    /// Cross extent, settled by [`size_crosses`].
    pub cross: i32,
}

/// Greedily pack flow children onto lines.
///
/// A child that would push the running total past the main limit closes the
/// line; a child wider than the limit gets a line of its own rather than
/// being split.
pub(super) fn pack_lines(
    children: &[ChildInfo<'_>],
    axis: Axis,
    inner_main: i32,
    gap: i32,
    wrap: bool,
) -> Vec<Line> {
    if children.is_empty() {
        return Vec::new();
    }
    if !wrap {
        return vec![Line {
            start: 0,
            end: children.len(),
            cross: 0,
        }];
    }

    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut used = 0i32;
    for (i, child) in children.iter().enumerate() {
        let outer = child.outer_main(axis);
        if i > start && used + gap + outer > inner_main {
            lines.push(Line {
                start,
                end: i,
                cross: 0,
            });
            start = i;
            used = outer;
        } else if i > start {
            used += gap + outer;
        } else {
            used = outer;
        }
    }
    lines.push(Line {
        start,
        end: children.len(),
        cross: 0,
    });
    trace!("packed {} children into {} lines", children.len(), lines.len());
    lines
}

/// Natural content size across all lines, before any flex distribution.
pub(super) fn natural_content_size(
    children: &[ChildInfo<'_>],
    lines: &[Line],
    axis: Axis,
    gap: i32,
) -> (i32, i32) {
    let mut main = 0i32;
    let mut cross = 0i32;
    for (li, line) in lines.iter().enumerate() {
        let members = &children[line.start..line.end];
        let line_main: i32 = members.iter().map(|c| c.outer_main(axis)).sum::<i32>()
            + gap * (members.len().saturating_sub(1)) as i32;
        let line_cross = members
            .iter()
            .map(|c| c.outer_cross(axis))
            .max()
            .unwrap_or(0);
        main = main.max(line_main);
        if li > 0 {
            cross += gap;
        }
        cross += line_cross;
    }
    (main, cross)
}

// =============================================================================
// Main-axis sizing
// =============================================================================

/// Resolve final main sizes for one line of flow children.
pub(super) fn size_line_mains(
    props: &LayoutProps,
    members: &mut [ChildInfo<'_>],
    axis: Axis,
    inner_main: i32,
    strategy: MeasureStrategy,
) -> Result<()> {
    match strategy {
        MeasureStrategy::Fast => Ok(()),
        MeasureStrategy::FlexPercent => size_flex_percent(props, members, axis, inner_main),
        MeasureStrategy::BasisGrowShrink => size_basis_grow_shrink(props, members, axis, inner_main),
    }
}

/// Legacy flex+percent sizing.
///
/// Non-flex children consume the budget sequentially in source order (a
/// trailing child can collapse to zero when the budget runs out), then flex
/// children split the remainder. Near-100% percent groups are re-derived
/// with integer-exact shares up front; an observed collapse triggers the
/// weight-based rescue afterwards.
fn size_flex_percent(
    props: &LayoutProps,
    members: &mut [ChildInfo<'_>],
    axis: Axis,
    inner_main: i32,
) -> Result<()> {
    let n = members.len();
    if n == 0 {
        return Ok(());
    }
    let gaps = props.gap * (n.saturating_sub(1)) as i32;
    let budget = (inner_main - gaps).max(0);

    if let Some(shares) = percent::near_hundred_shares(members, axis, budget, inner_main) {
        debug!("near-100% percent group rebalanced over {budget} cells");
        for (child, share) in members.iter_mut().zip(shares) {
            let margin = child.node.props.margin.main_sum(axis);
            child.main = (share - margin).max(0);
        }
        return Ok(());
    }

    // Sequential consumption for non-flex children.
    let mut remaining = budget;
    let mut collapsed = false;
    for child in members.iter_mut() {
        if child.flags.contains(ChildFlags::FLEX_MAIN) {
            continue;
        }
        let margin = child.node.props.margin.main_sum(axis);
        let demand_outer = child.main + margin;
        let alloc_outer = demand_outer.min(remaining).max(0);
        if alloc_outer <= 0 && demand_outer > 0 {
            collapsed = true;
        }
        child.main = (alloc_outer - margin).max(0);
        remaining -= alloc_outer;
    }

    // Flex children split what is left.
    let flex_members: Vec<usize> = (0..n)
        .filter(|&i| members[i].flags.contains(ChildFlags::FLEX_MAIN))
        .collect();
    if !flex_members.is_empty() {
        let margin_total: i32 = flex_members
            .iter()
            .map(|&i| members[i].node.props.margin.main_sum(axis))
            .sum();
        let pool = (remaining - margin_total).max(0);
        let items: Vec<FlexItem> = flex_members
            .iter()
            .map(|&i| {
                let p = &members[i].node.props;
                FlexItem {
                    index: i,
                    flex: p.flex,
                    shrink: 0.0,
                    basis: 0,
                    min: p.main_min(axis).resolve(inner_main).unwrap_or(0),
                    max: p.main_max(axis).resolve_max(inner_main, i32::MAX),
                }
            })
            .collect();
        let shares = distribute_flex(pool, &items);
        for (k, &i) in flex_members.iter().enumerate() {
            if shares[k] <= 0 && pool <= 0 {
                collapsed = true;
            }
            members[i].main = shares[k];
        }
    }

    if collapsed && budget > 0 {
        debug!("flex/percent row collapsed, rebalancing by weight");
        percent::collapse_rescue(members, axis, budget, inner_main);
    }
    Ok(())
}

/// Full flexbox sizing: bases first, then grow or shrink to fit.
fn size_basis_grow_shrink(
    props: &LayoutProps,
    members: &mut [ChildInfo<'_>],
    axis: Axis,
    inner_main: i32,
) -> Result<()> {
    let n = members.len();
    if n == 0 {
        return Ok(());
    }
    let gaps = props.gap * (n.saturating_sub(1)) as i32;
    let margins: i32 = members
        .iter()
        .map(|c| c.node.props.margin.main_sum(axis))
        .sum();
    // Space the border boxes may share.
    let target = (inner_main - gaps - margins).max(0);
    let base_sum: i32 = members.iter().map(|c| c.main).sum();
    let free = target - base_sum;

    let any_grow = members.iter().any(|c| c.node.props.flex > 0.0);
    let any_shrink = members.iter().any(|c| c.node.props.flex_shrink > 0.0);

    if free > 0 && any_grow {
        let items: Vec<FlexItem> = members
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let p = &c.node.props;
                let max = p.main_max(axis).resolve_max(inner_main, i32::MAX);
                FlexItem {
                    index: i,
                    flex: p.flex,
                    shrink: 0.0,
                    basis: 0,
                    min: 0,
                    max: max.saturating_sub(c.main).max(0),
                }
            })
            .collect();
        let extras = distribute_flex(free, &items);
        for (i, extra) in extras.into_iter().enumerate() {
            members[i].main += extra;
        }
    } else if free < 0 && any_shrink {
        let items: Vec<FlexItem> = members
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let p = &c.node.props;
                FlexItem {
                    index: i,
                    flex: 0.0,
                    shrink: p.flex_shrink,
                    basis: c.main,
                    min: p.main_min(axis).resolve(inner_main).unwrap_or(0),
                    max: p.main_max(axis).resolve_max(inner_main, i32::MAX),
                }
            })
            .collect();
        let sizes = shrink_flex(target, &items);
        for (i, size) in sizes.into_iter().enumerate() {
            members[i].main = size;
        }
    }
    Ok(())
}

// =============================================================================
// Cross-axis feedback
// =============================================================================

/// Re-measure children whose final main size moved and who are memoized as
/// main-size-sensitive, so wrapping content reports its real cross size.
pub(super) fn apply_cross_feedback<D: LayoutDriver + ?Sized>(
    children: &mut [ChildInfo<'_>],
    axis: Axis,
    cw: i32,
    ch: i32,
    driver: &mut D,
) -> Result<()> {
    for child in children.iter_mut() {
        let measured_main = axis.main_of(child.measured);
        if child.main == measured_main {
            continue;
        }
        let sensitive = driver
            .cache()
            .main_size_sensitive(child.node.id)
            .unwrap_or(false);
        if !sensitive {
            continue;
        }
        let margin = &child.node.props.margin;
        let (bound_w, bound_h) = match axis {
            Axis::Row => (child.main + margin.horizontal(), ch),
            Axis::Column => (cw, child.main + margin.vertical()),
        };
        let remeasured = driver.measure_node(child.node, bound_w, bound_h, axis)?;
        trace!(
            "cross feedback {}: main {} -> cross {}",
            child.node.id,
            child.main,
            axis.cross_of(remeasured)
        );
        child.measured = axis.size(measured_main, axis.cross_of(remeasured));
        child.cross = axis.cross_of(child.measured);
    }
    Ok(())
}

// =============================================================================
// Cross-axis sizing
// =============================================================================

/// Settle line extents and every child's final cross size.
///
/// Wrapped lines size to their tallest member; a single unwrapped line
/// spans the container's inner cross extent so stretch fills it.
pub(super) fn size_crosses(
    children: &mut [ChildInfo<'_>],
    lines: &mut [Line],
    axis: Axis,
    cw: i32,
    ch: i32,
    props: &LayoutProps,
) {
    let inner = Size::new(cw, ch);
    let inner_cross = axis.cross_of(inner);

    for line in lines.iter_mut() {
        let extent = if props.wrap {
            children[line.start..line.end]
                .iter()
                .map(|c| c.outer_cross(axis))
                .max()
                .unwrap_or(0)
        } else {
            inner_cross
        };
        line.cross = extent;

        for child in &mut children[line.start..line.end] {
            let cprops = &child.node.props;
            let (explicit_w, explicit_h) = resolved_border_size(cprops, cw, ch);
            let explicit_cross = if axis.is_row() { explicit_h } else { explicit_w };

            let (min_cross, max_cross) = if axis.is_row() {
                (
                    cprops.min_height.resolve(ch).unwrap_or(0),
                    cprops.max_height.resolve_max(ch, i32::MAX),
                )
            } else {
                (
                    cprops.min_width.resolve(cw).unwrap_or(0),
                    cprops.max_width.resolve_max(cw, i32::MAX),
                )
            };

            let align = cprops.align_self.resolve(props.align_items);
            let cross = match explicit_cross {
                Some(c) => c,
                None if align == AlignItems::Stretch => {
                    (extent - cprops.margin.cross_sum(axis)).max(0)
                }
                None => child.cross,
            };
            child.cross = clamp_within(cross, min_cross, max_cross);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeKind};
    use crate::props::{Edges, LayoutProps, SizeValue};
    use crate::stack::{child_flags, ChildInfo};

    fn info(node: &Node, axis: Axis, w: i32, h: i32) -> ChildInfo<'_> {
        let measured = Size::new(w, h);
        ChildInfo {
            node,
            slot: 0,
            flags: child_flags(node, axis),
            measured,
            main: axis.main_of(measured),
            cross: axis.cross_of(measured),
        }
    }

    fn fixed(id: u32, w: i32, h: i32) -> Node {
        Node::new(
            id,
            NodeKind::Text,
            LayoutProps {
                width: SizeValue::Cells(w),
                height: SizeValue::Cells(h),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_pack_lines_respects_main_limit() {
        let a = fixed(1, 4, 1);
        let b = fixed(2, 4, 1);
        let c = fixed(3, 4, 1);
        let nodes = [&a, &b, &c];
        let children: Vec<ChildInfo> =
            nodes.iter().map(|n| info(n, Axis::Row, 4, 1)).collect();
        let lines = pack_lines(&children, Axis::Row, 10, 1, true);
        // 4 + 1 + 4 = 9 fits; adding 1 + 4 would hit 14 > 10.
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].start, lines[0].end), (0, 2));
        assert_eq!((lines[1].start, lines[1].end), (2, 3));
    }

    #[test]
    fn test_pack_lines_over_wide_child_gets_own_line() {
        let a = fixed(1, 25, 1);
        let b = fixed(2, 4, 1);
        let nodes = [&a, &b];
        let children: Vec<ChildInfo> = vec![
            info(nodes[0], Axis::Row, 25, 1),
            info(nodes[1], Axis::Row, 4, 1),
        ];
        let lines = pack_lines(&children, Axis::Row, 10, 0, true);
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].start, lines[0].end), (0, 1));
    }

    #[test]
    fn test_pack_lines_nowrap_single_line() {
        let a = fixed(1, 25, 1);
        let b = fixed(2, 25, 1);
        let children = vec![info(&a, Axis::Row, 25, 1), info(&b, Axis::Row, 25, 1)];
        let lines = pack_lines(&children, Axis::Row, 10, 0, false);
        assert_eq!(lines.len(), 1);
        assert_eq!((lines[0].start, lines[0].end), (0, 2));
    }

    #[test]
    fn test_natural_content_size_includes_gaps_and_margins() {
        let a = fixed(1, 4, 2);
        let mut b = fixed(2, 6, 1);
        b.props.margin = Edges::all(1);
        let children = vec![info(&a, Axis::Row, 4, 2), info(&b, Axis::Row, 6, 1)];
        let lines = pack_lines(&children, Axis::Row, 100, 2, false);
        let (main, cross) = natural_content_size(&children, &lines, Axis::Row, 2);
        // 4 + gap 2 + (6 + margins 2) = 14 wide; tallest outer is 1 + 2 = 3.
        assert_eq!(main, 14);
        assert_eq!(cross, 3);
    }

    #[test]
    fn test_size_flex_percent_fixed_then_flex() {
        let fixed_node = fixed(1, 4, 1);
        let flex_node = Node::new(
            2,
            NodeKind::Box,
            LayoutProps {
                flex: 1.0,
                ..Default::default()
            },
        );
        let mut children = vec![
            info(&fixed_node, Axis::Row, 4, 1),
            info(&flex_node, Axis::Row, 0, 0),
        ];
        let props = LayoutProps::row();
        size_line_mains(&props, &mut children, Axis::Row, 20, MeasureStrategy::FlexPercent)
            .unwrap();
        assert_eq!(children[0].main, 4);
        assert_eq!(children[1].main, 16);
    }

    #[test]
    fn test_size_flex_percent_two_flex_share_remainder() {
        let a = Node::new(
            1,
            NodeKind::Box,
            LayoutProps {
                flex: 1.0,
                ..Default::default()
            },
        );
        let b = Node::new(
            2,
            NodeKind::Box,
            LayoutProps {
                flex: 3.0,
                ..Default::default()
            },
        );
        let mut children = vec![info(&a, Axis::Row, 0, 0), info(&b, Axis::Row, 0, 0)];
        let props = LayoutProps::row();
        size_line_mains(&props, &mut children, Axis::Row, 40, MeasureStrategy::FlexPercent)
            .unwrap();
        assert_eq!(children[0].main, 10);
        assert_eq!(children[1].main, 30);
    }

    #[test]
    fn test_size_basis_grow_shrink_shrinks_to_fit() {
        let mk = |id| {
            Node::new(
                id,
                NodeKind::Box,
                LayoutProps {
                    flex_basis: SizeValue::Cells(30),
                    flex_shrink: 1.0,
                    ..Default::default()
                },
            )
        };
        let a = mk(1);
        let b = mk(2);
        let mut children = vec![info(&a, Axis::Row, 30, 1), info(&b, Axis::Row, 30, 1)];
        let props = LayoutProps::row();
        size_line_mains(&props, &mut children, Axis::Row, 40, MeasureStrategy::BasisGrowShrink)
            .unwrap();
        assert_eq!(children[0].main + children[1].main, 40);
        assert_eq!(children[0].main, 20);
    }

    #[test]
    fn test_size_basis_grow_adds_free_space() {
        let rigid = fixed(1, 10, 1);
        let grower = Node::new(
            2,
            NodeKind::Box,
            LayoutProps {
                flex: 1.0,
                flex_basis: SizeValue::Cells(5),
                ..Default::default()
            },
        );
        let mut children = vec![info(&rigid, Axis::Row, 10, 1), info(&grower, Axis::Row, 5, 1)];
        let props = LayoutProps::row();
        size_line_mains(&props, &mut children, Axis::Row, 40, MeasureStrategy::BasisGrowShrink)
            .unwrap();
        assert_eq!(children[0].main, 10);
        assert_eq!(children[1].main, 30);
    }

    #[test]
    fn test_size_crosses_stretch_fills_line() {
        let a = fixed(1, 4, 1);
        let b = Node::new(2, NodeKind::Box, LayoutProps::default());
        let mut children = vec![info(&a, Axis::Row, 4, 1), info(&b, Axis::Row, 3, 2)];
        let mut lines = pack_lines(&children, Axis::Row, 20, 0, false);
        let props = LayoutProps::row();
        size_crosses(&mut children, &mut lines, Axis::Row, 20, 6, &props);
        // Explicit height stays; auto height stretches to the inner cross.
        assert_eq!(children[0].cross, 1);
        assert_eq!(children[1].cross, 6);
        assert_eq!(lines[0].cross, 6);
    }

    #[test]
    fn test_size_crosses_wrap_line_uses_tallest_member() {
        let a = fixed(1, 4, 2);
        let b = fixed(2, 4, 5);
        let mut children = vec![info(&a, Axis::Row, 4, 2), info(&b, Axis::Row, 4, 5)];
        let mut lines = pack_lines(&children, Axis::Row, 20, 0, true);
        let props = LayoutProps {
            wrap: true,
            ..LayoutProps::row()
        };
        size_crosses(&mut children, &mut lines, Axis::Row, 20, 30, &props);
        assert_eq!(lines[0].cross, 5);
    }
}
