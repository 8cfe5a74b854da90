//! Axis-generic stack layout, the core algorithm.
//!
//! # Algorithm
//!
//! 1. Resolve the container's own width/height/min/max against the parent
//!    box; subtract margin, then padding, for the inner content box.
//! 2. Classify children once and pick a measurement strategy for the whole
//!    container: fast (no flex resolution), flex+percent, or full
//!    basis/grow/shrink.
//! 3. Pack children onto wrap lines (or one line when not wrapping).
//! 4. Resolve main-axis sizes per line: fixed children consume space first,
//!    flexible children split the remainder through the freeze/redistribute
//!    resolver, percent groups get integer-exact rebalancing.
//! 5. Re-measure main-size-sensitive children whose final main size moved.
//! 6. Resolve cross sizes (stretch fills the line), then place with
//!    justify/align and recurse through the driver callbacks.
//! 7. Absolutely positioned children are placed from their insets against
//!    the content box, outside flow.
//! 8. Compare realized content bounds to the visible box and apply
//!    overflow/scroll clamping and rect shifting.
//!
//! Every failure path returns a coded error for the whole subtree; there is
//! no partial layout.

mod flow;
mod percent;
pub(crate) mod place;
pub(crate) mod scroll;

use log::trace;

use crate::axis::Axis;
use crate::driver::{LayoutDriver, LayoutHints};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::node::{Node, NodeKind};
use crate::numeric::clamp_within;
use crate::props::LayoutProps;
use crate::tree::LayoutTree;

// =============================================================================
// Child classification
// =============================================================================

bitflags::bitflags! {
    /// Per-child layout-relevant prop summary, computed once per container.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct ChildFlags: u8 {
        /// Positive flex factor on the container's main axis.
        const FLEX_MAIN = 1 << 0;
        /// Percent size on the main axis.
        const PERCENT_MAIN = 1 << 1;
        /// Percent size on the cross axis.
        const PERCENT_CROSS = 1 << 2;
        /// flexShrink > 0 or an explicit flexBasis.
        const ADVANCED_FLEX = 1 << 3;
        /// Absolutely positioned, out of flow.
        const ABSOLUTE = 1 << 4;
        /// Anchored overlay child, reserves zero flow space.
        const ANCHORED = 1 << 5;
    }
}

/// How a container measures and sizes its children.
///
/// Chosen once per container from the union of child flags, so the choice is
/// auditable and never re-derived per child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureStrategy {
    /// No flexible children: every child at its natural size.
    Fast,
    /// Flex factors and/or percent sizes, resolved by sequential
    /// consumption with rebalancing.
    FlexPercent,
    /// Full flexbox: basis establishes starting sizes, grow/shrink resolve
    /// the rest.
    BasisGrowShrink,
}

pub(crate) fn child_flags(child: &Node, axis: Axis) -> ChildFlags {
    let props = &child.props;
    let mut flags = ChildFlags::empty();
    if props.flex > 0.0 {
        flags |= ChildFlags::FLEX_MAIN;
    }
    if props.main_size(axis).is_percent() {
        flags |= ChildFlags::PERCENT_MAIN;
    }
    if props.cross_size(axis).is_percent() {
        flags |= ChildFlags::PERCENT_CROSS;
    }
    if props.flex_shrink > 0.0 || !props.flex_basis.is_auto() {
        flags |= ChildFlags::ADVANCED_FLEX;
    }
    if props.is_absolute() {
        flags |= ChildFlags::ABSOLUTE;
    }
    if child.kind == NodeKind::Dropdown {
        flags |= ChildFlags::ANCHORED;
    }
    flags
}

pub(crate) fn pick_strategy(combined: ChildFlags) -> MeasureStrategy {
    if combined.intersects(ChildFlags::ADVANCED_FLEX) {
        MeasureStrategy::BasisGrowShrink
    } else if combined.intersects(
        ChildFlags::FLEX_MAIN | ChildFlags::PERCENT_MAIN | ChildFlags::PERCENT_CROSS,
    ) {
        MeasureStrategy::FlexPercent
    } else {
        MeasureStrategy::Fast
    }
}

/// The measurement strategy a container would use, for instrumentation.
pub fn measure_strategy_for(node: &Node) -> MeasureStrategy {
    let axis = Axis::from_direction(node.props.direction);
    let mut combined = ChildFlags::empty();
    for (_, child) in node.present_children() {
        let flags = child_flags(child, axis);
        if !flags.intersects(ChildFlags::ABSOLUTE | ChildFlags::ANCHORED) {
            combined |= flags;
        }
    }
    pick_strategy(combined)
}

// =============================================================================
// Working state
// =============================================================================

/// Per-flow-child working record for one measure or layout call.
#[derive(Debug)]
pub(crate) struct ChildInfo<'t> {
    pub node: &'t Node,
    /// Original slot index, for source-order output.
    pub slot: usize,
    pub flags: ChildFlags,
    /// Natural border-box size at the inner bounds.
    pub measured: Size,
    /// Final border-box main size.
    pub main: i32,
    /// Final border-box cross size.
    pub cross: i32,
}

impl ChildInfo<'_> {
    /// Main-axis extent including margins.
    pub fn outer_main(&self, axis: Axis) -> i32 {
        self.main + self.node.props.margin.main_sum(axis)
    }

    /// Cross-axis extent including margins.
    pub fn outer_cross(&self, axis: Axis) -> i32 {
        self.cross + self.node.props.margin.cross_sum(axis)
    }
}

/// Children partitioned by how they participate in layout.
pub(crate) struct Partition<'t> {
    pub flow: Vec<ChildInfo<'t>>,
    pub absolute: Vec<(usize, &'t Node)>,
    pub anchored: Vec<(usize, &'t Node)>,
    pub combined: ChildFlags,
}

pub(crate) fn partition_children(node: &Node, axis: Axis) -> Partition<'_> {
    let mut part = Partition {
        flow: Vec::new(),
        absolute: Vec::new(),
        anchored: Vec::new(),
        combined: ChildFlags::empty(),
    };
    for (slot, child) in node.present_children() {
        let flags = child_flags(child, axis);
        if flags.contains(ChildFlags::ABSOLUTE) {
            part.absolute.push((slot, child));
        } else if flags.contains(ChildFlags::ANCHORED) {
            part.anchored.push((slot, child));
        } else {
            part.combined |= flags;
            part.flow.push(ChildInfo {
                node: child,
                slot,
                flags,
                measured: Size::ZERO,
                main: 0,
                cross: 0,
            });
        }
    }
    part
}

// =============================================================================
// Own-size resolution
// =============================================================================

/// A container's resolved own dimensions and bounds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OwnSize {
    /// Resolved border-box width, None when content-sized.
    pub width: Option<i32>,
    /// Resolved border-box height, None when content-sized.
    pub height: Option<i32>,
    /// Space the border box may occupy after subtracting margins.
    pub avail_w: i32,
    pub avail_h: i32,
    /// Resolved min/max bounds for each dimension.
    pub min_w: i32,
    pub max_w: i32,
    pub min_h: i32,
    pub max_h: i32,
}

impl OwnSize {
    /// Final width given measured content (content already excludes padding).
    pub fn settle_width(&self, content_w: i32, padding_w: i32) -> i32 {
        match self.width {
            Some(w) => clamp_within(w, self.min_w, self.max_w),
            None => {
                let hi = self.max_w.min(self.avail_w);
                clamp_within(content_w + padding_w, self.min_w, hi)
            }
        }
    }

    /// Final height given measured content.
    pub fn settle_height(&self, content_h: i32, padding_h: i32) -> i32 {
        match self.height {
            Some(h) => clamp_within(h, self.min_h, self.max_h),
            None => {
                let hi = self.max_h.min(self.avail_h);
                clamp_within(content_h + padding_h, self.min_h, hi)
            }
        }
    }
}

/// Resolve explicit border-box dimensions from size props.
///
/// Cells are literal. Percent resolves against the parent extent and then
/// absorbs the node's own margins, so a 100% child with margins still fits
/// its parent exactly.
pub(crate) fn resolved_border_size(
    props: &LayoutProps,
    parent_w: i32,
    parent_h: i32,
) -> (Option<i32>, Option<i32>) {
    let width = match props.width {
        crate::props::SizeValue::Percent(_) => props
            .width
            .resolve(parent_w)
            .map(|w| (w - props.margin.horizontal()).max(0)),
        _ => props.width.resolve(parent_w),
    };
    let height = match props.height {
        crate::props::SizeValue::Percent(_) => props
            .height
            .resolve(parent_h)
            .map(|h| (h - props.margin.vertical()).max(0)),
        _ => props.height.resolve(parent_h),
    };
    (width, height)
}

pub(crate) fn resolve_own_size(
    props: &LayoutProps,
    max_w: i32,
    max_h: i32,
    hints: &LayoutHints,
) -> OwnSize {
    let avail_w = (max_w - props.margin.horizontal()).max(0);
    let avail_h = (max_h - props.margin.vertical()).max(0);

    let (explicit_w, explicit_h) = resolved_border_size(props, max_w, max_h);
    let width = hints
        .forced_width
        .or(explicit_w)
        .or(hints.precomputed.map(|s| s.width));
    let height = hints
        .forced_height
        .or(explicit_h)
        .or(hints.precomputed.map(|s| s.height));

    OwnSize {
        width,
        height,
        avail_w,
        avail_h,
        min_w: props.min_width.resolve(max_w).unwrap_or(0),
        max_w: props.max_width.resolve_max(max_w, i32::MAX),
        min_h: props.min_height.resolve(max_h).unwrap_or(0),
        max_h: props.max_height.resolve_max(max_h, i32::MAX),
    }
}

// =============================================================================
// Measure
// =============================================================================

/// Measure a stack container's desired border-box size within the given
/// bounds.
pub(crate) fn measure_stack<D: LayoutDriver + ?Sized>(
    node: &Node,
    max_w: i32,
    max_h: i32,
    driver: &mut D,
) -> Result<Size> {
    node.props.validate()?;
    let props = &node.props;
    let axis = Axis::from_direction(props.direction);
    let own = resolve_own_size(props, max_w, max_h, &LayoutHints::default());
    trace!(
        "measure stack {} within {}x{}",
        node.id, max_w, max_h
    );

    let mut part = partition_children(node, axis);
    let strategy = pick_strategy(part.combined);

    let inner_w = (own.width.unwrap_or(own.avail_w) - props.padding.horizontal()).max(0);
    let inner_h = (own.height.unwrap_or(own.avail_h) - props.padding.vertical()).max(0);
    flow::measure_children(&mut part.flow, inner_w, inner_h, axis, strategy, driver)?;

    let inner = Size::new(inner_w, inner_h);
    let lines = flow::pack_lines(&part.flow, axis, axis.main_of(inner), props.gap, props.wrap);
    let (content_main, content_cross) =
        flow::natural_content_size(&part.flow, &lines, axis, props.gap);
    let content = axis.size(content_main, content_cross);

    // Wrapping containers and containers holding a sensitive child change
    // cross size with main size; remember that for the feedback pass.
    let sensitive = props.wrap
        || part.flow.iter().any(|c| {
            driver
                .cache()
                .main_size_sensitive(c.node.id)
                .unwrap_or(false)
        });
    driver.cache().mark_main_size_sensitive(node.id, sensitive);

    let w = own.settle_width(content.width, props.padding.horizontal());
    let h = own.settle_height(content.height, props.padding.vertical());
    Ok(Size::new(w, h))
}

// =============================================================================
// Layout
// =============================================================================

/// Lay out a stack container and its subtree at a committed position.
pub(crate) fn layout_stack<D: LayoutDriver + ?Sized>(
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

    let mut part = partition_children(node, axis);
    let strategy = pick_strategy(part.combined);

    let inner_w_limit = (own.width.unwrap_or(own.avail_w) - props.padding.horizontal()).max(0);
    let inner_h_limit = (own.height.unwrap_or(own.avail_h) - props.padding.vertical()).max(0);
    flow::measure_children(&mut part.flow, inner_w_limit, inner_h_limit, axis, strategy, driver)?;

    let limit = Size::new(inner_w_limit, inner_h_limit);
    let mut lines =
        flow::pack_lines(&part.flow, axis, axis.main_of(limit), props.gap, props.wrap);
    let (content_main, content_cross) =
        flow::natural_content_size(&part.flow, &lines, axis, props.gap);
    let content = axis.size(content_main, content_cross);

    let w = own.settle_width(content.width, props.padding.horizontal());
    let h = own.settle_height(content.height, props.padding.vertical());
    let rect = Rect::new(x, y, w, h);
    trace!("layout stack {} at {},{} size {}x{}", node.id, x, y, w, h);

    // Content box the children live in.
    let cx = x + props.padding.left;
    let cy = y + props.padding.top;
    let cw = (w - props.padding.horizontal()).max(0);
    let ch = (h - props.padding.vertical()).max(0);
    let inner = Size::new(cw, ch);
    let inner_main = axis.main_of(inner);

    for line in &lines {
        flow::size_line_mains(
            props,
            &mut part.flow[line.start..line.end],
            axis,
            inner_main,
            strategy,
        )?;
    }
    flow::apply_cross_feedback(&mut part.flow, axis, cw, ch, driver)?;
    flow::size_crosses(&mut part.flow, &mut lines, axis, cw, ch, props);

    let mut placed = place::place_flow(
        props,
        &part.flow,
        &lines,
        axis,
        cx,
        cy,
        cw,
        ch,
        driver,
    )?;
    placed.extend(place::place_absolute(&part.absolute, cx, cy, cw, ch, driver)?);
    placed.extend(place::place_anchored(&part.anchored, cx, cy, cw, ch, driver)?);
    placed.sort_by_key(|(slot, _)| *slot);

    let mut tree = LayoutTree::new(node.id, node.kind, rect);
    tree.children = placed.into_iter().map(|(_, child)| child).collect();
    scroll::apply_overflow(props, &mut tree, cx, cy, cw, ch);

    Ok(tree)
}
