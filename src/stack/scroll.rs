//! Overflow resolution: content bounds, scroll clamping, and child rect
//! shifting.

use log::trace;

use crate::props::LayoutProps;
use crate::tree::{LayoutTree, ScrollInfo};

/// Compare realized content against the viewport and record scroll state.
///
/// Content extent is taken from the direct children's right/bottom edges
/// relative to the content origin. Clipping containers clamp the requested
/// scroll offsets to the overhang and shift every child the opposite way;
/// visible containers report no scroll state and leave children alone.
pub(crate) fn apply_overflow(
    props: &LayoutProps,
    tree: &mut LayoutTree,
    cx: i32,
    cy: i32,
    cw: i32,
    ch: i32,
) {
    if !props.overflow.clips() {
        tree.scroll = None;
        return;
    }

    let mut content_w = 0i32;
    let mut content_h = 0i32;
    for child in &tree.children {
        content_w = content_w.max(child.rect.right() - cx);
        content_h = content_h.max(child.rect.bottom() - cy);
    }

    let max_x = (content_w - cw).max(0);
    let max_y = (content_h - ch).max(0);
    let sx = props.scroll_x.clamp(0, max_x);
    let sy = props.scroll_y.clamp(0, max_y);
    if sx != 0 || sy != 0 {
        trace!("{} scrolled to {sx},{sy}", tree.node);
        for child in &mut tree.children {
            child.shift(-sx, -sy);
        }
    }

    tree.scroll = Some(ScrollInfo {
        scroll_x: sx,
        scroll_y: sy,
        content_width: content_w,
        content_height: content_h,
        viewport_width: cw,
        viewport_height: ch,
    });
}
