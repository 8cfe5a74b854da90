//! Percent rebalancing for the legacy flex+percent strategy.
//!
//! Sequential consumption starves trailing children when declared percents
//! sum past the available space. Two recovery paths fix the common cases:
//! a near-100% group is re-derived with integer-exact shares before the
//! naive pass runs, and an observed collapse afterwards redistributes the
//! budget by declared weight.

use crate::axis::Axis;
use crate::numeric::{clamp_within, distribute_integer};

use super::{ChildFlags, ChildInfo};

/// Integer-exact shares for a line whose percents sum to roughly 100.
///
/// Applies only when every member declares a percent main size, none flex,
/// none carry a main-axis minimum, none are max-capped below their full
/// share, and the declared percents sum to 99..=101. Returns outer-box
/// shares over `budget` (the inner main extent minus gaps).
pub(super) fn near_hundred_shares(
    members: &[ChildInfo<'_>],
    axis: Axis,
    budget: i32,
    inner_main: i32,
) -> Option<Vec<i32>> {
    if members.len() < 2 || budget <= 0 {
        return None;
    }
    let mut percents = Vec::with_capacity(members.len());
    for child in members {
        if child.flags.contains(ChildFlags::FLEX_MAIN) {
            return None;
        }
        let props = &child.node.props;
        let percent = props.main_size(axis).percent()?;
        if props.main_min(axis).resolve(inner_main).unwrap_or(0) > 0 {
            return None;
        }
        let full = (budget as f32 * percent / 100.0).floor() as i32;
        if props.main_max(axis).resolve_max(inner_main, i32::MAX) < full {
            return None;
        }
        percents.push(percent);
    }
    let sum: f32 = percents.iter().sum();
    if !(99.0..=101.0).contains(&sum) {
        return None;
    }
    Some(distribute_integer(budget, &percents))
}

/// Redistribute the budget by declared weight after a collapse.
///
/// Fixed-size members keep their sequential allocation; percent and flex
/// members split the rest weighted by raw percent and 100 x flex
/// respectively, clamped to their min/max afterwards.
pub(super) fn collapse_rescue(
    members: &mut [ChildInfo<'_>],
    axis: Axis,
    budget: i32,
    inner_main: i32,
) {
    let mut fixed_total = 0i32;
    let mut weighted = Vec::new();
    let mut weights = Vec::new();
    for (i, child) in members.iter().enumerate() {
        let props = &child.node.props;
        if child.flags.contains(ChildFlags::FLEX_MAIN) {
            weighted.push(i);
            weights.push(100.0 * props.flex.max(0.0));
        } else if let Some(percent) = props.main_size(axis).percent() {
            weighted.push(i);
            weights.push(percent.max(0.0));
        } else {
            fixed_total += child.outer_main(axis);
        }
    }
    if weighted.is_empty() {
        return;
    }

    let pool = (budget - fixed_total).max(0);
    let shares = distribute_integer(pool, &weights);
    for (k, &i) in weighted.iter().enumerate() {
        let props = &members[i].node.props;
        let margin = props.margin.main_sum(axis);
        let min = props.main_min(axis).resolve(inner_main).unwrap_or(0);
        let max = props.main_max(axis).resolve_max(inner_main, i32::MAX);
        members[i].main = clamp_within((shares[k] - margin).max(0), min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::node::{Node, NodeKind};
    use crate::props::{LayoutProps, SizeValue};
    use crate::stack::child_flags;

    fn percent_node(id: u32, percent: f32) -> Node {
        Node::new(
            id,
            NodeKind::Box,
            LayoutProps {
                width: SizeValue::Percent(percent),
                ..Default::default()
            },
        )
    }

    fn info(node: &Node) -> ChildInfo<'_> {
        ChildInfo {
            node,
            slot: 0,
            flags: child_flags(node, Axis::Row),
            measured: Size::ZERO,
            main: 0,
            cross: 0,
        }
    }

    #[test]
    fn test_near_hundred_exact_thirds() {
        let a = percent_node(1, 33.0);
        let b = percent_node(2, 33.0);
        let c = percent_node(3, 34.0);
        let nodes = [&a, &b, &c];
        let members: Vec<ChildInfo> = nodes.iter().map(|n| info(n)).collect();
        let shares = near_hundred_shares(&members, Axis::Row, 99, 99).unwrap();
        assert_eq!(shares.iter().sum::<i32>(), 99);
        assert!(shares.iter().all(|&s| s > 0));
        assert_eq!(shares, vec![33, 33, 33]);
    }

    #[test]
    fn test_near_hundred_rejects_flex_member() {
        let a = percent_node(1, 50.0);
        let b = Node::new(
            2,
            NodeKind::Box,
            LayoutProps {
                width: SizeValue::Percent(50.0),
                flex: 1.0,
                ..Default::default()
            },
        );
        let members = vec![info(&a), info(&b)];
        assert!(near_hundred_shares(&members, Axis::Row, 100, 100).is_none());
    }

    #[test]
    fn test_near_hundred_rejects_off_sum() {
        let a = percent_node(1, 60.0);
        let b = percent_node(2, 60.0);
        let members = vec![info(&a), info(&b)];
        assert!(near_hundred_shares(&members, Axis::Row, 100, 100).is_none());
    }

    #[test]
    fn test_collapse_rescue_splits_two_full_width_children() {
        let a = percent_node(1, 100.0);
        let b = percent_node(2, 100.0);
        let mut members = vec![info(&a), info(&b)];
        members[0].main = 80;
        members[1].main = 0;
        collapse_rescue(&mut members, Axis::Row, 80, 80);
        assert_eq!(members[0].main, 40);
        assert_eq!(members[1].main, 40);
    }

    #[test]
    fn test_collapse_rescue_keeps_fixed_members() {
        let fixed = Node::new(
            1,
            NodeKind::Box,
            LayoutProps {
                width: SizeValue::Cells(10),
                ..Default::default()
            },
        );
        let flexed = Node::new(
            2,
            NodeKind::Box,
            LayoutProps {
                flex: 1.0,
                ..Default::default()
            },
        );
        let pct = percent_node(3, 100.0);
        let mut members = vec![info(&fixed), info(&flexed), info(&pct)];
        members[0].main = 10;
        members[2].main = 20;
        collapse_rescue(&mut members, Axis::Row, 30, 30);
        assert_eq!(members[0].main, 10);
        // Flex weight 100 and percent weight 100 split the remaining 20.
        assert_eq!(members[1].main, 10);
        assert_eq!(members[2].main, 10);
    }
}
