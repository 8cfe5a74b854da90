//! Proportional flex distribution with min/max relaxation.
//!
//! The standard flexbox resolution: allocate space proportional to weight,
//! and when an item hits its min or max, freeze it at the limit and
//! redistribute the difference among the still-unfrozen items. Each pass
//! freezes at least one item, so the loop is bounded by the item count.
//!
//! All results are integers produced through largest-remainder rounding, so
//! allocations sum exactly to the distributed amount.

use crate::numeric::{clamp_within, distribute_integer};

// =============================================================================
// FlexItem
// =============================================================================

/// Per-call record for one flexible participant.
///
/// Ephemeral: built from child props for a single distribution, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexItem {
    /// Position in the caller's child list, carried through for write-back.
    pub index: usize,
    /// Grow weight. Negative values are treated as zero.
    pub flex: f32,
    /// Shrink weight. Negative values are treated as zero.
    pub shrink: f32,
    /// Starting main-axis size before grow/shrink.
    pub basis: i32,
    /// Lower bound for the final size.
    pub min: i32,
    /// Upper bound for the final size. When below `min`, min wins.
    pub max: i32,
}

impl FlexItem {
    /// An unconstrained grow item.
    pub fn grow(index: usize, flex: f32, max: i32) -> Self {
        Self {
            index,
            flex,
            shrink: 0.0,
            basis: 0,
            min: 0,
            max,
        }
    }

    fn lo(&self) -> i32 {
        self.min.max(0)
    }

    fn hi(&self) -> i32 {
        self.max.max(self.lo())
    }
}

// =============================================================================
// Grow distribution
// =============================================================================

/// Allocate `remaining` cells across `items` proportional to their flex
/// weight.
///
/// Items clamped by min/max are frozen at the limit and the freed or owed
/// amount is redistributed among the rest until the allocation is stable.
/// The returned vector is index-aligned with `items`.
pub fn distribute_flex(remaining: i32, items: &[FlexItem]) -> Vec<i32> {
    let n = items.len();
    if n == 0 {
        return Vec::new();
    }
    let budget = remaining.max(0);

    let mut out = vec![0i32; n];
    let mut frozen = vec![false; n];
    let mut frozen_total = 0i32;

    loop {
        let free = (budget - frozen_total).max(0);
        let weight_sum: f32 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, done)| !**done)
            .map(|(it, _)| it.flex.max(0.0))
            .sum();

        if weight_sum <= 0.0 {
            // No weight left to distribute against; unfrozen items sit at
            // their floor.
            for i in 0..n {
                if !frozen[i] {
                    out[i] = items[i].lo();
                }
            }
            return out;
        }

        let mut any_clamped = false;
        for (i, it) in items.iter().enumerate() {
            if frozen[i] {
                continue;
            }
            let ideal = free as f32 * it.flex.max(0.0) / weight_sum;
            let lo = it.lo();
            let hi = it.hi();
            if ideal < lo as f32 {
                out[i] = lo;
                frozen[i] = true;
                frozen_total += lo;
                any_clamped = true;
            } else if ideal > hi as f32 {
                out[i] = hi;
                frozen[i] = true;
                frozen_total += hi;
                any_clamped = true;
            }
        }

        if !any_clamped {
            // Stable: integerize the unfrozen shares so they sum to the
            // leftover exactly.
            let weights: Vec<f32> = items
                .iter()
                .zip(&frozen)
                .map(|(it, done)| if *done { 0.0 } else { it.flex.max(0.0) })
                .collect();
            let shares = distribute_integer(free, &weights);
            for i in 0..n {
                if !frozen[i] {
                    out[i] = shares[i];
                }
            }
            return out;
        }
    }
}

// =============================================================================
// Shrink distribution
// =============================================================================

/// Reduce items from their basis so the total fits `total` cells.
///
/// Reduction is weighted by shrink factor times basis, the flexbox rule that
/// makes large items give up proportionally more. Items floored at their min
/// freeze and the outstanding reduction moves to the rest. When the combined
/// minimums exceed `total` the result overflows; callers treat that as
/// content overflow, not an error.
pub fn shrink_flex(total: i32, items: &[FlexItem]) -> Vec<i32> {
    let n = items.len();
    if n == 0 {
        return Vec::new();
    }
    let target = total.max(0);

    // Start every item at its clamped basis.
    let mut out: Vec<i32> = items
        .iter()
        .map(|it| clamp_within(it.basis, it.lo(), it.hi()))
        .collect();
    let start_sum: i32 = out.iter().sum();
    if start_sum <= target {
        return out;
    }

    let mut frozen = vec![false; n];
    let starts = out.clone();

    loop {
        let frozen_sum: i32 = (0..n).filter(|&i| frozen[i]).map(|i| out[i]).sum();
        let unfrozen_start_sum: i32 = (0..n).filter(|&i| !frozen[i]).map(|i| starts[i]).sum();
        let excess = frozen_sum + unfrozen_start_sum - target;
        if excess <= 0 {
            for i in 0..n {
                if !frozen[i] {
                    out[i] = starts[i];
                }
            }
            return out;
        }

        let weight_sum: f32 = (0..n)
            .filter(|&i| !frozen[i])
            .map(|i| items[i].shrink.max(0.0) * starts[i] as f32)
            .sum();
        if weight_sum <= 0.0 {
            // Nothing shrinkable remains; the overflow stands.
            for i in 0..n {
                if !frozen[i] {
                    out[i] = starts[i];
                }
            }
            return out;
        }

        let mut any_clamped = false;
        let mut ideals = vec![0.0f32; n];
        for i in 0..n {
            if frozen[i] {
                continue;
            }
            let weight = items[i].shrink.max(0.0) * starts[i] as f32;
            let ideal = starts[i] as f32 - excess as f32 * weight / weight_sum;
            let lo = items[i].lo() as f32;
            if ideal < lo {
                out[i] = items[i].lo();
                frozen[i] = true;
                any_clamped = true;
            } else {
                ideals[i] = ideal;
            }
        }

        if !any_clamped {
            // Integerize the shrunk sizes so the unfrozen fraction sums to
            // the remaining budget exactly.
            let frozen_sum: i32 = (0..n).filter(|&i| frozen[i]).map(|i| out[i]).sum();
            let budget = (target - frozen_sum).max(0);
            let weights: Vec<f32> = (0..n)
                .map(|i| if frozen[i] { 0.0 } else { ideals[i].max(0.0) })
                .collect();
            let shares = distribute_integer(budget, &weights);
            for i in 0..n {
                if !frozen[i] {
                    out[i] = shares[i];
                }
            }
            return out;
        }
    }
}
