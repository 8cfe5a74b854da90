//! Numeric primitives for integer-exact layout.
//!
//! Terminal layout has no fractional cells, so every proportional split must
//! land on whole numbers that still sum to the original total. The helpers
//! here are the only places rounding happens; everything above them deals in
//! already-exact integers.

// =============================================================================
// Clamping
// =============================================================================

/// Force `v` into `[min, max]`. When `min > max`, min wins.
#[inline]
pub fn clamp_within(v: i32, min: i32, max: i32) -> i32 {
    let hi = max.max(min);
    v.clamp(min, hi)
}

/// Resolve a raw max constraint to an integer cap.
///
/// An unset, non-finite, or non-positive max means "uncapped": `fallback`
/// is substituted so integer math never sees infinity.
#[inline]
pub fn max_or(raw: f32, fallback: i32) -> i32 {
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as i32
    } else {
        fallback
    }
}

// =============================================================================
// Largest-remainder distribution
// =============================================================================

/// Split integer `total` across `weights` so the results sum exactly to
/// `total`.
///
/// Uses largest-remainder rounding: each weight gets the floor of its
/// proportional share, then leftover cells go to the largest fractional
/// parts (ties broken by lower index, so results are deterministic).
///
/// Negative weights are clamped to zero. If every weight is zero the split
/// falls back to equal weights.
pub fn distribute_integer(total: i32, weights: &[f32]) -> Vec<i32> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    let total = total.max(0);

    let cleaned: Vec<f32> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let sum: f32 = cleaned.iter().sum();

    let shares: Vec<f32> = if sum > 0.0 {
        cleaned
            .iter()
            .map(|&w| total as f32 * w / sum)
            .collect()
    } else {
        vec![total as f32 / n as f32; n]
    };

    let mut result: Vec<i32> = shares.iter().map(|&s| s.floor() as i32).collect();
    let assigned: i32 = result.iter().sum();
    let mut leftover = total - assigned;

    // Hand the leftover cells to the largest fractional parts.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let fa = shares[a] - shares[a].floor();
        let fb = shares[b] - shares[b].floor();
        fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b))
    });
    let mut step = 0usize;
    while leftover > 0 {
        result[order[step % n]] += 1;
        leftover -= 1;
        step += 1;
    }
    // Float error can make the floors overshoot; claw back from the
    // smallest fractional parts.
    while leftover < 0 {
        let i = order[n - 1 - (step % n)];
        if result[i] > 0 {
            result[i] -= 1;
            leftover += 1;
        }
        step += 1;
    }

    result
}
