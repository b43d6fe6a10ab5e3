//! Depth sampling continuity

use crate::types::DepthGap;

/// Sampling step: declared STEP if present, else the spacing of the first two depths.
pub fn nominal_step(declared: Option<f64>, depths: &[f64]) -> Option<f64> {
    declared
        .map(f64::abs)
        .or_else(|| match depths {
            [first, second, ..] => Some((second - first).abs()),
            _ => None,
        })
        .filter(|s| s.is_finite() && *s > 0.0)
}

/// Every interval between consecutive depths wider than `factor` × `step`.
pub fn find_gaps(depths: &[f64], step: f64, factor: f64) -> Vec<DepthGap> {
    let threshold = factor * step;
    depths
        .windows(2)
        .filter_map(|w| {
            let size = (w[1] - w[0]).abs();
            (size > threshold).then_some(DepthGap {
                top: w[0].min(w[1]),
                base: w[0].max(w[1]),
                size,
            })
        })
        .collect()
}

/// Score penalty for `gaps` gaps
pub fn gap_penalty(gaps: usize, per_gap: f64, cap: f64) -> f64 {
    (gaps as f64 * per_gap).min(cap)
}
