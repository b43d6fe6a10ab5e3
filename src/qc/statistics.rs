//! Per-curve descriptive statistics

use statrs::statistics::{Data, OrderStatistics, Statistics};

use super::bounds::Range;
use crate::types::CurveStatistics;

/// Statistics over `valid` values, with `missing` absent or NULL samples.
///
/// Outliers are values outside the Tukey fences (`fence` × IQR beyond the
/// quartiles). Values outside `hard` are excluded from the outlier count,
/// since the bounds check already reports them.
pub fn curve_statistics(
    valid: &[f64],
    missing: usize,
    fence: f64,
    hard: Option<Range>,
) -> CurveStatistics {
    if valid.is_empty() {
        return CurveStatistics {
            missing,
            ..CurveStatistics::default()
        };
    }

    let count = valid.len();
    let mut data = Data::new(valid.to_vec());
    let q1 = data.quantile(0.25);
    let median = data.quantile(0.5);
    let q3 = data.quantile(0.75);
    let iqr = q3 - q1;

    let std_dev = if count > 1 {
        Statistics::std_dev(valid.iter())
    } else {
        0.0
    };

    let (lower, upper) = (q1 - fence * iqr, q3 + fence * iqr);
    let outliers = valid
        .iter()
        .filter(|v| **v < lower || **v > upper)
        .filter(|v| hard.map_or(true, |h| h.contains(**v)))
        .count();

    CurveStatistics {
        count,
        missing,
        min: Statistics::min(valid.iter()),
        max: Statistics::max(valid.iter()),
        mean: Statistics::mean(valid.iter()),
        median,
        std_dev,
        q1,
        q3,
        iqr,
        outliers,
        outlier_pct: outliers as f64 / count as f64 * 100.0,
    }
}

/// Percentage of samples that are missing
pub fn missing_pct(stats: &CurveStatistics) -> f64 {
    let total = stats.count + stats.missing;
    if total == 0 {
        return 0.0;
    }
    stats.missing as f64 / total as f64 * 100.0
}
