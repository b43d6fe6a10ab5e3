//! Log Quality Control
//!
//! Builds a [`QcReport`] for a parsed dataset:
//!
//! 1. Depth continuity: gaps wider than `gap_factor` × nominal step
//! 2. Curve statistics: quartiles, IQR-fence outliers, missing counts
//! 3. Physics bounds: soft/hard range per curve family, one flag per curve
//! 4. Cross validation: bulk density must fall as porosity rises
//!
//! Score = 100 − gap penalty − critical_penalty × critical curves
//!         − warning_penalty × warnings − outlier_penalty × Σ outlier %
//!
//! clamped to [0, 100]. Gaps carry their own penalty, so the continuity
//! warning is not counted again among the warnings. Info flags are free.

pub mod bounds;
pub mod continuity;
pub mod statistics;

pub use bounds::{check_bounds, curve_bounds, role_bounds, CurveBounds, Range};
pub use continuity::{find_gaps, gap_penalty, nominal_step};
pub use statistics::{curve_statistics, missing_pct};

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::acquisition::map_curves;
use crate::config::QcConfig;
use crate::regression::linear_regression;
use crate::types::{CurveMap, CurveRole, LogDataset, QcFlag, QcReport, QcSection, Severity};

/// Run every check against `dataset` with the global QC configuration.
///
/// `well_id` falls back to the ~WELL name, then the configured well name.
pub fn analyze(dataset: &LogDataset, map: &CurveMap, well_id: Option<&str>) -> QcReport {
    let config = crate::config::get();
    let well_id = well_id
        .map(str::to_string)
        .or_else(|| dataset.well_name().map(str::to_string))
        .unwrap_or_else(|| config.well.name.clone());
    analyze_with(dataset, map, well_id, &config.qc)
}

/// [`analyze`] with the curve map inferred from the dataset
pub fn analyze_auto(dataset: &LogDataset, well_id: Option<&str>) -> QcReport {
    analyze(dataset, &map_curves(dataset), well_id)
}

pub fn analyze_with(
    dataset: &LogDataset,
    map: &CurveMap,
    well_id: String,
    cfg: &QcConfig,
) -> QcReport {
    if dataset.is_empty() {
        return QcReport {
            well_id,
            flags: vec![QcFlag::new(
                Severity::Critical,
                QcSection::Dataset,
                "Dataset has no curves or no data rows",
            )],
            stats: BTreeMap::new(),
            score: 0.0,
            gaps: Vec::new(),
            total_gaps: 0,
            nominal_step: None,
        };
    }

    let mut flags = Vec::new();
    if dataset.dropped_rows > 0 {
        flags.push(QcFlag::new(
            Severity::Info,
            QcSection::Dataset,
            format!("{} data row(s) dropped for a column count mismatch", dataset.dropped_rows),
        ));
    }

    // ------------------------------------------------------------------------
    // Depth continuity
    // ------------------------------------------------------------------------
    let depth_mnemonic = map
        .get(CurveRole::Depth)
        .or_else(|| dataset.curves.first().map(|c| c.mnemonic.as_str()));
    let depths: Vec<f64> = depth_mnemonic
        .map(|m| dataset.column(m).into_iter().flatten().collect())
        .unwrap_or_default();

    let step = nominal_step(dataset.step(), &depths);
    let all_gaps = step.map(|s| find_gaps(&depths, s, cfg.gap_factor)).unwrap_or_default();
    let total_gaps = all_gaps.len();
    if total_gaps > 0 {
        flags.push(QcFlag::new(
            Severity::Warning,
            QcSection::DepthContinuity,
            format!(
                "{total_gaps} depth gap(s) wider than {:.1}x the {:.4} step",
                cfg.gap_factor,
                step.unwrap_or_default()
            ),
        ));
    }
    let gaps: Vec<_> = all_gaps.into_iter().take(cfg.max_reported_gaps).collect();

    // ------------------------------------------------------------------------
    // Per-curve statistics and bounds
    // ------------------------------------------------------------------------
    let mut stats = BTreeMap::new();
    let mut critical_curves = 0usize;
    for curve in &dataset.curves {
        let column = dataset.column(&curve.mnemonic);
        let valid: Vec<f64> = column.iter().flatten().copied().collect();
        let missing = column.len() - valid.len();
        let limits = curve_bounds(curve);

        let curve_stats =
            curve_statistics(&valid, missing, cfg.iqr_fence, limits.map(|b| b.hard));
        let pct_missing = missing_pct(&curve_stats);
        if pct_missing > cfg.high_missing_pct {
            flags.push(QcFlag::new(
                Severity::Info,
                QcSection::CurveStatistics,
                format!("{}: {pct_missing:.1}% of samples missing", curve.mnemonic),
            ));
        }

        if let Some(flag) = limits.and_then(|b| check_bounds(&curve.mnemonic, &valid, &b)) {
            if flag.severity == Severity::Critical {
                critical_curves += 1;
            }
            flags.push(flag);
        }

        stats.insert(curve.mnemonic.clone(), curve_stats);
    }

    if let Some(flag) = cross_validate(dataset, map) {
        flags.push(flag);
    }

    // ------------------------------------------------------------------------
    // Score
    // ------------------------------------------------------------------------
    let warnings = flags
        .iter()
        .filter(|f| f.severity == Severity::Warning && f.section != QcSection::DepthContinuity)
        .count();
    let outlier_pct: f64 = stats.values().map(|s| s.outlier_pct).sum();
    let score = (100.0
        - gap_penalty(total_gaps, cfg.gap_penalty_per_gap, cfg.gap_penalty_cap)
        - cfg.critical_penalty * critical_curves as f64
        - cfg.warning_penalty * warnings as f64
        - cfg.outlier_penalty_per_pct * outlier_pct)
        .clamp(0.0, 100.0);

    debug!(
        total_gaps,
        critical_curves,
        warnings,
        outlier_pct,
        "QC components"
    );
    info!(well = %well_id, score, flags = flags.len(), "QC complete");

    QcReport {
        well_id,
        flags,
        stats,
        score,
        gaps,
        total_gaps,
        nominal_step: step,
    }
}

/// Bulk density regressed on effective porosity should have a negative slope.
fn cross_validate(dataset: &LogDataset, map: &CurveMap) -> Option<QcFlag> {
    let phie = map.get(CurveRole::Phie)?;
    let rhob = map.get(CurveRole::Rhob)?;

    let (x, y): (Vec<f64>, Vec<f64>) = (0..dataset.data.len())
        .filter_map(|i| Some((dataset.value(i, phie)?, dataset.value(i, rhob)?)))
        .unzip();
    let fit = linear_regression(&x, &y)?;

    (fit.slope > 0.0).then(|| {
        QcFlag::new(
            Severity::Warning,
            QcSection::CrossValidation,
            format!(
                "{rhob} increases with {phie} (slope {:.3}, R² {:.2}); expected a negative correlation",
                fit.slope, fit.r_squared
            ),
        )
    })
}
