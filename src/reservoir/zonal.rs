//! Zonal aggregation over a depth window
//!
//! Each sample in [top, base] counts toward gross. It is net when
//! Vsh ≤ vsh_max and φ ≥ phi_min, and pay when also Sw ≤ sw_max.
//! Thickness = sample count × step. Averages are over pay samples.

use tracing::debug;

use crate::types::{CurveMap, CurveRole, LogDataset, ZonalStats, ZoneCutoffs};

/// Properties of one sample inside the window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneSample {
    pub phi: Option<f64>,
    pub sw: Option<f64>,
    pub vsh: Option<f64>,
}

impl ZoneSample {
    /// Absent φ or Vsh fails the net test; absent Sw fails the pay test.
    fn is_net(&self, cutoffs: &ZoneCutoffs) -> bool {
        match (self.phi, self.vsh) {
            (Some(phi), Some(vsh)) => vsh <= cutoffs.vsh_max && phi >= cutoffs.phi_min,
            _ => false,
        }
    }

    fn is_pay(&self, cutoffs: &ZoneCutoffs) -> bool {
        self.is_net(cutoffs) && self.sw.is_some_and(|sw| sw <= cutoffs.sw_max)
    }
}

/// Aggregate already-windowed samples.
///
/// Returns `None` for an empty slice.
pub fn aggregate_samples(samples: &[ZoneSample], step: f64, cutoffs: &ZoneCutoffs) -> Option<ZonalStats> {
    if samples.is_empty() {
        return None;
    }
    let step = if step.is_finite() { step.abs() } else { 0.0 };

    let net = samples.iter().filter(|s| s.is_net(cutoffs)).count();
    let pay: Vec<&ZoneSample> = samples.iter().filter(|s| s.is_pay(cutoffs)).collect();

    let mean_over_pay = |get: fn(&ZoneSample) -> Option<f64>| -> f64 {
        if pay.is_empty() {
            return 0.0;
        }
        let sum: f64 = pay.iter().filter_map(|s| get(s)).sum();
        sum / pay.len() as f64
    };

    Some(ZonalStats {
        gross_thickness: samples.len() as f64 * step,
        net_thickness: net as f64 * step,
        pay_thickness: pay.len() as f64 * step,
        ntg: net as f64 / samples.len() as f64,
        avg_phi: mean_over_pay(|s| s.phi),
        avg_sw: mean_over_pay(|s| s.sw),
        avg_vsh: mean_over_pay(|s| s.vsh),
    })
}

/// Sampling interval: declared STEP, else the spacing of the first two depths.
pub fn sample_step(dataset: &LogDataset, depth_mnemonic: &str) -> f64 {
    if let Some(step) = dataset.step() {
        return step.abs();
    }
    let depths: Vec<f64> = dataset
        .column(depth_mnemonic)
        .into_iter()
        .flatten()
        .take(2)
        .collect();
    match depths.as_slice() {
        [d0, d1] => (d1 - d0).abs(),
        _ => 0.0,
    }
}

/// Zonal statistics for the window [top, base].
///
/// Returns `None` if DEPTH, PHIE or SW is unmapped or no sample lies in the
/// window. An unmapped VSH role counts every sample as clean (Vsh = 0).
/// `top` and `base` may be given in either order.
pub fn compute_zonal_stats(
    dataset: &LogDataset,
    map: &CurveMap,
    top: f64,
    base: f64,
    cutoffs: &ZoneCutoffs,
) -> Option<ZonalStats> {
    let depth_m = map.get(CurveRole::Depth)?;
    let phie_m = map.get(CurveRole::Phie)?;
    let sw_m = map.get(CurveRole::Sw)?;
    let vsh_m = map.get(CurveRole::Vsh);

    let (top, base) = if top <= base { (top, base) } else { (base, top) };

    let samples: Vec<ZoneSample> = (0..dataset.data.len())
        .filter(|&i| {
            dataset
                .value(i, depth_m)
                .is_some_and(|d| d >= top && d <= base)
        })
        .map(|i| ZoneSample {
            phi: dataset.value(i, phie_m),
            sw: dataset.value(i, sw_m),
            vsh: match vsh_m {
                Some(m) => dataset.value(i, m),
                None => Some(0.0),
            },
        })
        .collect();

    let step = sample_step(dataset, depth_m);
    let stats = aggregate_samples(&samples, step, cutoffs);
    if let Some(ref s) = stats {
        debug!(
            top,
            base,
            samples = samples.len(),
            step,
            net = s.net_thickness,
            pay = s.pay_thickness,
            "Zonal statistics computed"
        );
    }
    stats
}
