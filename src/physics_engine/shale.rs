//! Shale volume from gamma ray
//!
//! All methods start from the gamma-ray index:
//!
//! IGR = (GR - GR_clean) / (GR_shale - GR_clean), clamped to [0, 1]
//!
//! and bend it into Vsh. Linear is the most pessimistic; the nonlinear
//! transforms all read less shale for the same index.

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Gamma-ray index to Vsh transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VshMethod {
    #[default]
    Linear,
    /// Larionov, pre-Tertiary (consolidated) rocks
    LarionovOlder,
    /// Larionov, Tertiary (unconsolidated) rocks
    LarionovTertiary,
    Steiber,
    Clavier,
}

impl VshMethod {
    pub const ALL: [VshMethod; 5] = [
        VshMethod::Linear,
        VshMethod::LarionovOlder,
        VshMethod::LarionovTertiary,
        VshMethod::Steiber,
        VshMethod::Clavier,
    ];
}

/// Gamma-ray index in [0, 1].
///
/// The shale pick is forced at least `GR_MIN_SPREAD` above the clean pick so
/// the denominator is never zero or negative. `None` for non-finite input.
pub fn gamma_ray_index(gr: f64, gr_clean: f64, gr_shale: f64) -> Option<f64> {
    if !gr.is_finite() || !gr_clean.is_finite() || !gr_shale.is_finite() {
        return None;
    }
    let gr_shale = gr_shale.max(gr_clean + defaults::GR_MIN_SPREAD);
    Some(((gr - gr_clean) / (gr_shale - gr_clean)).clamp(0.0, 1.0))
}

/// Apply a transform to a gamma-ray index already in [0, 1].
///
/// - Linear: Vsh = IGR
/// - Larionov older: Vsh = 0.33 × (2^(2·IGR) − 1)
/// - Larionov Tertiary: Vsh = 0.083 × (2^(3.7·IGR) − 1)
/// - Steiber: Vsh = IGR / (3 − 2·IGR)
/// - Clavier: Vsh = 1.7 − √(3.38 − (IGR + 0.7)²)
///
/// Result clamped to [0, 1].
pub fn vsh_from_index(ish: f64, method: VshMethod) -> f64 {
    let ish = ish.clamp(0.0, 1.0);
    let vsh = match method {
        VshMethod::Linear => ish,
        VshMethod::LarionovOlder => 0.33 * (2f64.powf(2.0 * ish) - 1.0),
        VshMethod::LarionovTertiary => 0.083 * (2f64.powf(3.7 * ish) - 1.0),
        // Index clamped to 1 above, so the denominator never drops below 1
        VshMethod::Steiber => ish / (3.0 - 2.0 * ish),
        VshMethod::Clavier => {
            let radicand = 3.38 - (ish + 0.7).powi(2);
            if radicand < 0.0 {
                1.0
            } else {
                1.7 - radicand.sqrt()
            }
        }
    };
    if vsh.is_finite() {
        vsh.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Shale volume (v/v) from a gamma-ray reading.
///
/// Returns `None` when `gr` is not finite.
pub fn calculate_vshale(gr: f64, gr_clean: f64, gr_shale: f64, method: VshMethod) -> Option<f64> {
    gamma_ray_index(gr, gr_clean, gr_shale).map(|ish| vsh_from_index(ish, method))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_methods_zero_at_clean_line() {
        for method in VshMethod::ALL {
            let vsh = calculate_vshale(20.0, 20.0, 120.0, method).unwrap();
            assert!(vsh.abs() < 1e-12, "{method:?} gave {vsh} at IGR=0");
        }
    }

    #[test]
    fn test_all_methods_bounded_and_monotonic() {
        for method in VshMethod::ALL {
            let mut prev = -1.0;
            for step in 0..=20 {
                let ish = f64::from(step) / 20.0;
                let vsh = vsh_from_index(ish, method);
                assert!((0.0..=1.0).contains(&vsh), "{method:?} out of range at {ish}");
                assert!(vsh >= prev - 1e-12, "{method:?} not monotonic at {ish}");
                prev = vsh;
            }
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let vsh = calculate_vshale(70.0, 20.0, 120.0, VshMethod::Linear).unwrap();
        assert!((vsh - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_nonlinear_reads_less_than_linear() {
        for method in [
            VshMethod::LarionovOlder,
            VshMethod::LarionovTertiary,
            VshMethod::Steiber,
            VshMethod::Clavier,
        ] {
            assert!(vsh_from_index(0.5, method) < 0.5, "{method:?}");
        }
    }

    #[test]
    fn test_steiber_full_shale() {
        assert!((vsh_from_index(1.0, VshMethod::Steiber) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_steiber_near_singularity_is_full_shale() {
        // 3 - 2·IGR vanishes at IGR = 1.5
        assert_eq!(vsh_from_index(1.5, VshMethod::Steiber), 1.0);
        assert_eq!(vsh_from_index(1.49999, VshMethod::Steiber), 1.0);
        assert_eq!(vsh_from_index(f64::MAX, VshMethod::Steiber), 1.0);
        let vsh = calculate_vshale(170.0, 20.0, 120.0, VshMethod::Steiber).unwrap();
        assert_eq!(vsh, 1.0);
    }

    #[test]
    fn test_index_clamped_and_spread_forced() {
        assert_eq!(gamma_ray_index(500.0, 20.0, 120.0), Some(1.0));
        assert_eq!(gamma_ray_index(5.0, 20.0, 120.0), Some(0.0));
        // Inverted picks: shale forced to clean + 1
        assert_eq!(gamma_ray_index(21.0, 20.0, 10.0), Some(1.0));
    }

    #[test]
    fn test_non_finite_gr_is_none() {
        assert_eq!(calculate_vshale(f64::NAN, 20.0, 120.0, VshMethod::Linear), None);
        assert_eq!(calculate_vshale(f64::INFINITY, 20.0, 120.0, VshMethod::Steiber), None);
    }
}
