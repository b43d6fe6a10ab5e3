//! Per-sample lithology and fluid classification
//!
//! Rule cascades over the computed curves. First matching rule wins.

use crate::config::defaults;
use crate::types::{FluidIndication, Lithology};

/// Apparent matrix (grain) density from bulk density and neutron porosity.
///
/// Formula: ρma = (ρb − φN × ρf) / (1 − φN)
///
/// `phi_n` may be fraction or percent. `None` when φN ≥ 1 after conversion
/// or any input is non-finite.
pub fn apparent_grain_density(rhob: f64, phi_n: f64, rho_fluid: f64) -> Option<f64> {
    if !rhob.is_finite() || !phi_n.is_finite() || !rho_fluid.is_finite() {
        return None;
    }
    let phi_n = super::porosity::neutron_fraction(phi_n);
    if phi_n >= 1.0 {
        return None;
    }
    Some((rhob - phi_n * rho_fluid) / (1.0 - phi_n))
}

/// Classify rock type.
///
/// 1. Vsh > 0.5 → Shale
/// 2. Apparent grain density bands (g/cc):
///    - [2.55, 2.68) Sandstone
///    - [2.68, 2.78) Limestone
///    - [2.78, 2.95] Dolomite
/// 3. Anything else → Unknown
pub fn classify_lithology(vsh: Option<f64>, rhob: Option<f64>, phi_n: Option<f64>) -> Lithology {
    if vsh.is_some_and(|v| v > defaults::LITHOLOGY_SHALE_VSH) {
        return Lithology::Shale;
    }
    let (Some(rhob), Some(phi_n)) = (rhob, phi_n) else {
        return Lithology::Unknown;
    };
    let Some(rho_ma) = apparent_grain_density(rhob, phi_n, defaults::RHO_FLUID_WATER) else {
        return Lithology::Unknown;
    };

    if (defaults::GRAIN_DENSITY_SANDSTONE_MIN..defaults::GRAIN_DENSITY_LIMESTONE_MIN).contains(&rho_ma) {
        Lithology::Sandstone
    } else if (defaults::GRAIN_DENSITY_LIMESTONE_MIN..defaults::GRAIN_DENSITY_DOLOMITE_MIN).contains(&rho_ma) {
        Lithology::Limestone
    } else if (defaults::GRAIN_DENSITY_DOLOMITE_MIN..=defaults::GRAIN_DENSITY_DOLOMITE_MAX).contains(&rho_ma) {
        Lithology::Dolomite
    } else {
        Lithology::Unknown
    }
}

/// Classify pore fluid.
///
/// 1. Vsh > 0.6 or Sw > 0.7 → Water
/// 2. φD − φN > 0.04 (density-neutron crossover) → Gas
/// 3. Otherwise → Oil
///
/// Missing Vsh or Sw skips the water test; missing porosities skip the gas test.
pub fn classify_fluid(
    vsh: Option<f64>,
    sw: Option<f64>,
    phi_d: Option<f64>,
    phi_n: Option<f64>,
) -> FluidIndication {
    let shaly = vsh.is_some_and(|v| v > defaults::FLUID_WATER_VSH);
    let wet = sw.is_some_and(|s| s > defaults::FLUID_WATER_SW);
    if shaly || wet {
        return FluidIndication::Water;
    }

    let crossover = match (phi_d, phi_n) {
        (Some(d), Some(n)) => d - super::porosity::neutron_fraction(n),
        _ => 0.0,
    };
    if crossover > defaults::GAS_CROSSOVER_MIN {
        FluidIndication::Gas
    } else {
        FluidIndication::Oil
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shale_wins() {
        assert_eq!(classify_lithology(Some(0.7), Some(2.3), Some(0.2)), Lithology::Shale);
    }

    #[test]
    fn test_grain_density_bands() {
        // rho_ma = (rhob - 0.2) / 0.8 with phi_n = 0.2
        assert_eq!(classify_lithology(Some(0.1), Some(2.32), Some(0.2)), Lithology::Sandstone);
        assert_eq!(classify_lithology(Some(0.1), Some(2.37), Some(0.2)), Lithology::Limestone);
        assert_eq!(classify_lithology(Some(0.1), Some(2.48), Some(0.2)), Lithology::Dolomite);
        assert_eq!(classify_lithology(Some(0.1), Some(2.10), Some(0.2)), Lithology::Unknown);
    }

    #[test]
    fn test_neutron_in_percent() {
        assert_eq!(classify_lithology(None, Some(2.32), Some(20.0)), Lithology::Sandstone);
    }

    #[test]
    fn test_missing_logs_unknown() {
        assert_eq!(classify_lithology(Some(0.1), None, Some(0.2)), Lithology::Unknown);
        assert_eq!(classify_lithology(None, None, None), Lithology::Unknown);
    }

    #[test]
    fn test_fluid_cascade() {
        assert_eq!(classify_fluid(Some(0.7), Some(0.2), None, None), FluidIndication::Water);
        assert_eq!(classify_fluid(Some(0.1), Some(0.8), None, None), FluidIndication::Water);
        assert_eq!(
            classify_fluid(Some(0.1), Some(0.3), Some(0.25), Some(0.15)),
            FluidIndication::Gas
        );
        assert_eq!(
            classify_fluid(Some(0.1), Some(0.3), Some(0.20), Some(0.19)),
            FluidIndication::Oil
        );
        assert_eq!(classify_fluid(None, None, None, None), FluidIndication::Oil);
    }
}
