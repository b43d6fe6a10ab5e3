//! Porosity from density, sonic and neutron logs
//!
//! Single-tool porosities are clamped to [0, POROSITY_MAX]. Readings that
//! cannot be physical (bulk density below 1 g/cc, matrix equal to fluid)
//! return `None` rather than a clamped number.

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// How density and neutron porosity are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NdMethod {
    /// √((φD² + φN²) / 2), the usual gas-tolerant average
    #[default]
    RootMeanSquare,
    /// (φD + φN) / 2
    Arithmetic,
}

fn clamp_porosity(phi: f64) -> f64 {
    phi.clamp(0.0, defaults::POROSITY_MAX)
}

/// Density porosity
///
/// Formula: φD = (ρma − ρb) / (ρma − ρf)
///
/// Returns `None` for non-finite input, ρb below `MIN_VALID_RHOB`, or ρma = ρf.
pub fn porosity_density(rhob: f64, rho_matrix: f64, rho_fluid: f64) -> Option<f64> {
    if !rhob.is_finite() || !rho_matrix.is_finite() || !rho_fluid.is_finite() {
        return None;
    }
    if rhob < defaults::MIN_VALID_RHOB {
        return None;
    }
    let denominator = rho_matrix - rho_fluid;
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    Some(clamp_porosity((rho_matrix - rhob) / denominator))
}

/// Sonic porosity (Wyllie time-average)
///
/// Formula: φS = (Δt − Δtma) / (Δtf − Δtma)
///
/// Returns `None` for non-finite or non-positive Δt, or Δtf = Δtma.
pub fn porosity_sonic(dt: f64, dt_matrix: f64, dt_fluid: f64) -> Option<f64> {
    if !dt.is_finite() || !dt_matrix.is_finite() || !dt_fluid.is_finite() || dt <= 0.0 {
        return None;
    }
    let denominator = dt_fluid - dt_matrix;
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    Some(clamp_porosity((dt - dt_matrix) / denominator))
}

/// Neutron porosity as a fraction; values above 1 are taken as percent.
pub fn neutron_fraction(phi_n: f64) -> f64 {
    if phi_n > defaults::NPHI_PERCENT_THRESHOLD {
        phi_n / 100.0
    } else {
        phi_n
    }
}

/// Combined neutron-density porosity, clamped to [0, POROSITY_MAX].
///
/// `phi_n` may be in fraction or percent. `None` for non-finite input.
pub fn porosity_neutron_density(phi_d: f64, phi_n: f64, method: NdMethod) -> Option<f64> {
    if !phi_d.is_finite() || !phi_n.is_finite() {
        return None;
    }
    let phi_n = neutron_fraction(phi_n);
    let combined = match method {
        NdMethod::RootMeanSquare => ((phi_d * phi_d + phi_n * phi_n) / 2.0).sqrt(),
        NdMethod::Arithmetic => (phi_d + phi_n) / 2.0,
    };
    Some(clamp_porosity(combined))
}

/// Effective porosity: total porosity reduced by the shale fraction.
///
/// Formula: φe = φt × (1 − Vsh)
pub fn effective_porosity(phi_total: f64, vsh: f64) -> f64 {
    clamp_porosity(phi_total * (1.0 - vsh.clamp(0.0, 1.0)))
}
