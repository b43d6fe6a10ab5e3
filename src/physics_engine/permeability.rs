//! Permeability estimates from porosity and irreducible water saturation
//!
//! Results are in mD, clamped to the configured `[permeability]` range.
//! Invalid input (φ or Swi outside (0, 1]) returns the floor.

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Empirical permeability transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermeabilityModel {
    #[default]
    Timur,
    Coates,
    WyllieRose,
}

fn valid_fraction(v: f64) -> bool {
    v.is_finite() && v > 0.0 && v <= 1.0
}

fn clamp_perm(k: f64) -> f64 {
    let cfg = &crate::config::get().permeability;
    if k.is_finite() {
        k.clamp(cfg.min_md, cfg.max_md)
    } else {
        cfg.min_md
    }
}

fn floor() -> f64 {
    crate::config::get().permeability.min_md
}

/// Timur (1968)
///
/// Formula: k = 0.136 × (φ%)^4.4 / (Swi%)²
pub fn perm_timur(phi: f64, swi: f64) -> f64 {
    if !valid_fraction(phi) || !valid_fraction(swi) {
        return floor();
    }
    let phi_pct = phi * 100.0;
    let swi_pct = swi * 100.0;
    clamp_perm(
        defaults::TIMUR_COEFFICIENT * phi_pct.powf(defaults::TIMUR_PHI_EXPONENT)
            / swi_pct.powf(defaults::TIMUR_SWI_EXPONENT),
    )
}

/// Coates free-fluid model
///
/// Formula: k = (100 × φ² × (1 − Swi) / Swi)²
pub fn perm_coates(phi: f64, swi: f64) -> f64 {
    if !valid_fraction(phi) || !valid_fraction(swi) {
        return floor();
    }
    let root = defaults::COATES_COEFFICIENT * phi * phi * (1.0 - swi) / swi;
    clamp_perm(root * root)
}

/// Wyllie-Rose (oil constant)
///
/// Formula: k = (250 × φ³ / Swi)²
pub fn perm_wyllie_rose(phi: f64, swi: f64) -> f64 {
    if !valid_fraction(phi) || !valid_fraction(swi) {
        return floor();
    }
    let root = defaults::WYLLIE_ROSE_COEFFICIENT * phi.powi(3) / swi;
    clamp_perm(root * root)
}

/// Dispatch on the chosen model
pub fn calculate_permeability(phi: f64, swi: f64, model: PermeabilityModel) -> f64 {
    match model {
        PermeabilityModel::Timur => perm_timur(phi, swi),
        PermeabilityModel::Coates => perm_coates(phi, swi),
        PermeabilityModel::WyllieRose => perm_wyllie_rose(phi, swi),
    }
}
