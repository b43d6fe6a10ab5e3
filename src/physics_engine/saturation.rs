//! Water saturation models
//!
//! Every model returns Sw in [0, 1]. Missing or non-positive inputs give
//! Sw = 1 (assume water), the conservative reading for pay counting.

use serde::{Deserialize, Serialize};

/// Saturation equation used by the interpretation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationModel {
    /// Clean sands
    #[default]
    Archie,
    /// Laminated / dispersed shaly sands, saline water
    Simandoux,
    /// Shaly sands with fresh formation water
    Indonesian,
    /// Clay cation-exchange conductivity
    WaxmanSmits,
}

/// Archie electrical parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchieParams {
    /// Tortuosity factor
    pub a: f64,
    /// Cementation exponent
    pub m: f64,
    /// Saturation exponent
    pub n: f64,
}

impl Default for ArchieParams {
    fn default() -> Self {
        Self {
            a: crate::config::defaults::ARCHIE_A,
            m: crate::config::defaults::ARCHIE_M,
            n: crate::config::defaults::ARCHIE_N,
        }
    }
}

impl ArchieParams {
    fn is_valid(&self) -> bool {
        [self.a, self.m, self.n].iter().all(|v| v.is_finite() && *v > 0.0)
    }
}

fn positive(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v > 0.0)
}

fn finalize(sw: f64) -> f64 {
    if sw.is_finite() {
        sw.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Archie water saturation
///
/// Formula: Sw = ((a / φ^m) × (Rw / Rt))^(1/n)
pub fn sw_archie(rt: f64, phi: f64, rw: f64, params: ArchieParams) -> f64 {
    if !positive(&[rt, phi, rw]) || !params.is_valid() {
        return 1.0;
    }
    let sw_n = (params.a / phi.powf(params.m)) * (rw / rt);
    finalize(sw_n.powf(1.0 / params.n))
}

/// Simandoux (quadratic form, n = 2)
///
/// Formula: Sw = (a·Rw / (2φ^m)) × [√((Vsh/Rsh)² + 4φ^m / (a·Rw·Rt)) − Vsh/Rsh]
///
/// `vsh` outside [0, 1] is clamped; Vsh = 0 reduces to Archie with n = 2.
pub fn sw_simandoux(rt: f64, phi: f64, rw: f64, vsh: f64, rsh: f64, params: ArchieParams) -> f64 {
    if !positive(&[rt, phi, rw, rsh]) || !vsh.is_finite() || !params.is_valid() {
        return 1.0;
    }
    let vsh = vsh.clamp(0.0, 1.0);
    let phi_m = phi.powf(params.m);
    let shale_term = vsh / rsh;
    let root = (shale_term * shale_term + 4.0 * phi_m / (params.a * rw * rt)).sqrt();
    finalize((params.a * rw / (2.0 * phi_m)) * (root - shale_term))
}

/// Indonesian (Poupon-Leveaux)
///
/// Formula: 1/√Rt = [Vsh^(1 − Vsh/2) / √Rsh + φ^(m/2) / √(a·Rw)] × Sw^(n/2)
pub fn sw_indonesian(rt: f64, phi: f64, rw: f64, vsh: f64, rsh: f64, params: ArchieParams) -> f64 {
    if !positive(&[rt, phi, rw, rsh]) || !vsh.is_finite() || !params.is_valid() {
        return 1.0;
    }
    let vsh = vsh.clamp(0.0, 1.0);
    let shale_term = vsh.powf(1.0 - vsh / 2.0) / rsh.sqrt();
    let clean_term = phi.powf(params.m / 2.0) / (params.a * rw).sqrt();
    let conductance = shale_term + clean_term;
    if conductance <= 0.0 {
        return 1.0;
    }
    finalize(((1.0 / rt.sqrt()) / conductance).powf(2.0 / params.n))
}

/// Waxman-Smits
///
/// Solves Ct = (Sw^2 / F) × (Cw + B·Qv / Sw) for Sw with n = 2, then applies
/// the general exponent:
///
/// Sw = [−B·Qv + √((B·Qv)² + 4·Cw·F·Ct)] / (2·Cw), raised to 2/n when n ≠ 2
///
/// with F = a / φ^m, Cw = 1/Rw, Ct = 1/Rt. `b` in (S/m)/(meq/cc), `qv` in meq/cc.
pub fn sw_waxman_smits(rt: f64, phi: f64, rw: f64, b: f64, qv: f64, params: ArchieParams) -> f64 {
    if !positive(&[rt, phi, rw]) || !params.is_valid() {
        return 1.0;
    }
    if !b.is_finite() || !qv.is_finite() || qv < 0.0 {
        return 1.0;
    }
    let f = params.a / phi.powf(params.m);
    let cw = 1.0 / rw;
    let ct = 1.0 / rt;
    let bqv = b * qv;
    let sw2 = (-bqv + (bqv * bqv + 4.0 * cw * f * ct).sqrt()) / (2.0 * cw);
    let sw = if (params.n - 2.0).abs() < f64::EPSILON {
        sw2
    } else {
        sw2.max(0.0).powf(2.0 / params.n)
    };
    finalize(sw)
}

/// Juhasz (1981) estimate of the Waxman-Smits B coefficient
///
/// Formula: B = (−1.28 + 0.225·T − 0.0004059·T²) / (1 + Rw^1.23 × (0.045·T − 0.27))
///
/// `temp_c` in °C, `rw` in ohm.m at formation temperature. Returns 0.0 for
/// invalid input or a non-positive result.
pub fn waxman_smits_b(temp_c: f64, rw: f64) -> f64 {
    if !temp_c.is_finite() || !positive(&[rw]) {
        return 0.0;
    }
    let numerator = -1.28 + 0.225 * temp_c - 0.000_405_9 * temp_c * temp_c;
    let denominator = 1.0 + rw.powf(1.23) * (0.045 * temp_c - 0.27);
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    let b = numerator / denominator;
    if b.is_finite() {
        b.max(0.0)
    } else {
        0.0
    }
}
