//! Deterministic volumetrics
//!
//! GRV  = area × gross thickness
//! NRV  = area × net thickness
//! HCPV = area × pay thickness × φ × (1 − Sw)
//!
//! OOIP = 7758 × HCPV / Bo   (stb, area in acres, thickness in ft)
//! OGIP = 43560 × HCPV / Bg  (scf)
//!
//! Reserves = in-place × recovery factor

use crate::config::defaults;
use crate::types::{
    FluidType, InPlace, VolumetricDraw, VolumetricParameters, VolumetricResult, ZonalStats,
};

/// Surface volume per acre-foot of reservoir hydrocarbon, before dividing by FVF
pub fn conversion_factor(fluid: FluidType) -> f64 {
    match fluid {
        FluidType::Oil => defaults::BBL_PER_ACRE_FT,
        FluidType::Gas => defaults::CUFT_PER_ACRE_FT,
    }
}

/// Formation volume factor to use: caller's value when positive, else the configured default.
pub fn resolve_fvf(params: &VolumetricParameters) -> f64 {
    let cfg = &crate::config::get().volumetrics;
    match params.fluid_type {
        FluidType::Oil => params.bo.filter(|b| b.is_finite() && *b > 0.0).unwrap_or(cfg.default_bo),
        FluidType::Gas => params.bg.filter(|b| b.is_finite() && *b > 0.0).unwrap_or(cfg.default_bg),
    }
}

/// Surface in-place volume from hydrocarbon pore volume (acre-ft).
///
/// Returns 0.0 when `fvf` is not positive.
pub fn in_place_from_hcpv(hcpv: f64, fvf: f64, fluid: FluidType) -> f64 {
    if !(fvf.is_finite() && fvf > 0.0) {
        return 0.0;
    }
    conversion_factor(fluid) * hcpv / fvf
}

/// Recoverable volume from the seven volumetric inputs.
///
/// Shared by the deterministic path and the Monte Carlo engine.
pub fn recoverable_volume(draw: &VolumetricDraw, fluid: FluidType) -> f64 {
    let hcpv = draw.area * draw.thickness * draw.ntg * draw.phi * (1.0 - draw.sw);
    in_place_from_hcpv(hcpv, draw.fvf, fluid) * draw.rf
}

/// Volumetric estimate from zonal statistics.
pub fn calculate_volumetrics(stats: &ZonalStats, params: &VolumetricParameters) -> VolumetricResult {
    let area = params.area_acres;
    let grv = area * stats.gross_thickness;
    let nrv = area * stats.net_thickness;
    let hcpv = area * stats.pay_thickness * stats.avg_phi * (1.0 - stats.avg_sw);

    let fvf = resolve_fvf(params);
    let volume = in_place_from_hcpv(hcpv, fvf, params.fluid_type);
    let in_place = match params.fluid_type {
        FluidType::Oil => InPlace::Ooip { volume },
        FluidType::Gas => InPlace::Ogip { volume },
    };

    VolumetricResult {
        grv,
        nrv,
        hcpv,
        in_place,
        reserves: volume * params.recovery_factor,
        fluid_type: params.fluid_type,
    }
}
