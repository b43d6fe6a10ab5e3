//! Reservoir layer: zonal net/pay statistics and deterministic volumetrics

pub mod volumetrics;
pub mod zonal;

pub use volumetrics::{
    calculate_volumetrics, conversion_factor, in_place_from_hcpv, recoverable_volume, resolve_fvf,
};
pub use zonal::{aggregate_samples, compute_zonal_stats, sample_step, ZoneSample};
