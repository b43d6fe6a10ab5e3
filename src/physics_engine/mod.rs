//! Physics Engine Module
//!
//! Deterministic petrophysical calculations. Every calculator is a pure,
//! total function: bad input degrades to `None` or a conservative default
//! (Sw = 1, permeability floor) instead of an error.
//!
//! ## Calculators
//! - `calculate_vshale()` - Shale volume from gamma ray (5 transforms)
//! - `porosity_density()` / `porosity_sonic()` / `porosity_neutron_density()`
//! - `sw_archie()` / `sw_simandoux()` / `sw_indonesian()` / `sw_waxman_smits()`
//! - `perm_timur()` / `perm_coates()` / `perm_wyllie_rose()`
//! - `classify_lithology()` / `classify_fluid()`
//!
//! ## Pipeline
//! - `run_interpretation()` - Derived VSH/PHIE/SW/PERM curves for a whole dataset

pub mod classification;
pub mod interpretation;
pub mod permeability;
pub mod porosity;
pub mod saturation;
pub mod shale;

pub use classification::{apparent_grain_density, classify_fluid, classify_lithology};
pub use interpretation::{
    evaluate_sample, run_interpretation, Interpretation, InterpretationParams, LogReadings,
    SampleEvaluation,
};
pub use permeability::{
    calculate_permeability, perm_coates, perm_timur, perm_wyllie_rose, PermeabilityModel,
};
pub use porosity::{
    effective_porosity, neutron_fraction, porosity_density, porosity_neutron_density,
    porosity_sonic, NdMethod,
};
pub use saturation::{
    sw_archie, sw_indonesian, sw_simandoux, sw_waxman_smits, waxman_smits_b, ArchieParams,
    SaturationModel,
};
pub use shale::{calculate_vshale, gamma_ray_index, vsh_from_index, VshMethod};
