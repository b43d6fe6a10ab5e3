//! System-wide default constants.
//!
//! Centralises the numeric thresholds used by the calculators, the reservoir
//! layer, the simulator and the QC analyzer. Grouped by subsystem for easy
//! discovery. Values that operators tune per field are mirrored in
//! `EngineConfig`; the rest are fixed physics.

// ============================================================================
// Porosity
// ============================================================================

/// Upper clamp for density, sonic and combined porosity (v/v).
pub const POROSITY_MAX: f64 = 0.5;

/// Bulk density below this (g/cc) is treated as a bad reading (washout, mud).
pub const MIN_VALID_RHOB: f64 = 1.0;

/// Neutron porosity above this is assumed to be in percent (p.u.).
pub const NPHI_PERCENT_THRESHOLD: f64 = 1.0;

/// Quartz sandstone matrix density (g/cc).
pub const RHO_MATRIX_SANDSTONE: f64 = 2.65;

/// Fresh-water mud filtrate density (g/cc).
pub const RHO_FLUID_WATER: f64 = 1.0;

/// Sandstone matrix slowness (us/ft).
pub const DT_MATRIX_SANDSTONE: f64 = 55.5;

/// Water-based fluid slowness (us/ft).
pub const DT_FLUID_WATER: f64 = 189.0;

// ============================================================================
// Shale Volume
// ============================================================================

/// Minimum spread between clean and shale gamma-ray picks (API).
pub const GR_MIN_SPREAD: f64 = 1.0;

/// Default clean-sand gamma-ray pick (API).
pub const GR_CLEAN_DEFAULT: f64 = 20.0;

/// Default shale gamma-ray pick (API).
pub const GR_SHALE_DEFAULT: f64 = 120.0;

// ============================================================================
// Saturation
// ============================================================================

/// Archie tortuosity factor.
pub const ARCHIE_A: f64 = 1.0;

/// Archie cementation exponent.
pub const ARCHIE_M: f64 = 2.0;

/// Archie saturation exponent.
pub const ARCHIE_N: f64 = 2.0;

/// Default formation water resistivity (ohm.m).
pub const RW_DEFAULT: f64 = 0.05;

/// Default shale resistivity (ohm.m).
pub const RSH_DEFAULT: f64 = 2.0;

/// Formation temperature for the Waxman-Smits B estimate (degC).
pub const FORMATION_TEMPERATURE_C: f64 = 60.0;

/// Cation exchange capacity per unit pore volume (meq/cc).
pub const QV_DEFAULT: f64 = 0.1;

// ============================================================================
// Permeability
// ============================================================================

/// Permeability floor (mD). Also returned for invalid inputs.
pub const PERM_MIN_MD: f64 = 0.01;

/// Permeability ceiling (mD).
pub const PERM_MAX_MD: f64 = 10_000.0;

/// Timur coefficient (porosity and Swi in percent).
pub const TIMUR_COEFFICIENT: f64 = 0.136;

/// Timur porosity exponent.
pub const TIMUR_PHI_EXPONENT: f64 = 4.4;

/// Timur Swi exponent.
pub const TIMUR_SWI_EXPONENT: f64 = 2.0;

/// Coates free-fluid coefficient.
pub const COATES_COEFFICIENT: f64 = 100.0;

/// Wyllie-Rose coefficient for oil (use 79 for dry gas).
pub const WYLLIE_ROSE_COEFFICIENT: f64 = 250.0;

// ============================================================================
// Classification
// ============================================================================

/// Vsh above this classifies a sample as shale.
pub const LITHOLOGY_SHALE_VSH: f64 = 0.5;

/// Apparent grain density band edges (g/cc): sandstone / limestone / dolomite.
pub const GRAIN_DENSITY_SANDSTONE_MIN: f64 = 2.55;
pub const GRAIN_DENSITY_LIMESTONE_MIN: f64 = 2.68;
pub const GRAIN_DENSITY_DOLOMITE_MIN: f64 = 2.78;
pub const GRAIN_DENSITY_DOLOMITE_MAX: f64 = 2.95;

/// Vsh above this reads as water (bound water dominates).
pub const FLUID_WATER_VSH: f64 = 0.6;

/// Sw above this reads as water.
pub const FLUID_WATER_SW: f64 = 0.7;

/// Density minus neutron porosity above this is a gas crossover.
pub const GAS_CROSSOVER_MIN: f64 = 0.04;

// ============================================================================
// Zonal Cutoffs
// ============================================================================

/// Maximum shale volume for net reservoir (v/v).
pub const CUTOFF_VSH_MAX: f64 = 0.4;

/// Minimum porosity for net reservoir (v/v).
pub const CUTOFF_PHI_MIN: f64 = 0.08;

/// Maximum water saturation for pay (v/v).
pub const CUTOFF_SW_MAX: f64 = 0.6;

// ============================================================================
// Volumetrics
// ============================================================================

/// Barrels per acre-foot.
pub const BBL_PER_ACRE_FT: f64 = 7758.0;

/// Cubic feet per acre-foot.
pub const CUFT_PER_ACRE_FT: f64 = 43_560.0;

/// Oil formation volume factor used when none is supplied (rb/stb).
pub const DEFAULT_BO: f64 = 1.2;

/// Gas formation volume factor used when none is supplied (rcf/scf).
pub const DEFAULT_BG: f64 = 0.005;

// ============================================================================
// Monte Carlo
// ============================================================================

/// Iterations when the caller does not specify a count.
pub const MC_DEFAULT_ITERATIONS: usize = 1_000;

/// Fraction trimmed from each end of triangular/uniform ranges for sensitivity bounds.
pub const MC_SENSITIVITY_TRIM: f64 = 0.10;

/// Standard deviations either side of the mean for normal sensitivity bounds.
///
/// 1.28 sigma brackets the central 80%, matching the 10% trim.
pub const MC_SENSITIVITY_NORMAL_Z: f64 = 1.28;

/// Iterations per independently seeded chunk in the parallel runner.
pub const MC_PARALLEL_CHUNK_SIZE: usize = 256;

// ============================================================================
// Quality Control
// ============================================================================

/// A depth step larger than this multiple of the nominal step is a gap.
pub const QC_GAP_FACTOR: f64 = 1.5;

/// Gaps listed explicitly in the report (the total is always reported).
pub const QC_MAX_REPORTED_GAPS: usize = 5;

/// Score penalty per depth gap.
pub const QC_GAP_PENALTY_PER_GAP: f64 = 2.0;

/// Maximum total score penalty from depth gaps.
pub const QC_GAP_PENALTY_CAP: f64 = 20.0;

/// Score penalty per curve with a critical flag.
pub const QC_CRITICAL_PENALTY: f64 = 10.0;

/// Score penalty per warning flag.
pub const QC_WARNING_PENALTY: f64 = 2.0;

/// Score penalty per percentage point of outliers, summed across curves.
pub const QC_OUTLIER_PENALTY_PER_PCT: f64 = 0.5;

/// Tukey fence multiplier on the interquartile range.
pub const QC_IQR_FENCE: f64 = 1.5;

/// Curves missing more than this percentage of samples get an info flag.
pub const QC_HIGH_MISSING_PCT: f64 = 50.0;
