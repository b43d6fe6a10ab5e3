//! PETRO-ENGINE: Petrophysical Computation Engine
//!
//! Well-log interpretation from raw LAS text through to probabilistic reserves.
//!
//! ## Architecture
//!
//! - **Acquisition**: LAS parsing and curve role mapping
//! - **Physics Engine**: Vshale, porosity, saturation, permeability, lithology and fluid calculators
//! - **Reservoir**: Zonal net/pay statistics and deterministic volumetrics
//! - **Simulation**: Monte Carlo reserves with tornado sensitivity
//! - **QC**: Curve statistics, physics bounds, depth continuity and a composite score
//! - **Regression**: Linear, power-law and exponential fits
//!
//! Data flows one way: parser, mapper, calculators, then aggregation or QC.
//! Everything below the CLI is synchronous and side-effect free apart from
//! logging.

pub mod acquisition;
pub mod config;
pub mod physics_engine;
pub mod qc;
pub mod regression;
pub mod reservoir;
pub mod simulation;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, EngineConfig};

// Re-export commonly used types
pub use types::{
    CurveMap, CurveRole, FluidType, InputDistribution, LogDataset, MonteCarloInputs,
    MonteCarloResult, QcReport, Severity, VolumetricParameters, VolumetricResult, ZonalStats,
    ZoneCutoffs,
};

// Re-export pipeline entry points
pub use acquisition::{map_curves, parse_las, try_parse_las, LasError};
pub use physics_engine::{run_interpretation, Interpretation, InterpretationParams};
pub use qc::analyze;
pub use reservoir::{calculate_volumetrics, compute_zonal_stats};
pub use simulation::{run_monte_carlo, run_parallel, SimulationError};
