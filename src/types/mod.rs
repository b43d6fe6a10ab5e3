//! Shared data structures for the petrophysical engine
//!
//! Every record here is plain data exchanged with callers:
//! - `LogDataset` / `CurveMap` (parser and mapper outputs)
//! - `ZonalStats` / `VolumetricResult` (reservoir layer)
//! - `MonteCarloResult` (probabilistic reserves)
//! - `QcReport` (quality control)

mod curves;
mod dataset;
mod qc;
mod reservoir;
mod simulation;

pub use curves::*;
pub use dataset::*;
pub use qc::*;
pub use reservoir::*;
pub use simulation::*;
