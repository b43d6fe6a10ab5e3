//! Monte Carlo Reserves Engine
//!
//! Samples the seven volumetric inputs independently per iteration, converts
//! each draw to a recoverable volume and summarises the sorted outcomes in
//! reserves convention:
//!
//! - P90 (low case) = value at index ⌊0.1·n⌋
//! - P50            = value at index ⌊0.5·n⌋
//! - P10 (high case) = value at index ⌊0.9·n⌋
//!
//! RNG is always injected. `run_with_rng` is sequential; `run_parallel` splits
//! the iterations into fixed-size chunks, each with its own seed derived from
//! the caller's seed, so the result depends only on the seed and not on the
//! thread count.

pub mod sampling;
pub mod sensitivity;

pub use sampling::{draw_inputs, triangular_inverse_cdf};
pub use sensitivity::{base_draw, sensitivity_analysis};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::reservoir::recoverable_volume;
use crate::types::{McVariable, MonteCarloInputs, MonteCarloResult, PercentileStats};

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Monte Carlo requires at least one iteration")]
    ZeroIterations,

    #[error("Invalid distribution for {variable}: {reason}")]
    InvalidDistribution { variable: McVariable, reason: String },
}

/// Reject zero iterations and malformed distributions.
pub fn validate_inputs(inputs: &MonteCarloInputs) -> Result<(), SimulationError> {
    if inputs.iterations == 0 {
        return Err(SimulationError::ZeroIterations);
    }
    McVariable::ALL
        .into_iter()
        .try_for_each(|variable| inputs.distribution(variable).validate(variable))
}

// ============================================================================
// Runners
// ============================================================================

/// Sequential simulation with a caller-supplied RNG.
pub fn run_with_rng<R: Rng + ?Sized>(
    inputs: &MonteCarloInputs,
    rng: &mut R,
) -> Result<MonteCarloResult, SimulationError> {
    validate_inputs(inputs)?;
    let values: Vec<f64> = (0..inputs.iterations)
        .map(|_| recoverable_volume(&draw_inputs(inputs, rng), inputs.fluid_type))
        .collect();
    Ok(finish(inputs, values))
}

/// Sequential simulation seeded from `seed`.
pub fn run_monte_carlo(inputs: &MonteCarloInputs, seed: u64) -> Result<MonteCarloResult, SimulationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    run_with_rng(inputs, &mut rng)
}

/// Seed for chunk `index`, spread with the SplitMix64 increment
fn chunk_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Parallel simulation across rayon's thread pool.
///
/// Chunk size comes from `[monte_carlo] parallel_chunk_size`. Output for a
/// given seed and chunk size is identical however many threads run it, but
/// differs from `run_monte_carlo` with the same seed.
pub fn run_parallel(inputs: &MonteCarloInputs, seed: u64) -> Result<MonteCarloResult, SimulationError> {
    validate_inputs(inputs)?;
    let chunk_size = crate::config::get().monte_carlo.parallel_chunk_size.max(1);
    let chunks = inputs.iterations.div_ceil(chunk_size);

    let values: Vec<f64> = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk));
            let len = chunk_size.min(inputs.iterations - chunk * chunk_size);
            (0..len)
                .map(|_| recoverable_volume(&draw_inputs(inputs, &mut rng), inputs.fluid_type))
                .collect::<Vec<f64>>()
        })
        .flatten()
        .collect();

    Ok(finish(inputs, values))
}

// ============================================================================
// Summary
// ============================================================================

/// Percentiles and mean of recoverable volumes. `values` must be sorted ascending.
pub fn summarize(values: &[f64]) -> PercentileStats {
    if values.is_empty() {
        return PercentileStats::default();
    }
    let n = values.len();
    let at = |fraction: f64| {
        let idx = ((fraction * n as f64).floor() as usize).min(n - 1);
        values[idx]
    };
    PercentileStats {
        p90: at(0.1),
        p50: at(0.5),
        p10: at(0.9),
        mean: values.iter().sum::<f64>() / n as f64,
    }
}

fn finish(inputs: &MonteCarloInputs, mut values: Vec<f64>) -> MonteCarloResult {
    values.sort_by(f64::total_cmp);
    let stats = summarize(&values);

    let cfg = &crate::config::get().monte_carlo;
    let sensitivity =
        sensitivity_analysis(inputs, cfg.sensitivity_trim, cfg.sensitivity_normal_z);

    info!(
        iterations = values.len(),
        fluid = %inputs.fluid_type,
        p90 = stats.p90,
        p50 = stats.p50,
        p10 = stats.p10,
        "Monte Carlo complete"
    );

    MonteCarloResult {
        stats,
        sensitivity,
        histogram: values,
        fluid_type: inputs.fluid_type,
    }
}
