//! Sampling from input distributions
//!
//! - Triangular: inverse CDF
//! - Normal: Box-Muller, clamped at zero (volumetric inputs are non-negative)
//! - Uniform: linear in a U[0, 1) draw
//! - Constant: the value, no RNG consumed

use rand::Rng;
use rand_distr::{Distribution, Open01};
use std::f64::consts::PI;

use super::SimulationError;
use crate::types::{InputDistribution, McVariable, MonteCarloInputs, VolumetricDraw};

impl Distribution<f64> for InputDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            InputDistribution::Triangular { min, mode, max } => {
                triangular_inverse_cdf(min, mode, max, rng.gen::<f64>())
            }
            InputDistribution::Normal { mean, std_dev } => {
                let u1: f64 = Open01.sample(rng);
                let u2: f64 = Open01.sample(rng);
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
                (mean + std_dev * z).max(0.0)
            }
            InputDistribution::Uniform { min, max } => min + rng.gen::<f64>() * (max - min),
            InputDistribution::Constant { value } => value,
        }
    }
}

/// Inverse CDF of the triangular distribution at `u` in [0, 1].
///
/// Degenerate ranges (max ≤ min) return `mode`.
pub fn triangular_inverse_cdf(min: f64, mode: f64, max: f64, u: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return mode;
    }
    let u = u.clamp(0.0, 1.0);
    let split = (mode - min) / range;
    if u < split {
        min + (u * range * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * range * (max - mode)).sqrt()
    }
}

impl InputDistribution {
    /// Check parameters are finite and ordered.
    pub fn validate(&self, variable: McVariable) -> Result<(), SimulationError> {
        let invalid = |reason: String| SimulationError::InvalidDistribution { variable, reason };
        let params: Vec<f64> = match *self {
            InputDistribution::Triangular { min, mode, max } => vec![min, mode, max],
            InputDistribution::Normal { mean, std_dev } => vec![mean, std_dev],
            InputDistribution::Uniform { min, max } => vec![min, max],
            InputDistribution::Constant { value } => vec![value],
        };
        if params.iter().any(|p| !p.is_finite()) {
            return Err(invalid("parameters must be finite".to_string()));
        }
        match *self {
            InputDistribution::Triangular { min, mode, max } if !(min <= mode && mode <= max) => {
                Err(invalid(format!("triangular requires min <= mode <= max, got {min}/{mode}/{max}")))
            }
            InputDistribution::Normal { std_dev, .. } if std_dev < 0.0 => {
                Err(invalid(format!("normal std_dev must be >= 0, got {std_dev}")))
            }
            InputDistribution::Uniform { min, max } if min > max => {
                Err(invalid(format!("uniform requires min <= max, got {min}/{max}")))
            }
            _ => Ok(()),
        }
    }

    /// Representative value for the sensitivity base case: mode, mean, midpoint or the constant.
    pub fn base_value(&self) -> f64 {
        match *self {
            InputDistribution::Triangular { mode, .. } => mode,
            InputDistribution::Normal { mean, .. } => mean,
            InputDistribution::Uniform { min, max } => (min + max) / 2.0,
            InputDistribution::Constant { value } => value,
        }
    }

    /// Low and high values for one-at-a-time sensitivity.
    ///
    /// Bounded shapes are trimmed by `trim` × range at each end; normal uses
    /// mean ± `z`σ with the low side floored at zero.
    pub fn sensitivity_bounds(&self, trim: f64, z: f64) -> (f64, f64) {
        match *self {
            InputDistribution::Triangular { min, max, .. } | InputDistribution::Uniform { min, max } => {
                let range = max - min;
                (min + trim * range, max - trim * range)
            }
            InputDistribution::Normal { mean, std_dev } => {
                ((mean - z * std_dev).max(0.0), mean + z * std_dev)
            }
            InputDistribution::Constant { value } => (value, value),
        }
    }
}

/// One realisation of all seven inputs, sampled in a fixed order.
pub fn draw_inputs<R: Rng + ?Sized>(inputs: &MonteCarloInputs, rng: &mut R) -> VolumetricDraw {
    McVariable::ALL
        .into_iter()
        .fold(VolumetricDraw::default(), |draw, variable| {
            let value = inputs.distribution(variable).sample(rng);
            draw.with(variable, value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_triangular_inverse_cdf_endpoints() {
        assert!((triangular_inverse_cdf(10.0, 20.0, 40.0, 0.0) - 10.0).abs() < 1e-12);
        assert!((triangular_inverse_cdf(10.0, 20.0, 40.0, 1.0) - 40.0).abs() < 1e-12);
        // CDF at the mode is (mode - min) / (max - min)
        assert!((triangular_inverse_cdf(10.0, 20.0, 40.0, 1.0 / 3.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_samples_within_support() {
        let mut rng = StdRng::seed_from_u64(7);
        let tri = InputDistribution::Triangular { min: 1.0, mode: 2.0, max: 5.0 };
        let uni = InputDistribution::Uniform { min: 0.1, max: 0.3 };
        for _ in 0..2000 {
            let t = tri.sample(&mut rng);
            let u = uni.sample(&mut rng);
            assert!((1.0..=5.0).contains(&t));
            assert!((0.1..=0.3).contains(&u));
        }
    }

    #[test]
    fn test_normal_clamped_non_negative_and_centred() {
        let mut rng = StdRng::seed_from_u64(11);
        let dist = InputDistribution::Normal { mean: 0.1, std_dev: 0.2 };
        let draws: Vec<f64> = (0..5000).map(|_| dist.sample(&mut rng)).collect();
        assert!(draws.iter().all(|v| *v >= 0.0));

        let wide = InputDistribution::Normal { mean: 100.0, std_dev: 5.0 };
        let mean: f64 = (0..5000).map(|_| wide.sample(&mut rng)).sum::<f64>() / 5000.0;
        assert!((mean - 100.0).abs() < 0.5, "mean {mean}");
    }

    #[test]
    fn test_validate_rejects_malformed() {
        let bad_tri = InputDistribution::Triangular { min: 5.0, mode: 1.0, max: 10.0 };
        assert!(bad_tri.validate(McVariable::Area).is_err());
        let bad_normal = InputDistribution::Normal { mean: 1.0, std_dev: -0.1 };
        assert!(bad_normal.validate(McVariable::Phi).is_err());
        let nan = InputDistribution::Constant { value: f64::NAN };
        assert!(nan.validate(McVariable::Rf).is_err());
        let ok = InputDistribution::Uniform { min: 0.2, max: 0.2 };
        assert!(ok.validate(McVariable::Sw).is_ok());
    }

    #[test]
    fn test_sensitivity_bounds() {
        let tri = InputDistribution::Triangular { min: 0.0, mode: 5.0, max: 100.0 };
        assert_eq!(tri.sensitivity_bounds(0.1, 1.28), (10.0, 90.0));
        let normal = InputDistribution::Normal { mean: 1.0, std_dev: 1.0 };
        let (lo, hi) = normal.sensitivity_bounds(0.1, 1.28);
        assert_eq!(lo, 0.0);
        assert!((hi - 2.28).abs() < 1e-12);
    }
}
