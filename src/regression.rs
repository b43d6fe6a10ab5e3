//! Least-squares curve fits for core-log and log-log calibration
//!
//! - Linear:      y = a + b·x
//! - Power law:   y = a·x^b     (fit in log-log space)
//! - Exponential: y = a·e^(b·x) (fit in semi-log space)
//!
//! Non-finite pairs are dropped, as are pairs the transform cannot take
//! (non-positive x or y for the power law, non-positive y for the
//! exponential). Every fit returns `None` with fewer than two usable points
//! or when all x are equal. R² is reported in the space the fit was made in.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Points used after filtering
    pub n: usize,
    /// Two-tailed p-value for slope = 0. `None` with only two points.
    pub slope_p_value: Option<f64>,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerFit {
    pub coefficient: f64,
    pub exponent: f64,
    /// In log-log space
    pub r_squared: f64,
    pub n: usize,
}

impl PowerFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialFit {
    pub coefficient: f64,
    pub rate: f64,
    /// In semi-log space
    pub r_squared: f64,
    pub n: usize,
}

impl ExponentialFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.coefficient * (self.rate * x).exp()
    }
}

/// Ordinary least squares on already-filtered points.
fn ols(points: &[(f64, f64)]) -> Option<LinearFit> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / nf;

    let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = points.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    if sxx <= f64::EPSILON * nf {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
        n,
        slope_p_value: slope_p_value(slope, ss_res, sxx, n),
    })
}

/// Two-tailed t-test of slope = 0 with n − 2 degrees of freedom.
fn slope_p_value(slope: f64, ss_res: f64, sxx: f64, n: usize) -> Option<f64> {
    if n <= 2 {
        return None;
    }
    let dof = (n - 2) as f64;
    let std_err = (ss_res / dof / sxx).sqrt();
    if !std_err.is_finite() {
        return None;
    }
    if std_err == 0.0 {
        // Exact fit: any non-zero slope is certain
        return Some(if slope == 0.0 { 1.0 } else { 0.0 });
    }
    let t = slope / std_err;
    let dist = StudentsT::new(0.0, 1.0, dof).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

fn finite_pairs<'a>(x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    x.iter()
        .zip(y)
        .map(|(a, b)| (*a, *b))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
}

/// Linear least squares y = intercept + slope·x.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    let points: Vec<(f64, f64)> = finite_pairs(x, y).collect();
    ols(&points)
}

/// Power law y = coefficient·x^exponent, via OLS on (ln x, ln y).
pub fn power_law_regression(x: &[f64], y: &[f64]) -> Option<PowerFit> {
    let points: Vec<(f64, f64)> = finite_pairs(x, y)
        .filter(|(a, b)| *a > 0.0 && *b > 0.0)
        .map(|(a, b)| (a.ln(), b.ln()))
        .collect();
    let fit = ols(&points)?;
    Some(PowerFit {
        coefficient: fit.intercept.exp(),
        exponent: fit.slope,
        r_squared: fit.r_squared,
        n: fit.n,
    })
}

/// Exponential y = coefficient·e^(rate·x), via OLS on (x, ln y).
pub fn exponential_regression(x: &[f64], y: &[f64]) -> Option<ExponentialFit> {
    let points: Vec<(f64, f64)> = finite_pairs(x, y)
        .filter(|(_, b)| *b > 0.0)
        .map(|(a, b)| (a, b.ln()))
        .collect();
    let fit = ols(&points)?;
    Some(ExponentialFit {
        coefficient: fit.intercept.exp(),
        rate: fit.slope,
        r_squared: fit.r_squared,
        n: fit.n,
    })
}
