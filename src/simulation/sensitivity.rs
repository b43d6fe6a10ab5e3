//! One-at-a-time sensitivity (tornado) analysis
//!
//! The base case puts every input at its shape-derived base value (triangular
//! mode, normal mean, uniform midpoint). Each non-constant input is then moved
//! to its low and high bound with the others held at base.
//!
//! The base case is not the simulated P50: for skewed inputs the product of
//! modes sits below the median of the product.

use crate::reservoir::recoverable_volume;
use crate::types::{McVariable, MonteCarloInputs, SensitivityItem, VolumetricDraw};

/// Every input at its base value
pub fn base_draw(inputs: &MonteCarloInputs) -> VolumetricDraw {
    McVariable::ALL
        .into_iter()
        .fold(VolumetricDraw::default(), |draw, variable| {
            draw.with(variable, inputs.distribution(variable).base_value())
        })
}

/// Swing of recoverable volume per input, largest first.
///
/// Constant inputs are skipped. Ties keep variable order.
pub fn sensitivity_analysis(inputs: &MonteCarloInputs, trim: f64, z: f64) -> Vec<SensitivityItem> {
    let base = base_draw(inputs);
    let base_volume = recoverable_volume(&base, inputs.fluid_type);

    let mut items: Vec<SensitivityItem> = McVariable::ALL
        .into_iter()
        .filter(|v| !inputs.distribution(*v).is_constant())
        .map(|variable| {
            let (lo, hi) = inputs.distribution(variable).sensitivity_bounds(trim, z);
            let low = recoverable_volume(&base.with(variable, lo), inputs.fluid_type);
            let high = recoverable_volume(&base.with(variable, hi), inputs.fluid_type);
            SensitivityItem {
                variable,
                swing: (high - low).abs(),
                low,
                high,
                base: base_volume,
            }
        })
        .collect();

    items.sort_by(|a, b| b.swing.total_cmp(&a.swing));
    items
}
