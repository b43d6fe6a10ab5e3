//! Probabilistic reserves types: input distributions, simulation inputs and results

use serde::{Deserialize, Serialize};

use super::FluidType;

/// Probability distribution for one uncertain volumetric input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputDistribution {
    Triangular { min: f64, mode: f64, max: f64 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 },
    Constant { value: f64 },
}

impl InputDistribution {
    pub fn is_constant(&self) -> bool {
        matches!(self, InputDistribution::Constant { .. })
    }
}

/// The seven volumetric inputs varied by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McVariable {
    Area,
    Thickness,
    Ntg,
    Phi,
    Sw,
    Fvf,
    Rf,
}

impl McVariable {
    pub const ALL: [McVariable; 7] = [
        McVariable::Area,
        McVariable::Thickness,
        McVariable::Ntg,
        McVariable::Phi,
        McVariable::Sw,
        McVariable::Fvf,
        McVariable::Rf,
    ];
}

impl std::fmt::Display for McVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            McVariable::Area => "area",
            McVariable::Thickness => "thickness",
            McVariable::Ntg => "ntg",
            McVariable::Phi => "phi",
            McVariable::Sw => "sw",
            McVariable::Fvf => "fvf",
            McVariable::Rf => "rf",
        };
        write!(f, "{name}")
    }
}

fn default_iterations() -> usize {
    crate::config::defaults::MC_DEFAULT_ITERATIONS
}

/// Simulation inputs.
///
/// Variables are sampled independently; correlations between inputs
/// (e.g. porosity and saturation) are not modelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonteCarloInputs {
    /// Area (acres)
    pub area: InputDistribution,
    /// Gross thickness (ft)
    pub thickness: InputDistribution,
    /// Net-to-gross (fraction)
    pub ntg: InputDistribution,
    /// Porosity (fraction)
    pub phi: InputDistribution,
    /// Water saturation (fraction)
    pub sw: InputDistribution,
    /// Formation volume factor: Bo (rb/stb) for oil, Bg (rcf/scf) for gas
    pub fvf: InputDistribution,
    /// Recovery factor (fraction)
    pub rf: InputDistribution,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub fluid_type: FluidType,
}

impl MonteCarloInputs {
    pub fn distribution(&self, variable: McVariable) -> &InputDistribution {
        match variable {
            McVariable::Area => &self.area,
            McVariable::Thickness => &self.thickness,
            McVariable::Ntg => &self.ntg,
            McVariable::Phi => &self.phi,
            McVariable::Sw => &self.sw,
            McVariable::Fvf => &self.fvf,
            McVariable::Rf => &self.rf,
        }
    }
}

/// One realisation of the seven inputs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VolumetricDraw {
    pub area: f64,
    pub thickness: f64,
    pub ntg: f64,
    pub phi: f64,
    pub sw: f64,
    pub fvf: f64,
    pub rf: f64,
}

impl VolumetricDraw {
    pub fn get(&self, variable: McVariable) -> f64 {
        match variable {
            McVariable::Area => self.area,
            McVariable::Thickness => self.thickness,
            McVariable::Ntg => self.ntg,
            McVariable::Phi => self.phi,
            McVariable::Sw => self.sw,
            McVariable::Fvf => self.fvf,
            McVariable::Rf => self.rf,
        }
    }

    /// Copy with one variable replaced
    pub fn with(mut self, variable: McVariable, value: f64) -> Self {
        match variable {
            McVariable::Area => self.area = value,
            McVariable::Thickness => self.thickness = value,
            McVariable::Ntg => self.ntg = value,
            McVariable::Phi => self.phi = value,
            McVariable::Sw => self.sw = value,
            McVariable::Fvf => self.fvf = value,
            McVariable::Rf => self.rf = value,
        }
        self
    }
}

/// Reserve-convention percentiles of recoverable volume.
///
/// P90 is the low case (exceeded with 90% probability), P10 the high case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PercentileStats {
    pub p90: f64,
    pub p50: f64,
    pub p10: f64,
    pub mean: f64,
}

/// One-at-a-time sensitivity of recoverable volume to a single input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensitivityItem {
    pub variable: McVariable,
    /// |high - low|
    pub swing: f64,
    /// Recoverable volume with the variable at its low bound
    pub low: f64,
    /// Recoverable volume with the variable at its high bound
    pub high: f64,
    /// Recoverable volume with every variable at its base value
    pub base: f64,
}

/// Monte Carlo output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonteCarloResult {
    pub stats: PercentileStats,
    /// Ranked by swing, largest first
    pub sensitivity: Vec<SensitivityItem>,
    /// Recoverable volume per iteration, ascending
    pub histogram: Vec<f64>,
    pub fluid_type: FluidType,
}
