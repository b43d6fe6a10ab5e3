//! Reservoir-level types: classification outputs, zone cutoffs, zonal stats, volumetrics

use serde::{Deserialize, Serialize};

use crate::config::defaults;

// ============================================================================
// Per-sample Classification
// ============================================================================

/// Rock type from the lithology rule cascade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum Lithology {
    Shale,
    Sandstone,
    Limestone,
    Dolomite,
    #[default]
    Unknown,
}

impl std::fmt::Display for Lithology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lithology::Shale => write!(f, "Shale"),
            Lithology::Sandstone => write!(f, "Sandstone"),
            Lithology::Limestone => write!(f, "Limestone"),
            Lithology::Dolomite => write!(f, "Dolomite"),
            Lithology::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Pore-fluid indication from the log response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FluidIndication {
    Oil,
    Gas,
    Water,
}

impl std::fmt::Display for FluidIndication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FluidIndication::Oil => write!(f, "Oil"),
            FluidIndication::Gas => write!(f, "Gas"),
            FluidIndication::Water => write!(f, "Water"),
        }
    }
}

/// Hydrocarbon phase used for volumetric conversions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FluidType {
    #[default]
    Oil,
    Gas,
}

impl std::fmt::Display for FluidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FluidType::Oil => write!(f, "oil"),
            FluidType::Gas => write!(f, "gas"),
        }
    }
}

impl std::str::FromStr for FluidType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oil" => Ok(FluidType::Oil),
            "gas" => Ok(FluidType::Gas),
            other => Err(format!("unknown fluid type '{other}' (expected oil or gas)")),
        }
    }
}

// ============================================================================
// Zonal Aggregation
// ============================================================================

/// Reservoir / pay classification thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneCutoffs {
    /// Samples with Vsh above this are non-reservoir (v/v)
    #[serde(default = "default_vsh_max")]
    pub vsh_max: f64,
    /// Samples with porosity below this are non-reservoir (v/v)
    #[serde(default = "default_phi_min")]
    pub phi_min: f64,
    /// Reservoir samples with Sw above this are not pay (v/v)
    #[serde(default = "default_sw_max")]
    pub sw_max: f64,
}

fn default_vsh_max() -> f64 { defaults::CUTOFF_VSH_MAX }
fn default_phi_min() -> f64 { defaults::CUTOFF_PHI_MIN }
fn default_sw_max() -> f64 { defaults::CUTOFF_SW_MAX }

impl Default for ZoneCutoffs {
    fn default() -> Self {
        Self {
            vsh_max: default_vsh_max(),
            phi_min: default_phi_min(),
            sw_max: default_sw_max(),
        }
    }
}

/// Interval statistics over a depth window
///
/// Thicknesses are in depth units (sample count x step). Averages are taken
/// over pay samples only and are 0.0 when the window has no pay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ZonalStats {
    pub gross_thickness: f64,
    pub net_thickness: f64,
    pub pay_thickness: f64,
    /// Net-to-gross ratio
    pub ntg: f64,
    pub avg_phi: f64,
    pub avg_sw: f64,
    pub avg_vsh: f64,
}

// ============================================================================
// Volumetrics
// ============================================================================

/// Inputs to the deterministic volumetric calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumetricParameters {
    /// Drainage area (acres)
    pub area_acres: f64,
    /// Recovery factor (fraction)
    pub recovery_factor: f64,
    pub fluid_type: FluidType,
    /// Oil formation volume factor (rb/stb); configured default when `None`
    #[serde(default)]
    pub bo: Option<f64>,
    /// Gas formation volume factor (rcf/scf); configured default when `None`
    #[serde(default)]
    pub bg: Option<f64>,
}

/// Original hydrocarbons in place
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InPlace {
    /// Original oil in place (stb)
    Ooip { volume: f64 },
    /// Original gas in place (scf)
    Ogip { volume: f64 },
}

impl InPlace {
    pub fn volume(&self) -> f64 {
        match self {
            InPlace::Ooip { volume } | InPlace::Ogip { volume } => *volume,
        }
    }

    pub fn ooip(&self) -> Option<f64> {
        match self {
            InPlace::Ooip { volume } => Some(*volume),
            InPlace::Ogip { .. } => None,
        }
    }

    pub fn ogip(&self) -> Option<f64> {
        match self {
            InPlace::Ogip { volume } => Some(*volume),
            InPlace::Ooip { .. } => None,
        }
    }
}

/// Deterministic volumetric estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumetricResult {
    /// Gross rock volume (acre-ft)
    pub grv: f64,
    /// Net rock volume (acre-ft)
    pub nrv: f64,
    /// Hydrocarbon pore volume (acre-ft)
    pub hcpv: f64,
    pub in_place: InPlace,
    /// Recoverable volume, same units as `in_place`
    pub reserves: f64,
    pub fluid_type: FluidType,
}
