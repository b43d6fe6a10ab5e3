//! Interpretation pipeline
//!
//! Runs the calculators down a dataset sample by sample and appends the
//! results as derived curves:
//!
//! | Curve       | From                                   | Role |
//! |-------------|----------------------------------------|------|
//! | `VSH_CALC`  | GR                                     | VSH  |
//! | `PHIE_CALC` | RHOB + NPHI, else RHOB, else DT, else NPHI | PHIE |
//! | `SW_CALC`   | RT + PHIE_CALC (+ VSH_CALC)            | SW   |
//! | `PERM_CALC` | PHIE_CALC + SW_CALC                    | PERM |
//!
//! Names get a `_1`, `_2`... suffix if already taken. A derived curve is only
//! appended when at least one sample could be computed; otherwise the role
//! keeps whatever raw curve it was mapped to. Absent inputs (including NULL
//! sentinels) give absent outputs.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::classification::{classify_fluid, classify_lithology};
use super::permeability::{calculate_permeability, PermeabilityModel};
use super::porosity::{
    effective_porosity, neutron_fraction, porosity_density, porosity_neutron_density,
    porosity_sonic, NdMethod,
};
use super::saturation::{
    sw_archie, sw_indonesian, sw_simandoux, sw_waxman_smits, waxman_smits_b, ArchieParams,
    SaturationModel,
};
use super::shale::{calculate_vshale, VshMethod};
use crate::config::defaults;
use crate::types::{
    CurveMap, CurveRole, DerivedCurveError, FluidIndication, HeaderItem, Lithology, LogDataset,
};

// ============================================================================
// Parameters
// ============================================================================

/// Calculator choices and constants for one interpretation run.
///
/// Also the `[interpretation]` section of `EngineConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationParams {
    /// Clean-sand gamma-ray pick (API)
    #[serde(default = "default_gr_clean")]
    pub gr_clean: f64,
    /// Shale gamma-ray pick (API)
    #[serde(default = "default_gr_shale")]
    pub gr_shale: f64,
    #[serde(default)]
    pub vsh_method: VshMethod,

    /// Matrix density (g/cc)
    #[serde(default = "default_rho_matrix")]
    pub rho_matrix: f64,
    /// Fluid density (g/cc)
    #[serde(default = "default_rho_fluid")]
    pub rho_fluid: f64,
    /// Matrix slowness (us/ft)
    #[serde(default = "default_dt_matrix")]
    pub dt_matrix: f64,
    /// Fluid slowness (us/ft)
    #[serde(default = "default_dt_fluid")]
    pub dt_fluid: f64,
    #[serde(default)]
    pub nd_method: NdMethod,
    /// Reduce total porosity by (1 - Vsh) when Vsh is available
    #[serde(default = "default_shale_correction")]
    pub shale_correction: bool,

    #[serde(default)]
    pub saturation_model: SaturationModel,
    /// Formation water resistivity (ohm.m)
    #[serde(default = "default_rw")]
    pub rw: f64,
    /// Shale resistivity (ohm.m)
    #[serde(default = "default_rsh")]
    pub rsh: f64,
    #[serde(default = "default_a")]
    pub a: f64,
    #[serde(default = "default_m")]
    pub m: f64,
    #[serde(default = "default_n")]
    pub n: f64,
    /// Formation temperature for the Waxman-Smits B estimate (degC)
    #[serde(default = "default_temperature")]
    pub temperature_degc: f64,
    /// Waxman-Smits Qv (meq/cc)
    #[serde(default = "default_qv")]
    pub qv: f64,

    #[serde(default)]
    pub perm_model: PermeabilityModel,
}

fn default_gr_clean() -> f64 { defaults::GR_CLEAN_DEFAULT }
fn default_gr_shale() -> f64 { defaults::GR_SHALE_DEFAULT }
fn default_rho_matrix() -> f64 { defaults::RHO_MATRIX_SANDSTONE }
fn default_rho_fluid() -> f64 { defaults::RHO_FLUID_WATER }
fn default_dt_matrix() -> f64 { defaults::DT_MATRIX_SANDSTONE }
fn default_dt_fluid() -> f64 { defaults::DT_FLUID_WATER }
fn default_shale_correction() -> bool { true }
fn default_rw() -> f64 { defaults::RW_DEFAULT }
fn default_rsh() -> f64 { defaults::RSH_DEFAULT }
fn default_a() -> f64 { defaults::ARCHIE_A }
fn default_m() -> f64 { defaults::ARCHIE_M }
fn default_n() -> f64 { defaults::ARCHIE_N }
fn default_temperature() -> f64 { defaults::FORMATION_TEMPERATURE_C }
fn default_qv() -> f64 { defaults::QV_DEFAULT }

impl Default for InterpretationParams {
    fn default() -> Self {
        Self {
            gr_clean: default_gr_clean(),
            gr_shale: default_gr_shale(),
            vsh_method: VshMethod::default(),
            rho_matrix: default_rho_matrix(),
            rho_fluid: default_rho_fluid(),
            dt_matrix: default_dt_matrix(),
            dt_fluid: default_dt_fluid(),
            nd_method: NdMethod::default(),
            shale_correction: default_shale_correction(),
            saturation_model: SaturationModel::default(),
            rw: default_rw(),
            rsh: default_rsh(),
            a: default_a(),
            m: default_m(),
            n: default_n(),
            temperature_degc: default_temperature(),
            qv: default_qv(),
            perm_model: PermeabilityModel::default(),
        }
    }
}

impl InterpretationParams {
    pub fn archie(&self) -> ArchieParams {
        ArchieParams {
            a: self.a,
            m: self.m,
            n: self.n,
        }
    }

    /// Water saturation with the configured model
    pub fn saturation(&self, rt: f64, phi: f64, vsh: f64) -> f64 {
        let archie = self.archie();
        match self.saturation_model {
            SaturationModel::Archie => sw_archie(rt, phi, self.rw, archie),
            SaturationModel::Simandoux => sw_simandoux(rt, phi, self.rw, vsh, self.rsh, archie),
            SaturationModel::Indonesian => sw_indonesian(rt, phi, self.rw, vsh, self.rsh, archie),
            SaturationModel::WaxmanSmits => {
                let b = waxman_smits_b(self.temperature_degc, self.rw);
                sw_waxman_smits(rt, phi, self.rw, b, self.qv, archie)
            }
        }
    }
}

// ============================================================================
// Per-sample Evaluation
// ============================================================================

/// Raw log readings at one depth, NULLs already removed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogReadings {
    pub gr: Option<f64>,
    pub rhob: Option<f64>,
    pub nphi: Option<f64>,
    pub dt: Option<f64>,
    pub rt: Option<f64>,
}

impl LogReadings {
    /// Readings for sample `index` through the curve map
    pub fn at(dataset: &LogDataset, map: &CurveMap, index: usize) -> Self {
        let read = |role: CurveRole| map.get(role).and_then(|m| dataset.value(index, m));
        Self {
            gr: read(CurveRole::Gr),
            rhob: read(CurveRole::Rhob),
            nphi: read(CurveRole::Nphi),
            dt: read(CurveRole::Dt),
            rt: read(CurveRole::Rt),
        }
    }
}

/// Computed properties at one depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleEvaluation {
    pub vsh: Option<f64>,
    pub phi_density: Option<f64>,
    pub phie: Option<f64>,
    pub sw: Option<f64>,
    pub perm: Option<f64>,
    pub lithology: Lithology,
    pub fluid: FluidIndication,
}

/// Run every calculator on one set of readings.
pub fn evaluate_sample(readings: &LogReadings, params: &InterpretationParams) -> SampleEvaluation {
    let vsh = readings
        .gr
        .and_then(|gr| calculate_vshale(gr, params.gr_clean, params.gr_shale, params.vsh_method));

    let phi_density = readings
        .rhob
        .and_then(|rhob| porosity_density(rhob, params.rho_matrix, params.rho_fluid));

    let phi_total = match (phi_density, readings.nphi) {
        (Some(phi_d), Some(phi_n)) => porosity_neutron_density(phi_d, phi_n, params.nd_method),
        (Some(phi_d), None) => Some(phi_d),
        (None, nphi) => readings
            .dt
            .and_then(|dt| porosity_sonic(dt, params.dt_matrix, params.dt_fluid))
            .or_else(|| nphi.map(|n| neutron_fraction(n).clamp(0.0, defaults::POROSITY_MAX))),
    };

    let phie = phi_total.map(|phi| match (params.shale_correction, vsh) {
        (true, Some(v)) => effective_porosity(phi, v),
        _ => phi,
    });

    let sw = match (readings.rt, phie) {
        (Some(rt), Some(phi)) => Some(params.saturation(rt, phi, vsh.unwrap_or(0.0))),
        _ => None,
    };

    let perm = match (phie, sw) {
        (Some(phi), Some(sw)) => Some(calculate_permeability(phi, sw, params.perm_model)),
        _ => None,
    };

    SampleEvaluation {
        vsh,
        phi_density,
        phie,
        sw,
        perm,
        lithology: classify_lithology(vsh, readings.rhob, readings.nphi),
        fluid: classify_fluid(vsh, sw, phi_density, readings.nphi),
    }
}

// ============================================================================
// Dataset Pipeline
// ============================================================================

/// Pipeline output: the extended dataset, the updated map and per-sample classes
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub dataset: LogDataset,
    pub curve_map: CurveMap,
    pub lithology: Vec<Lithology>,
    pub fluid: Vec<FluidIndication>,
}

struct DerivedCurve {
    role: CurveRole,
    base_name: &'static str,
    unit: &'static str,
    description: String,
    values: Vec<Option<f64>>,
}

/// Compute VSH/PHIE/SW/PERM for every sample and append them as new curves.
///
/// The input dataset is not modified. Raw curves are never overwritten.
pub fn run_interpretation(
    dataset: &LogDataset,
    map: &CurveMap,
    params: &InterpretationParams,
) -> Result<Interpretation, DerivedCurveError> {
    let evaluations: Vec<SampleEvaluation> = (0..dataset.data.len())
        .map(|i| evaluate_sample(&LogReadings::at(dataset, map, i), params))
        .collect();

    let derived = [
        DerivedCurve {
            role: CurveRole::Vsh,
            base_name: "VSH_CALC",
            unit: "V/V",
            description: format!("Shale volume ({:?})", params.vsh_method),
            values: evaluations.iter().map(|e| e.vsh).collect(),
        },
        DerivedCurve {
            role: CurveRole::Phie,
            base_name: "PHIE_CALC",
            unit: "V/V",
            description: format!("Effective porosity ({:?})", params.nd_method),
            values: evaluations.iter().map(|e| e.phie).collect(),
        },
        DerivedCurve {
            role: CurveRole::Sw,
            base_name: "SW_CALC",
            unit: "V/V",
            description: format!("Water saturation ({:?})", params.saturation_model),
            values: evaluations.iter().map(|e| e.sw).collect(),
        },
        DerivedCurve {
            role: CurveRole::Perm,
            base_name: "PERM_CALC",
            unit: "MD",
            description: format!("Permeability ({:?})", params.perm_model),
            values: evaluations.iter().map(|e| e.perm).collect(),
        },
    ];

    let mut out = dataset.clone();
    let mut curve_map = map.clone();
    for curve in derived {
        let computed = curve.values.iter().filter(|v| v.is_some()).count();
        if computed == 0 {
            debug!(role = %curve.role, "No samples computable, derived curve skipped");
            continue;
        }
        let mnemonic = out.unique_mnemonic(curve.base_name);
        let info = HeaderItem {
            mnemonic: mnemonic.clone(),
            unit: curve.unit.to_string(),
            value: String::new(),
            description: curve.description,
        };
        out = out.with_derived_curve(info, &curve.values)?;
        curve_map.insert(curve.role, mnemonic.as_str());
        debug!(role = %curve.role, mnemonic = %mnemonic, computed, "Appended derived curve");
    }

    info!(
        samples = dataset.data.len(),
        derived = out.curves.len() - dataset.curves.len(),
        "Interpretation complete"
    );

    Ok(Interpretation {
        dataset: out,
        curve_map,
        lithology: evaluations.iter().map(|e| e.lithology).collect(),
        fluid: evaluations.iter().map(|e| e.fluid).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::{map_curves, parse_las};

    const LAS: &str = "\
~W
NULL.  -999.25 : NULL
STEP.M 0.5     : STEP
~C
DEPT.M    : DEPTH
GR.GAPI   : GAMMA RAY
RHOB.G/C3 : DENSITY
NPHI.V/V  : NEUTRON
RT.OHMM   : DEEP RES
~A
1000.0  20.0  2.32  0.20  10.0
1000.5  120.0 2.55  0.35  2.0
1001.0  -999.25 2.32 0.20 10.0
";

    #[test]
    fn test_pipeline_appends_and_remaps() {
        let ds = parse_las(LAS);
        let map = map_curves(&ds);
        let result = run_interpretation(&ds, &map, &InterpretationParams::default()).unwrap();

        assert_eq!(ds.curves.len(), 5);
        assert_eq!(result.dataset.curves.len(), 9);
        assert_eq!(result.curve_map.get(CurveRole::Vsh), Some("VSH_CALC"));
        assert_eq!(result.curve_map.get(CurveRole::Phie), Some("PHIE_CALC"));
        assert_eq!(result.curve_map.get(CurveRole::Sw), Some("SW_CALC"));
        assert_eq!(result.curve_map.get(CurveRole::Perm), Some("PERM_CALC"));
        assert_eq!(result.curve_map.get(CurveRole::Gr), Some("GR"));
    }

    #[test]
    fn test_clean_sand_sample() {
        let ds = parse_las(LAS);
        let result =
            run_interpretation(&ds, &map_curves(&ds), &InterpretationParams::default()).unwrap();
        let out = &result.dataset;

        // GR at the clean pick: no shale, phi_d = 0.2, phi_n = 0.2 -> 0.2
        assert!(out.value(0, "VSH_CALC").unwrap().abs() < 1e-12);
        assert!((out.value(0, "PHIE_CALC").unwrap() - 0.2).abs() < 1e-9);
        // Archie with Rt = 10, phi = 0.2, Rw = 0.05
        assert!((out.value(0, "SW_CALC").unwrap() - 0.3536).abs() < 1e-3);
        assert_eq!(result.lithology[0], Lithology::Sandstone);
        assert_eq!(result.fluid[0], FluidIndication::Oil);
    }

    #[test]
    fn test_shale_sample_classified() {
        let ds = parse_las(LAS);
        let result =
            run_interpretation(&ds, &map_curves(&ds), &InterpretationParams::default()).unwrap();
        assert!((result.dataset.value(1, "VSH_CALC").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(result.dataset.value(1, "PHIE_CALC"), Some(0.0));
        assert_eq!(result.lithology[1], Lithology::Shale);
        assert_eq!(result.fluid[1], FluidIndication::Water);
    }

    #[test]
    fn test_null_gr_propagates_absent_vsh() {
        let ds = parse_las(LAS);
        let result =
            run_interpretation(&ds, &map_curves(&ds), &InterpretationParams::default()).unwrap();
        assert_eq!(result.dataset.value(2, "VSH_CALC"), None);
        // Porosity still computed, uncorrected
        assert!((result.dataset.value(2, "PHIE_CALC").unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_existing_name_gets_suffix() {
        let text = LAS.replace("RT.OHMM   : DEEP RES", "VSH_CALC.V/V : OLD RESULT");
        let ds = parse_las(&text);
        let result =
            run_interpretation(&ds, &map_curves(&ds), &InterpretationParams::default()).unwrap();
        assert!(result.dataset.has_curve("VSH_CALC_1"));
        assert_eq!(result.curve_map.get(CurveRole::Vsh), Some("VSH_CALC_1"));
        // Raw column untouched
        assert_eq!(
            result.dataset.raw_column("VSH_CALC"),
            ds.raw_column("VSH_CALC")
        );
    }

    #[test]
    fn test_sonic_fallback() {
        let readings = LogReadings {
            dt: Some(80.0),
            ..LogReadings::default()
        };
        let params = InterpretationParams {
            shale_correction: false,
            ..InterpretationParams::default()
        };
        let eval = evaluate_sample(&readings, &params);
        assert!((eval.phie.unwrap() - 0.1835).abs() < 1e-3);
        assert_eq!(eval.sw, None);
        assert_eq!(eval.perm, None);
    }
}
