//! LAS Workflow Integration Tests
//!
//! Parse -> map -> interpret -> zone -> volumetrics -> QC, through the
//! public API only. The synthetic well has 5 m of clean gas sand over 5 m of
//! shale, sampled every 0.5 m.

use petro_engine::acquisition::{map_curves, parse_las, try_parse_las, LasError};
use petro_engine::physics_engine::{run_interpretation, InterpretationParams};
use petro_engine::qc::analyze;
use petro_engine::reservoir::{calculate_volumetrics, compute_zonal_stats};
use petro_engine::types::{
    CurveRole, FluidIndication, FluidType, Lithology, VolumetricParameters, ZoneCutoffs,
};
use std::fmt::Write;

// ============================================================================
// Fixtures
// ============================================================================

const SAND: (f64, f64, f64, f64) = (30.0, 2.32, 0.15, 20.0);
const SHALE: (f64, f64, f64, f64) = (130.0, 2.55, 0.35, 2.0);

fn synthetic_las() -> String {
    let mut las = String::from(
        "~VERSION INFORMATION
 VERS.                 2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0
 WRAP.                  NO : ONE LINE PER DEPTH STEP
~WELL INFORMATION
#MNEM.UNIT       DATA             DESCRIPTION
 STRT.M        2000.0 : START DEPTH
 STOP.M        2009.5 : STOP DEPTH
 STEP.M           0.5 : STEP
 NULL.        -999.25 : NULL VALUE
 WELL.      SYNTH-1   : WELL
 FLD .      TEST FIELD : FIELD
~CURVE INFORMATION
 DEPT.M               : DEPTH
 GR  .GAPI            : GAMMA RAY
 RHOB.G/C3            : BULK DENSITY
 NPHI.V/V             : NEUTRON POROSITY
 ILD .OHMM            : DEEP RESISTIVITY
~A  DEPT   GR   RHOB   NPHI   ILD
",
    );
    for i in 0..20 {
        let depth = 2000.0 + f64::from(i) * 0.5;
        let (gr, rhob, nphi, rt) = if i < 10 { SAND } else { SHALE };
        let _ = writeln!(las, "{depth:.1} {gr} {rhob} {nphi} {rt}");
    }
    // Truncated row, dropped by the parser
    las.push_str("2010.0 45.0 2.30\n");
    las
}

// ============================================================================
// Parsing and mapping
// ============================================================================

#[test]
fn three_row_fragment_parses_and_maps() {
    let las = "~CURVE
DEPT.M : Depth
GR.GAPI : Gamma ray
RHOB.G/C3 : Density
~ASCII
0 45.5 2.40
0.5 46.2 2.38
1.0 48.1 2.35
";
    let ds = parse_las(las);
    assert_eq!(ds.data.len(), 3);
    assert!(ds.data.iter().all(|s| s.len() == 3));
    let map = map_curves(&ds);
    assert_eq!(map.get(CurveRole::Depth), Some("DEPT"));
    assert_eq!(map.get(CurveRole::Gr), Some("GR"));
    assert_eq!(map.get(CurveRole::Rhob), Some("RHOB"));
}

#[test]
fn synthetic_well_parses_with_one_dropped_row() {
    let ds = parse_las(&synthetic_las());
    assert_eq!(ds.curves.len(), 5);
    assert_eq!(ds.data.len(), 20);
    assert_eq!(ds.dropped_rows, 1);
    assert_eq!(ds.well_name(), Some("SYNTH-1"));
    assert_eq!(ds.step(), Some(0.5));

    let map = map_curves(&ds);
    assert_eq!(map.get(CurveRole::Rt), Some("ILD"));
    assert_eq!(map.get(CurveRole::Nphi), Some("NPHI"));
    assert!(map.get(CurveRole::Phie).is_none());
}

#[test]
fn headerless_text_is_a_parse_failure() {
    assert_eq!(try_parse_las("just some text\n1 2 3\n"), Err(LasError::NoCurves));
}

// ============================================================================
// Interpretation through volumetrics
// ============================================================================

#[test]
fn interpretation_zonal_and_volumetrics() {
    let ds = parse_las(&synthetic_las());
    let map = map_curves(&ds);
    let interp = run_interpretation(&ds, &map, &InterpretationParams::default()).unwrap();

    // Raw curves untouched, derived curves appended and mapped
    assert_eq!(interp.dataset.curves.len(), 9);
    assert_eq!(interp.curve_map.get(CurveRole::Phie), Some("PHIE_CALC"));
    assert_eq!(interp.curve_map.get(CurveRole::Sw), Some("SW_CALC"));
    assert_eq!(interp.curve_map.get(CurveRole::Vsh), Some("VSH_CALC"));
    assert_eq!(ds.curves.len(), 5);

    assert_eq!(interp.lithology[0], Lithology::Sandstone);
    assert_eq!(interp.lithology[15], Lithology::Shale);
    // Density porosity 0.20 against neutron 0.15
    assert_eq!(interp.fluid[0], FluidIndication::Gas);
    assert_eq!(interp.fluid[15], FluidIndication::Water);

    let stats = compute_zonal_stats(
        &interp.dataset,
        &interp.curve_map,
        2000.0,
        2009.5,
        &ZoneCutoffs::default(),
    )
    .unwrap();
    assert!((stats.gross_thickness - 10.0).abs() < 1e-9);
    assert!((stats.net_thickness - 5.0).abs() < 1e-9);
    assert!((stats.pay_thickness - 5.0).abs() < 1e-9);
    assert!((stats.ntg - 0.5).abs() < 1e-9);
    assert!((stats.avg_vsh - 0.1).abs() < 1e-9);
    // RMS of 0.20 and 0.15, shale-corrected by 0.9
    assert!((stats.avg_phi - 0.1591).abs() < 1e-3, "phi {}", stats.avg_phi);
    assert!((stats.avg_sw - 0.3143).abs() < 5e-3, "sw {}", stats.avg_sw);

    let result = calculate_volumetrics(
        &stats,
        &VolumetricParameters {
            area_acres: 640.0,
            recovery_factor: 0.3,
            fluid_type: FluidType::Oil,
            bo: Some(1.2),
            bg: None,
        },
    );
    let expected_hcpv = 640.0 * 5.0 * stats.avg_phi * (1.0 - stats.avg_sw);
    assert!((result.hcpv - expected_hcpv).abs() < 1e-6);
    let ooip = result.in_place.ooip().unwrap();
    assert!((ooip - 7758.0 * expected_hcpv / 1.2).abs() / ooip < 1e-12);
    assert!((result.reserves - 0.3 * ooip).abs() / ooip < 1e-12);
}

#[test]
fn shale_only_window_has_no_pay() {
    let ds = parse_las(&synthetic_las());
    let interp =
        run_interpretation(&ds, &map_curves(&ds), &InterpretationParams::default()).unwrap();
    // Reversed window bounds are accepted
    let stats = compute_zonal_stats(
        &interp.dataset,
        &interp.curve_map,
        2009.5,
        2005.0,
        &ZoneCutoffs::default(),
    )
    .unwrap();
    assert!((stats.gross_thickness - 5.0).abs() < 1e-9);
    assert_eq!(stats.pay_thickness, 0.0);
    assert_eq!(stats.avg_phi, 0.0);
}

#[test]
fn zone_without_porosity_is_not_computable() {
    let ds = parse_las(&synthetic_las());
    let map = map_curves(&ds);
    assert!(compute_zonal_stats(&ds, &map, 2000.0, 2010.0, &ZoneCutoffs::default()).is_none());
}

// ============================================================================
// Quality control
// ============================================================================

#[test]
fn qc_on_clean_synthetic_well() {
    let ds = parse_las(&synthetic_las());
    let report = analyze(&ds, &map_curves(&ds), None);
    assert_eq!(report.well_id, "SYNTH-1");
    assert_eq!(report.total_gaps, 0);
    assert!(!report.has_critical());
    assert_eq!(report.stats.len(), 5);
    assert_eq!(report.stats["GR"].count, 20);
    // Only the dropped-row info flag, which carries no penalty
    assert_eq!(report.flags.len(), 1);
    assert_eq!(report.score, 100.0);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"well_id\":\"SYNTH-1\""));
}
