//! Config Validation Tests
//!
//! Typo detection on raw TOML and physical range validation on a parsed
//! `EngineConfig`, exercised through the public config API.

use petro_engine::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use petro_engine::config::{ConfigError, EngineConfig};

// ============================================================================
// Typo Detection Tests
// ============================================================================

#[test]
fn typo_in_cutoffs_warns_with_suggestion() {
    let toml_str = r#"
[cutoffs]
vsh_maxx = 0.35
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("vsh_maxx"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("cutoffs.vsh_max"));
}

#[test]
fn typo_in_well_section_warns() {
    let toml_str = r#"
[well]
naem = "Test-Well"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].field.contains("naem"));
    // "naem" is distance 2 from "name"
    assert_eq!(warnings[0].suggestion.as_deref(), Some("well.name"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[well]
name = "15/9-F-11"
field = "Volve"

[cutoffs]
vsh_max = 0.35
phi_min = 0.1
sw_max = 0.5

[interpretation]
gr_clean = 25.0
gr_shale = 140.0
vsh_method = "larionov_tertiary"
nd_method = "arithmetic"
saturation_model = "simandoux"
rw = 0.04
rsh = 3.0
m = 2.1
perm_model = "coates"

[volumetrics]
default_bo = 1.3
default_bg = 0.004

[permeability]
min_md = 0.001
max_md = 5000.0

[monte_carlo]
default_iterations = 5000
parallel_chunk_size = 512

[qc]
gap_factor = 2.0
iqr_fence = 3.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(
        warnings.is_empty(),
        "Valid config should produce 0 warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
    let config = EngineConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.well.name, "15/9-F-11");
    assert_eq!(config.monte_carlo.default_iterations, 5000);
}

#[test]
fn unknown_section_warns() {
    let toml_str = r#"
[nonexistent_section]
some_field = 42
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(!warnings.is_empty());
    assert!(warnings.iter().any(|w| w.field.contains("nonexistent_section")));
}

#[test]
fn multiple_typos_all_warned() {
    let toml_str = r#"
[well]
naem = "Test"

[qc]
gap_facter = 2.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 2, "Expected 2 warnings for 2 typos");
}

#[test]
fn empty_toml_produces_zero_warnings() {
    assert!(validate_unknown_keys("").is_empty());
}

#[test]
fn known_keys_set_is_complete() {
    let config = EngineConfig::default();
    let toml_str = config.to_toml().expect("Default config should serialize");
    let warnings = validate_unknown_keys(&toml_str);
    assert!(
        warnings.is_empty(),
        "Default config serialization should produce 0 unknown-key warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn suggest_correction_finds_close_match() {
    let known = known_config_keys();
    let s = suggest_correction("interpretation.saturation_modle", &known);
    assert_eq!(s.as_deref(), Some("interpretation.saturation_model"));
}

#[test]
fn suggest_correction_returns_none_for_garbage() {
    let known = known_config_keys();
    assert!(suggest_correction("zzz_completely_invalid_xyz_12345", &known).is_none());
}

// ============================================================================
// Range Validation Tests
// ============================================================================

#[test]
fn default_config_has_no_range_errors_or_warnings() {
    let (errors, warnings) = validate_physical_ranges(&EngineConfig::default());
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty());
}

#[test]
fn inverted_gamma_ray_baselines_are_error() {
    let mut config = EngineConfig::default();
    config.interpretation.gr_clean = 150.0;
    config.interpretation.gr_shale = 100.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("gr_shale")));
}

#[test]
fn matrix_density_outside_physical_range_is_error() {
    let mut config = EngineConfig::default();
    config.interpretation.rho_matrix = 4.5;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("rho_matrix")));
}

#[test]
fn zero_rw_is_error() {
    let mut config = EngineConfig::default();
    config.interpretation.rw = 0.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("interpretation.rw")));
}

#[test]
fn unusual_cementation_exponent_is_warning_only() {
    let mut config = EngineConfig::default();
    config.interpretation.m = 3.5;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "interpretation.m"));
}

#[test]
fn out_of_range_fraction_rejected_on_load() {
    let result = EngineConfig::from_toml_str("[cutoffs]\nsw_max = 1.5\n");
    match result {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("cutoffs.sw_max")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn typo_does_not_block_load() {
    let config = EngineConfig::from_toml_str("[cutoffs]\nphi_mn = 0.2\n").unwrap();
    assert_eq!(config, EngineConfig::default());
}
