//! Engine Configuration - operator-tunable cutoffs, factors and scoring weights
//!
//! Every section implements `Default` with values matching `config::defaults`,
//! so an empty TOML document (or no file at all) reproduces the built-in
//! behaviour exactly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::physics_engine::InterpretationParams;
use crate::types::ZoneCutoffs;

/// Environment variable naming a config file for [`EngineConfig::load`].
pub const CONFIG_ENV_VAR: &str = "PETRO_CONFIG";

/// Config file picked up from the working directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "petro.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the engine.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$PETRO_CONFIG` env var
/// 2. `./petro.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Well identification used in reports
    #[serde(default)]
    pub well: WellInfo,

    /// Net and pay cutoffs
    #[serde(default)]
    pub cutoffs: ZoneCutoffs,

    /// Parameters for the derived-curve pipeline
    #[serde(default)]
    pub interpretation: InterpretationParams,

    /// Formation volume factor defaults
    #[serde(default)]
    pub volumetrics: VolumetricsConfig,

    /// Permeability clamp range
    #[serde(default)]
    pub permeability: PermeabilityConfig,

    /// Simulator defaults
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,

    /// QC thresholds and scoring weights
    #[serde(default)]
    pub qc: QcConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PETRO_CONFIG` environment variable
    /// 2. `./petro.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), well = %config.well.name, "Loaded engine config from PETRO_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from PETRO_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "PETRO_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(well = %config.well.name, "Loaded engine config from ./petro.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./petro.toml, using defaults");
                }
            }
        }

        info!("No petro.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document.
    ///
    /// Two passes: unknown keys are logged as warnings (with a suggestion when
    /// one is close), then the typed config is range-checked.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all values for physical sense and internal consistency.
    ///
    /// Rules:
    /// - Every numeric field must be finite
    /// - Fractions (cutoffs, trims) must lie in [0, 1]
    /// - Formation volume factors and divisors must be positive
    /// - Ranges must be ordered (min < max)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let c = &self.cutoffs;
        Self::check_fraction(c.vsh_max, "cutoffs.vsh_max", &mut errors);
        Self::check_fraction(c.phi_min, "cutoffs.phi_min", &mut errors);
        Self::check_fraction(c.sw_max, "cutoffs.sw_max", &mut errors);

        let v = &self.volumetrics;
        Self::check_positive(v.default_bo, "volumetrics.default_bo", &mut errors);
        Self::check_positive(v.default_bg, "volumetrics.default_bg", &mut errors);

        let p = &self.permeability;
        Self::check_positive(p.min_md, "permeability.min_md", &mut errors);
        Self::check_positive(p.max_md, "permeability.max_md", &mut errors);
        if p.min_md.is_finite() && p.max_md.is_finite() && p.min_md >= p.max_md {
            errors.push(format!(
                "permeability.min_md ({:.3}) must be < max_md ({:.3})",
                p.min_md, p.max_md
            ));
        }

        let mc = &self.monte_carlo;
        if mc.default_iterations == 0 {
            errors.push("monte_carlo.default_iterations must be > 0".to_string());
        }
        if mc.parallel_chunk_size == 0 {
            errors.push("monte_carlo.parallel_chunk_size must be > 0".to_string());
        }
        if !(0.0..0.5).contains(&mc.sensitivity_trim) {
            errors.push(format!(
                "monte_carlo.sensitivity_trim = {} must be in [0, 0.5)",
                mc.sensitivity_trim
            ));
        }
        Self::check_positive(mc.sensitivity_normal_z, "monte_carlo.sensitivity_normal_z", &mut errors);

        let q = &self.qc;
        if !q.gap_factor.is_finite() || q.gap_factor <= 1.0 {
            errors.push(format!("qc.gap_factor = {} must be > 1", q.gap_factor));
        }
        Self::check_non_negative(q.gap_penalty_per_gap, "qc.gap_penalty_per_gap", &mut errors);
        Self::check_non_negative(q.gap_penalty_cap, "qc.gap_penalty_cap", &mut errors);
        Self::check_non_negative(q.critical_penalty, "qc.critical_penalty", &mut errors);
        Self::check_non_negative(q.warning_penalty, "qc.warning_penalty", &mut errors);
        Self::check_non_negative(q.outlier_penalty_per_pct, "qc.outlier_penalty_per_pct", &mut errors);
        Self::check_positive(q.iqr_fence, "qc.iqr_fence", &mut errors);
        if !(0.0..=100.0).contains(&q.high_missing_pct) {
            errors.push(format!(
                "qc.high_missing_pct = {} must be in [0, 100]",
                q.high_missing_pct
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_fraction(value: f64, name: &str, errors: &mut Vec<String>) {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!("{name} = {value} must be a fraction in [0, 1]"));
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN fails every comparison, so test the accepted range explicitly
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("{name} = {value} must be a finite number > 0"));
        }
    }

    fn check_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(format!("{name} = {value} must be a finite number >= 0"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Well Info
// ============================================================================

/// Identification metadata. Not used for logic, but appears in logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Fallback well identifier when the LAS header carries none
    #[serde(default = "default_well_name")]
    pub name: String,

    /// Field name
    #[serde(default)]
    pub field: String,
}

fn default_well_name() -> String {
    "UNKNOWN".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
        }
    }
}

// ============================================================================
// Volumetrics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumetricsConfig {
    /// Oil formation volume factor when the caller supplies none (rb/stb)
    #[serde(default = "default_bo")]
    pub default_bo: f64,

    /// Gas formation volume factor when the caller supplies none (rcf/scf)
    #[serde(default = "default_bg")]
    pub default_bg: f64,
}

fn default_bo() -> f64 { defaults::DEFAULT_BO }
fn default_bg() -> f64 { defaults::DEFAULT_BG }

impl Default for VolumetricsConfig {
    fn default() -> Self {
        Self {
            default_bo: default_bo(),
            default_bg: default_bg(),
        }
    }
}

// ============================================================================
// Permeability
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermeabilityConfig {
    /// Floor, also returned for invalid inputs (mD)
    #[serde(default = "default_perm_min")]
    pub min_md: f64,

    /// Ceiling (mD)
    #[serde(default = "default_perm_max")]
    pub max_md: f64,
}

fn default_perm_min() -> f64 { defaults::PERM_MIN_MD }
fn default_perm_max() -> f64 { defaults::PERM_MAX_MD }

impl Default for PermeabilityConfig {
    fn default() -> Self {
        Self {
            min_md: default_perm_min(),
            max_md: default_perm_max(),
        }
    }
}

// ============================================================================
// Monte Carlo
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Iterations used by the CLI when the inputs file sets none
    #[serde(default = "default_iterations")]
    pub default_iterations: usize,

    /// Iterations per seeded chunk in the parallel runner
    #[serde(default = "default_chunk_size")]
    pub parallel_chunk_size: usize,

    /// Fraction trimmed from each end of bounded ranges for sensitivity
    #[serde(default = "default_sensitivity_trim")]
    pub sensitivity_trim: f64,

    /// Sigma multiplier for normal sensitivity bounds
    #[serde(default = "default_sensitivity_z")]
    pub sensitivity_normal_z: f64,
}

fn default_iterations() -> usize { defaults::MC_DEFAULT_ITERATIONS }
fn default_chunk_size() -> usize { defaults::MC_PARALLEL_CHUNK_SIZE }
fn default_sensitivity_trim() -> f64 { defaults::MC_SENSITIVITY_TRIM }
fn default_sensitivity_z() -> f64 { defaults::MC_SENSITIVITY_NORMAL_Z }

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            default_iterations: default_iterations(),
            parallel_chunk_size: default_chunk_size(),
            sensitivity_trim: default_sensitivity_trim(),
            sensitivity_normal_z: default_sensitivity_z(),
        }
    }
}

// ============================================================================
// Quality Control
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcConfig {
    /// Depth step multiple that counts as a gap
    #[serde(default = "default_gap_factor")]
    pub gap_factor: f64,

    /// Gaps listed individually in the report
    #[serde(default = "default_max_reported_gaps")]
    pub max_reported_gaps: usize,

    #[serde(default = "default_gap_penalty")]
    pub gap_penalty_per_gap: f64,

    #[serde(default = "default_gap_penalty_cap")]
    pub gap_penalty_cap: f64,

    #[serde(default = "default_critical_penalty")]
    pub critical_penalty: f64,

    #[serde(default = "default_warning_penalty")]
    pub warning_penalty: f64,

    #[serde(default = "default_outlier_penalty")]
    pub outlier_penalty_per_pct: f64,

    /// Tukey fence multiplier
    #[serde(default = "default_iqr_fence")]
    pub iqr_fence: f64,

    /// Missing-value percentage above which a curve gets an info flag
    #[serde(default = "default_high_missing_pct")]
    pub high_missing_pct: f64,
}

fn default_gap_factor() -> f64 { defaults::QC_GAP_FACTOR }
fn default_max_reported_gaps() -> usize { defaults::QC_MAX_REPORTED_GAPS }
fn default_gap_penalty() -> f64 { defaults::QC_GAP_PENALTY_PER_GAP }
fn default_gap_penalty_cap() -> f64 { defaults::QC_GAP_PENALTY_CAP }
fn default_critical_penalty() -> f64 { defaults::QC_CRITICAL_PENALTY }
fn default_warning_penalty() -> f64 { defaults::QC_WARNING_PENALTY }
fn default_outlier_penalty() -> f64 { defaults::QC_OUTLIER_PENALTY_PER_PCT }
fn default_iqr_fence() -> f64 { defaults::QC_IQR_FENCE }
fn default_high_missing_pct() -> f64 { defaults::QC_HIGH_MISSING_PCT }

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            gap_factor: default_gap_factor(),
            max_reported_gaps: default_max_reported_gaps(),
            gap_penalty_per_gap: default_gap_penalty(),
            gap_penalty_cap: default_gap_penalty_cap(),
            critical_penalty: default_critical_penalty(),
            warning_penalty: default_warning_penalty(),
            outlier_penalty_per_pct: default_outlier_penalty(),
            iqr_fence: default_iqr_fence(),
            high_missing_pct: default_high_missing_pct(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_matches_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
[cutoffs]
phi_min = 0.12

[volumetrics]
default_bo = 1.35
"#,
        )
        .unwrap();
        assert!((config.cutoffs.phi_min - 0.12).abs() < 1e-12);
        assert!((config.cutoffs.vsh_max - defaults::CUTOFF_VSH_MAX).abs() < 1e-12);
        assert!((config.volumetrics.default_bo - 1.35).abs() < 1e-12);
        assert!((config.volumetrics.default_bg - defaults::DEFAULT_BG).abs() < 1e-12);
    }

    #[test]
    fn test_cutoff_outside_fraction_rejected() {
        let result = EngineConfig::from_toml_str("[cutoffs]\nsw_max = 1.5\n");
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("cutoffs.sw_max")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_permeability_range_rejected() {
        let mut config = EngineConfig::default();
        config.permeability.min_md = 100.0;
        config.permeability.max_md = 10.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("permeability.min_md"));
    }

    #[test]
    fn test_nan_rejected() {
        let mut config = EngineConfig::default();
        config.volumetrics.default_bg = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = EngineConfig::default();
        config.monte_carlo.default_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = EngineConfig::from_toml_str("[cutoffs\nvsh_max = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
