//! Engine config checks
//!
//! - Unknown keys: the raw TOML tree is walked before serde sees it, and any
//!   dotted path not in [`known_config_keys`] becomes a warning with the
//!   nearest known key as a suggestion. A typo never fails a load.
//! - Physical ranges: impossible petrophysical constants are errors,
//!   unusual-but-usable ones are warnings.

use std::collections::HashSet;

use super::EngineConfig;

/// Non-fatal finding: an unknown key or a suspicious value
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationWarning {
    fn range(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
            suggestion: None,
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for EngineConfig.
///
/// Maintained by hand to match the struct hierarchy in engine_config.rs and
/// `InterpretationParams`. A new field must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        // [cutoffs]
        "cutoffs",
        "cutoffs.vsh_max",
        "cutoffs.phi_min",
        "cutoffs.sw_max",
        // [interpretation]
        "interpretation",
        "interpretation.gr_clean",
        "interpretation.gr_shale",
        "interpretation.vsh_method",
        "interpretation.rho_matrix",
        "interpretation.rho_fluid",
        "interpretation.dt_matrix",
        "interpretation.dt_fluid",
        "interpretation.nd_method",
        "interpretation.shale_correction",
        "interpretation.saturation_model",
        "interpretation.rw",
        "interpretation.rsh",
        "interpretation.a",
        "interpretation.m",
        "interpretation.n",
        "interpretation.temperature_degc",
        "interpretation.qv",
        "interpretation.perm_model",
        // [volumetrics]
        "volumetrics",
        "volumetrics.default_bo",
        "volumetrics.default_bg",
        // [permeability]
        "permeability",
        "permeability.min_md",
        "permeability.max_md",
        // [monte_carlo]
        "monte_carlo",
        "monte_carlo.default_iterations",
        "monte_carlo.parallel_chunk_size",
        "monte_carlo.sensitivity_trim",
        "monte_carlo.sensitivity_normal_z",
        // [qc]
        "qc",
        "qc.gap_factor",
        "qc.max_reported_gaps",
        "qc.gap_penalty_per_gap",
        "qc.gap_penalty_cap",
        "qc.critical_penalty",
        "qc.warning_penalty",
        "qc.outlier_penalty_per_pct",
        "qc.iqr_fence",
        "qc.high_missing_pct",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Every dotted key path in a TOML tree, tables included.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance between two strings, counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexically smallest key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), *k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails: unparseable TOML yields no warnings and is reported by the
/// typed deserialization pass instead.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed EngineConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must be
/// rejected; warnings are suspicious but usable.
pub fn validate_physical_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let p = &config.interpretation;

    if !(p.gr_clean.is_finite() && p.gr_shale.is_finite()) || p.gr_shale <= p.gr_clean {
        errors.push(format!(
            "interpretation.gr_shale ({}) must exceed gr_clean ({})",
            p.gr_shale, p.gr_clean
        ));
    }

    // Grain densities from 2.0 (coal-ish) to 3.2 (anhydrite and heavier)
    if !(2.0..=3.2).contains(&p.rho_matrix) {
        errors.push(format!(
            "interpretation.rho_matrix = {} is outside physical range (2.0-3.2 g/cc)",
            p.rho_matrix
        ));
    }
    if !(0.5..=1.5).contains(&p.rho_fluid) {
        errors.push(format!(
            "interpretation.rho_fluid = {} is outside physical range (0.5-1.5 g/cc)",
            p.rho_fluid
        ));
    }

    if !(p.dt_matrix.is_finite() && p.dt_fluid.is_finite()) || p.dt_matrix >= p.dt_fluid {
        errors.push(format!(
            "interpretation.dt_matrix ({}) must be less than dt_fluid ({})",
            p.dt_matrix, p.dt_fluid
        ));
    }

    for (name, value) in [
        ("interpretation.rw", p.rw),
        ("interpretation.rsh", p.rsh),
        ("interpretation.a", p.a),
        ("interpretation.m", p.m),
        ("interpretation.n", p.n),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("{name} = {value} must be > 0 (used as divisor or exponent)"));
        }
    }
    if !(p.qv.is_finite() && p.qv >= 0.0) {
        errors.push(format!("interpretation.qv = {} cannot be negative", p.qv));
    }
    if !p.temperature_degc.is_finite() {
        errors.push("interpretation.temperature_degc must be finite".to_string());
    }

    if p.rw > 5.0 {
        warnings.push(ValidationWarning::range(
            "interpretation.rw",
            format!("rw = {} is outside typical range (0.01-5 ohm.m)", p.rw),
        ));
    }
    if !(1.3..=3.0).contains(&p.m) {
        warnings.push(ValidationWarning::range(
            "interpretation.m",
            format!("cementation exponent m = {} is outside typical range (1.3-3.0)", p.m),
        ));
    }
    if !(1.5..=3.0).contains(&p.n) {
        warnings.push(ValidationWarning::range(
            "interpretation.n",
            format!("saturation exponent n = {} is outside typical range (1.5-3.0)", p.n),
        ));
    }

    let v = &config.volumetrics;
    if !(1.0..=3.0).contains(&v.default_bo) {
        warnings.push(ValidationWarning::range(
            "volumetrics.default_bo",
            format!("default_bo = {} is outside typical range (1.0-3.0 rb/stb)", v.default_bo),
        ));
    }
    if v.default_bg > 0.05 {
        warnings.push(ValidationWarning::range(
            "volumetrics.default_bg",
            format!("default_bg = {} is above typical range (< 0.05 rcf/scf)", v.default_bg),
        ));
    }

    if config.cutoffs.phi_min > 0.3 {
        warnings.push(ValidationWarning::range(
            "cutoffs.phi_min",
            format!(
                "phi_min = {} would exclude most reservoir rock",
                config.cutoffs.phi_min
            ),
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
