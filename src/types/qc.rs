//! Quality-control report types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flag severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Report section a flag belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QcSection {
    Dataset,
    DepthContinuity,
    CurveStatistics,
    PhysicsBounds,
    CrossValidation,
}

impl std::fmt::Display for QcSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QcSection::Dataset => write!(f, "Dataset"),
            QcSection::DepthContinuity => write!(f, "Depth Continuity"),
            QcSection::CurveStatistics => write!(f, "Curve Statistics"),
            QcSection::PhysicsBounds => write!(f, "Physics Bounds"),
            QcSection::CrossValidation => write!(f, "Cross Validation"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QcFlag {
    pub severity: Severity,
    pub message: String,
    pub section: QcSection,
}

impl QcFlag {
    pub fn new(severity: Severity, section: QcSection, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            section,
        }
    }
}

/// Descriptive statistics for one curve
///
/// Computed over present, non-NULL values. All numeric fields are 0.0 when
/// the curve has no valid values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CurveStatistics {
    /// Valid (present, non-NULL, finite) values
    pub count: usize,
    /// Absent values plus NULL-sentinel values
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Values outside the IQR fences that are still within hard physical bounds
    pub outliers: usize,
    /// `outliers` as a percentage of `count`
    pub outlier_pct: f64,
}

/// A break in depth sampling larger than the gap threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DepthGap {
    pub top: f64,
    pub base: f64,
    pub size: f64,
}

/// Complete QC result for one well
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QcReport {
    pub well_id: String,
    pub flags: Vec<QcFlag>,
    pub stats: BTreeMap<String, CurveStatistics>,
    /// Composite quality score, 0-100
    pub score: f64,
    /// First gaps found (capped)
    pub gaps: Vec<DepthGap>,
    /// All gaps found, including those beyond the reported cap
    pub total_gaps: usize,
    /// Sampling step used for gap detection, if one could be determined
    pub nominal_step: Option<f64>,
}

impl QcReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.flags.iter().filter(|f| f.severity == severity).count()
    }

    pub fn has_critical(&self) -> bool {
        self.flags.iter().any(|f| f.severity == Severity::Critical)
    }
}
