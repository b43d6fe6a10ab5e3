//! Parsed well-log dataset: header parameters, curve definitions, depth samples

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One `MNEMONIC.UNIT VALUE : DESCRIPTION` header line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    /// Header value parsed as a number, if it is one.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

/// A single depth-indexed row: mnemonic -> value (absent when the token was not numeric)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Sample {
    values: HashMap<String, Option<f64>>,
}

impl Sample {
    pub fn new(values: HashMap<String, Option<f64>>) -> Self {
        Self { values }
    }

    /// Raw value for a mnemonic. `None` if the curve is unknown or the value absent.
    ///
    /// NULL sentinels are returned as-is; use [`LogDataset::value`] to filter them.
    pub fn get(&self, mnemonic: &str) -> Option<f64> {
        self.values.get(mnemonic).copied().flatten()
    }

    /// Whether the sample carries a field (present or absent) for this mnemonic
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.values.contains_key(mnemonic)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn with_value(&self, mnemonic: &str, value: Option<f64>) -> Self {
        let mut values = self.values.clone();
        values.insert(mnemonic.to_string(), value);
        Self { values }
    }
}

/// Error returned when a derived curve cannot be appended
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DerivedCurveError {
    #[error("Curve {0} already exists; derived curves never overwrite raw curves")]
    NameCollision(String),

    #[error("Derived curve {mnemonic} has {got} values, dataset has {expected} samples")]
    LengthMismatch {
        mnemonic: String,
        got: usize,
        expected: usize,
    },
}

/// Parsed LAS-style well log.
///
/// Immutable once parsed. Derived curves are added with [`LogDataset::with_derived_curve`],
/// which returns a new dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogDataset {
    /// ~VERSION section (VERS, WRAP, ...)
    pub version_params: BTreeMap<String, HeaderItem>,
    /// ~WELL section (STRT, STOP, STEP, NULL, WELL, ...)
    pub well_params: BTreeMap<String, HeaderItem>,
    /// ~CURVE section, in column order
    pub curves: Vec<HeaderItem>,
    /// ~PARAMETER section
    pub parameters: BTreeMap<String, HeaderItem>,
    /// ~ASCII rows whose token count matched the curve count
    pub data: Vec<Sample>,
    /// ~ASCII rows rejected for a token-count mismatch
    pub dropped_rows: usize,
}

impl LogDataset {
    /// Parsing yielded no curves or no data rows
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() || self.data.is_empty()
    }

    pub fn mnemonics(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|c| c.mnemonic.as_str())
    }

    pub fn has_curve(&self, mnemonic: &str) -> bool {
        self.curves.iter().any(|c| c.mnemonic == mnemonic)
    }

    pub fn curve_info(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.curves.iter().find(|c| c.mnemonic == mnemonic)
    }

    /// Declared NULL sentinel from the ~WELL section (e.g. -999.25)
    pub fn null_value(&self) -> Option<f64> {
        self.well_param_numeric("NULL")
    }

    /// Declared depth step from the ~WELL section, if non-zero
    pub fn step(&self) -> Option<f64> {
        self.well_param_numeric("STEP").filter(|s| *s != 0.0)
    }

    /// Well name from the ~WELL section
    pub fn well_name(&self) -> Option<&str> {
        self.well_params
            .get("WELL")
            .map(|w| w.value.trim())
            .filter(|w| !w.is_empty())
    }

    fn well_param_numeric(&self, mnemonic: &str) -> Option<f64> {
        self.well_params
            .get(mnemonic)
            .and_then(HeaderItem::numeric_value)
    }

    /// True if `value` equals the declared NULL sentinel
    pub fn is_null(&self, value: f64) -> bool {
        self.null_value()
            .is_some_and(|null| (value - null).abs() < 1e-9)
    }

    /// Value at a sample with NULL sentinels and non-finite values treated as absent
    pub fn value(&self, index: usize, mnemonic: &str) -> Option<f64> {
        let null = self.null_value();
        self.data
            .get(index)
            .and_then(|s| s.get(mnemonic))
            .filter(|v| v.is_finite())
            .filter(|v| null.map_or(true, |n| (v - n).abs() >= 1e-9))
    }

    /// Whole column with NULL sentinels treated as absent
    pub fn column(&self, mnemonic: &str) -> Vec<Option<f64>> {
        (0..self.data.len())
            .map(|i| self.value(i, mnemonic))
            .collect()
    }

    /// Whole column exactly as parsed (sentinels retained)
    pub fn raw_column(&self, mnemonic: &str) -> Vec<Option<f64>> {
        self.data.iter().map(|s| s.get(mnemonic)).collect()
    }

    /// Return a new dataset with a derived curve appended.
    ///
    /// Refuses to replace an existing curve.
    pub fn with_derived_curve(
        &self,
        info: HeaderItem,
        values: &[Option<f64>],
    ) -> Result<Self, DerivedCurveError> {
        if self.has_curve(&info.mnemonic) {
            return Err(DerivedCurveError::NameCollision(info.mnemonic));
        }
        if values.len() != self.data.len() {
            return Err(DerivedCurveError::LengthMismatch {
                mnemonic: info.mnemonic,
                got: values.len(),
                expected: self.data.len(),
            });
        }

        let data = self
            .data
            .iter()
            .zip(values)
            .map(|(sample, value)| sample.with_value(&info.mnemonic, *value))
            .collect();

        let mut curves = self.curves.clone();
        curves.push(info);

        Ok(Self {
            version_params: self.version_params.clone(),
            well_params: self.well_params.clone(),
            curves,
            parameters: self.parameters.clone(),
            data,
            dropped_rows: self.dropped_rows,
        })
    }

    /// First mnemonic derived from `base` that is not already a curve (`base`, `base_1`, ...)
    pub fn unique_mnemonic(&self, base: &str) -> String {
        if !self.has_curve(base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}_{i}"))
            .find(|candidate| !self.has_curve(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> LogDataset {
        let mut well_params = BTreeMap::new();
        well_params.insert(
            "NULL".to_string(),
            HeaderItem {
                mnemonic: "NULL".into(),
                unit: String::new(),
                value: "-999.25".into(),
                description: "NULL VALUE".into(),
            },
        );
        let curve = |m: &str| HeaderItem {
            mnemonic: m.into(),
            ..Default::default()
        };
        let sample = |d: f64, gr: Option<f64>| {
            let mut v = HashMap::new();
            v.insert("DEPT".to_string(), Some(d));
            v.insert("GR".to_string(), gr);
            Sample::new(v)
        };
        LogDataset {
            well_params,
            curves: vec![curve("DEPT"), curve("GR")],
            data: vec![
                sample(100.0, Some(45.0)),
                sample(100.5, Some(-999.25)),
                sample(101.0, None),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_null_sentinel_filtered_by_value_but_kept_raw() {
        let ds = dataset();
        assert_eq!(ds.null_value(), Some(-999.25));
        assert_eq!(ds.column("GR"), vec![Some(45.0), None, None]);
        assert_eq!(ds.raw_column("GR"), vec![Some(45.0), Some(-999.25), None]);
    }

    #[test]
    fn test_derived_curve_appends_without_touching_original() {
        let ds = dataset();
        let derived = ds
            .with_derived_curve(
                HeaderItem {
                    mnemonic: "VSH_CALC".into(),
                    unit: "V/V".into(),
                    ..Default::default()
                },
                &[Some(0.1), None, Some(0.3)],
            )
            .unwrap();

        assert_eq!(derived.curves.len(), 3);
        assert_eq!(derived.value(2, "VSH_CALC"), Some(0.3));
        assert!(!ds.has_curve("VSH_CALC"));
        assert_eq!(derived.value(0, "GR"), Some(45.0));
    }

    #[test]
    fn test_derived_curve_refuses_to_overwrite() {
        let ds = dataset();
        let result = ds.with_derived_curve(
            HeaderItem {
                mnemonic: "GR".into(),
                ..Default::default()
            },
            &[None, None, None],
        );
        assert_eq!(result, Err(DerivedCurveError::NameCollision("GR".into())));
    }

    #[test]
    fn test_unique_mnemonic_suffixes_collisions() {
        let ds = dataset();
        assert_eq!(ds.unique_mnemonic("PHIE_CALC"), "PHIE_CALC");
        assert_eq!(ds.unique_mnemonic("GR"), "GR_1");
    }
}
