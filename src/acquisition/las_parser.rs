//! LAS 2.0 Well-Log Parser
//!
//! Parses Log ASCII Standard text into a [`LogDataset`]. The format is a set
//! of `~` sections:
//!
//! - `~V` VERSION: `VERS. 2.0 : CWLS LOG ASCII STANDARD`
//! - `~W` WELL: header items, including `STRT`, `STOP`, `STEP`, `NULL`, `WELL`
//! - `~C` CURVE: one line per data column, in column order
//! - `~P` PARAMETER: logging parameters (`BHT`, `RMF`, ...)
//! - `~O` OTHER: free text, ignored
//! - `~A` ASCII: whitespace-delimited rows, one value per curve
//!
//! Header lines follow `MNEMONIC.UNIT  VALUE : DESCRIPTION`; the value ends at
//! the last colon. Parsing is permissive: rows whose token count differs from
//! the curve count are dropped and counted, tokens that are not numbers become
//! absent values, and NULL sentinels are kept as declared.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{HeaderItem, LogDataset, Sample};

/// Structural failures that leave nothing to interpret
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LasError {
    #[error("LAS file has no ~CURVE definitions")]
    NoCurves,

    #[error("LAS file has no data rows matching the {curves} declared curves ({dropped} rows dropped)")]
    NoData { curves: usize, dropped: usize },
}

/// Section selected by the first letter after `~` (`~ASCII` and `~DATA` both hold rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
    Unknown,
}

impl Section {
    fn from_header(line: &str) -> Self {
        let letter = line
            .trim_start()
            .trim_start_matches('~')
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase());
        match letter {
            Some('V') => Section::Version,
            Some('W') => Section::Well,
            Some('C') => Section::Curve,
            Some('P') => Section::Parameter,
            Some('O') => Section::Other,
            Some('A') | Some('D') => Section::Ascii,
            _ => Section::Unknown,
        }
    }
}

/// `MNEMONIC . UNIT rest` where `rest` holds `VALUE : DESCRIPTION`
fn header_line_regex() -> Option<&'static Regex> {
    static HEADER_LINE: OnceLock<Option<Regex>> = OnceLock::new();
    HEADER_LINE
        .get_or_init(|| Regex::new(r"^\s*([^.\s][^.]*?)\s*\.(\S*)\s*(.*)$").ok())
        .as_ref()
}

/// Parse one header line. Returns `None` for lines without a `MNEMONIC.` prefix.
pub fn parse_header_line(line: &str) -> Option<HeaderItem> {
    let caps = header_line_regex()?.captures(line)?;
    let mnemonic = caps.get(1)?.as_str().trim();
    if mnemonic.is_empty() {
        return None;
    }
    let unit = caps.get(2).map_or("", |m| m.as_str());
    let rest = caps.get(3).map_or("", |m| m.as_str());

    let (value, description) = match rest.rsplit_once(':') {
        Some((value, description)) => (value.trim(), description.trim()),
        None => (rest.trim(), ""),
    };

    Some(HeaderItem {
        mnemonic: mnemonic.to_string(),
        unit: unit.to_string(),
        value: value.to_string(),
        description: description.to_string(),
    })
}

fn parse_token(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}

/// Parse LAS text into a dataset.
///
/// Never fails. A dataset with no curves or no data rows signals that the
/// text was not usable; see [`try_parse_las`] for the checked variant.
pub fn parse_las(text: &str) -> LogDataset {
    let mut section = Section::Unknown;
    let mut version_params = BTreeMap::new();
    let mut well_params = BTreeMap::new();
    let mut parameters = BTreeMap::new();
    let mut curves: Vec<HeaderItem> = Vec::new();
    let mut data: Vec<Sample> = Vec::new();
    let mut dropped_rows = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with('~') {
            section = Section::from_header(trimmed);
            continue;
        }

        match section {
            Section::Version | Section::Well | Section::Parameter => {
                let Some(item) = parse_header_line(trimmed) else {
                    continue;
                };
                let target = match section {
                    Section::Version => &mut version_params,
                    Section::Well => &mut well_params,
                    _ => &mut parameters,
                };
                target.insert(item.mnemonic.to_uppercase(), item);
            }
            Section::Curve => {
                if let Some(item) = parse_header_line(trimmed) {
                    if curves.iter().any(|c| c.mnemonic == item.mnemonic) {
                        warn!(mnemonic = %item.mnemonic, "Duplicate curve mnemonic, later column wins");
                    }
                    curves.push(item);
                }
            }
            Section::Ascii => {
                let tokens: Vec<&str> = trimmed.split_whitespace().collect();
                if tokens.len() != curves.len() {
                    dropped_rows += 1;
                    continue;
                }
                let values: HashMap<String, Option<f64>> = curves
                    .iter()
                    .zip(&tokens)
                    .map(|(curve, token)| (curve.mnemonic.clone(), parse_token(token)))
                    .collect();
                data.push(Sample::new(values));
            }
            Section::Other | Section::Unknown => {}
        }
    }

    if dropped_rows > 0 {
        debug!(
            dropped_rows,
            curves = curves.len(),
            "Dropped LAS data rows with mismatched token count"
        );
    }
    debug!(
        curves = curves.len(),
        samples = data.len(),
        well_params = well_params.len(),
        "Parsed LAS text"
    );

    LogDataset {
        version_params,
        well_params,
        curves,
        parameters,
        data,
        dropped_rows,
    }
}

/// Parse LAS text, rejecting files with no curves or no usable rows.
pub fn try_parse_las(text: &str) -> Result<LogDataset, LasError> {
    let dataset = parse_las(text);
    if dataset.curves.is_empty() {
        return Err(LasError::NoCurves);
    }
    if dataset.data.is_empty() {
        return Err(LasError::NoData {
            curves: dataset.curves.len(),
            dropped: dataset.dropped_rows,
        });
    }
    Ok(dataset)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
~VERSION INFORMATION
 VERS.   2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0
 WRAP.   NO  : ONE LINE PER DEPTH STEP
~WELL INFORMATION
#MNEM.UNIT   DATA         : DESCRIPTION
 STRT.M      1000.0       : START DEPTH
 STOP.M      1001.0       : STOP DEPTH
 STEP.M      0.5          : STEP
 NULL.       -999.25      : NULL VALUE
 WELL.       15/9-F-11    : WELL
~CURVE INFORMATION
 DEPT.M                   : DEPTH
 GR  .GAPI                : GAMMA RAY
 RHOB.G/C3                : BULK DENSITY
~PARAMETER INFORMATION
 BHT .DEGC   92.0         : BOTTOM HOLE TEMPERATURE
~OTHER
 Free text that is not parsed.
~A  DEPT     GR      RHOB
1000.0   45.2    2.45
1000.5   -999.25 2.50
1000.7   51.0
1001.0   60.1    2.38
";

    #[test]
    fn test_parse_three_good_rows_drops_short_row() {
        let ds = parse_las(SAMPLE);
        assert_eq!(ds.curves.len(), 3);
        assert_eq!(ds.data.len(), 3);
        assert_eq!(ds.dropped_rows, 1);
        assert!((ds.data[2].get("GR").unwrap() - 60.1).abs() < 1e-9);
    }

    #[test]
    fn test_null_sentinel_kept_raw() {
        let ds = parse_las(SAMPLE);
        assert_eq!(ds.data[1].get("GR"), Some(-999.25));
        assert!(ds.is_null(-999.25));
        assert_eq!(ds.value(1, "GR"), None);
    }

    #[test]
    fn test_header_sections() {
        let ds = parse_las(SAMPLE);
        assert_eq!(ds.version_params["VERS"].value, "2.0");
        assert_eq!(ds.step(), Some(0.5));
        assert_eq!(ds.null_value(), Some(-999.25));
        assert_eq!(ds.well_name(), Some("15/9-F-11"));
        assert_eq!(ds.parameters["BHT"].unit, "DEGC");
        assert_eq!(ds.curves[1].mnemonic, "GR");
        assert_eq!(ds.curves[1].unit, "GAPI");
        assert_eq!(ds.curves[1].description, "GAMMA RAY");
    }

    #[test]
    fn test_header_value_ends_at_last_colon() {
        let item = parse_header_line("TIME.HH:MM  12:30 : LOG TIME").unwrap();
        assert_eq!(item.mnemonic, "TIME");
        assert_eq!(item.unit, "HH:MM");
        assert_eq!(item.value, "12:30");
        assert_eq!(item.description, "LOG TIME");
    }

    #[test]
    fn test_header_without_unit_or_colon() {
        let item = parse_header_line("NULL.   -999.25").unwrap();
        assert_eq!(item.unit, "");
        assert_eq!(item.value, "-999.25");
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_unparseable_token_is_absent() {
        let text = "~C\nDEPT.M : d\nGR.API : g\n~A\n100.0 abc\n";
        let ds = parse_las(text);
        assert_eq!(ds.data.len(), 1);
        assert!(ds.data[0].contains("GR"));
        assert_eq!(ds.data[0].get("GR"), None);
    }

    #[test]
    fn test_try_parse_rejects_empty_inputs() {
        assert_eq!(try_parse_las(""), Err(LasError::NoCurves));
        let no_rows = "~C\nDEPT.M : d\n~A\n1 2 3\n";
        assert_eq!(
            try_parse_las(no_rows),
            Err(LasError::NoData { curves: 1, dropped: 1 })
        );
    }

    #[test]
    fn test_data_header_reads_rows() {
        let text = "~CURVE\nDEPT.M : d\nGR.API : g\nRHOB.G/C3 : r\n~DATA\n\
                    100.0 45.0 2.40\n100.5 46.0 2.38\n101.0 48.0 2.35\n";
        let ds = try_parse_las(text).unwrap();
        assert_eq!(ds.data.len(), 3);
        assert_eq!(ds.dropped_rows, 0);
        assert_eq!(ds.data[2].get("RHOB"), Some(2.35));
    }

    #[test]
    fn test_unrecognised_section_is_skipped() {
        let text = "~C\nDEPT.M : d\nGR.API : g\n~TOPS\nBRENT 2500.0\n~A\n100.0 45.0\n";
        let ds = parse_las(text);
        assert_eq!(ds.curves.len(), 2);
        assert_eq!(ds.data.len(), 1);
        assert_eq!(ds.dropped_rows, 0);
        assert!(ds.parameters.is_empty());
    }
}
