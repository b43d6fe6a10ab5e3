//! Canonical curve roles and the role -> mnemonic map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical role a log curve can play in an interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurveRole {
    Depth,
    Gr,
    Rhob,
    Nphi,
    Rt,
    Dt,
    Sp,
    Cali,
    Pe,
    Phie,
    Sw,
    Vsh,
    Perm,
}

impl CurveRole {
    /// All roles in mapping order
    pub const ALL: [CurveRole; 13] = [
        CurveRole::Depth,
        CurveRole::Gr,
        CurveRole::Rhob,
        CurveRole::Nphi,
        CurveRole::Rt,
        CurveRole::Dt,
        CurveRole::Sp,
        CurveRole::Cali,
        CurveRole::Pe,
        CurveRole::Phie,
        CurveRole::Sw,
        CurveRole::Vsh,
        CurveRole::Perm,
    ];

    /// Ranked aliases (upper case). Earlier entries win.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CurveRole::Depth => &["DEPT", "DEPTH", "MD", "TDEP", "DPTH"],
            CurveRole::Gr => &["GR", "SGR", "CGR", "GRC", "GAMMA"],
            CurveRole::Rhob => &["RHOB", "RHOZ", "DEN", "ZDEN", "RHO"],
            CurveRole::Nphi => &["NPHI", "TNPH", "NPOR", "CNC", "PHIN", "NEU"],
            CurveRole::Rt => &["RT", "ILD", "LLD", "RDEP", "RES_DEEP", "AT90", "RILD", "RD"],
            CurveRole::Dt => &["DT", "DTC", "DTCO", "AC", "SONIC"],
            CurveRole::Sp => &["SP"],
            CurveRole::Cali => &["CALI", "CAL", "HCAL", "C1"],
            CurveRole::Pe => &["PE", "PEF", "PEFZ"],
            CurveRole::Phie => &["PHIE", "PHI_E", "EPOR", "PHIT"],
            CurveRole::Sw => &["SW", "SWE", "SWT", "SUWI"],
            CurveRole::Vsh => &["VSH", "VSHALE", "VCL", "VCLAY"],
            CurveRole::Perm => &["PERM", "KLOG", "K_PERM", "PERM_CALC"],
        }
    }

    /// Role whose aliases match a single mnemonic, case-insensitive.
    ///
    /// Exact alias matches across all roles win over prefix matches, so `PERM`
    /// resolves to [`CurveRole::Perm`] rather than prefix-matching `PE`.
    pub fn for_mnemonic(mnemonic: &str) -> Option<CurveRole> {
        let upper = mnemonic.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|role| role.aliases().iter().any(|alias| *alias == upper))
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|role| role.aliases().iter().any(|alias| alias_matches(alias, &upper)))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CurveRole::Depth => "DEPTH",
            CurveRole::Gr => "GR",
            CurveRole::Rhob => "RHOB",
            CurveRole::Nphi => "NPHI",
            CurveRole::Rt => "RT",
            CurveRole::Dt => "DT",
            CurveRole::Sp => "SP",
            CurveRole::Cali => "CALI",
            CurveRole::Pe => "PE",
            CurveRole::Phie => "PHIE",
            CurveRole::Sw => "SW",
            CurveRole::Vsh => "VSH",
            CurveRole::Perm => "PERM",
        }
    }

    pub fn parse(role: &str) -> Option<CurveRole> {
        let upper = role.trim().to_uppercase();
        Self::ALL.into_iter().find(|r| r.as_str() == upper)
    }
}

impl std::fmt::Display for CurveRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Case-insensitive exact-or-prefix match; `mnemonic_upper` must already be upper case.
pub fn alias_matches(alias: &str, mnemonic_upper: &str) -> bool {
    mnemonic_upper == alias || mnemonic_upper.starts_with(alias)
}

/// Role -> mnemonic assignment.
///
/// A role missing from the map is unmapped; there is no "mapped to nothing" state.
/// Serializes as a flat `{"DEPTH": "DEPT", "GR": "GR"}` object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveMap {
    entries: BTreeMap<CurveRole, String>,
}

impl CurveMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: CurveRole) -> Option<&str> {
        self.entries.get(&role).map(String::as_str)
    }

    pub fn is_mapped(&self, role: CurveRole) -> bool {
        self.entries.contains_key(&role)
    }

    /// Assign a mnemonic, returning the new map
    pub fn with(&self, role: CurveRole, mnemonic: impl Into<String>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(role, mnemonic.into());
        Self { entries }
    }

    pub fn insert(&mut self, role: CurveRole, mnemonic: impl Into<String>) {
        self.entries.insert(role, mnemonic.into());
    }

    pub fn remove(&mut self, role: CurveRole) -> Option<String> {
        self.entries.remove(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CurveRole, &str)> {
        self.entries.iter().map(|(r, m)| (*r, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat role-string -> mnemonic-string form used by external collaborators
    pub fn to_flat(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(r, m)| (r.as_str().to_string(), m.clone()))
            .collect()
    }

    /// Build from the flat form. Unknown role keys and empty mnemonics are skipped.
    pub fn from_flat<'a>(flat: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = flat
            .into_iter()
            .filter(|(_, mnemonic)| !mnemonic.trim().is_empty())
            .filter_map(|(role, mnemonic)| {
                CurveRole::parse(role).map(|r| (r, mnemonic.trim().to_string()))
            })
            .collect();
        Self { entries }
    }
}
