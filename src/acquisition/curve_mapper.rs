//! Curve Mapper - assigns canonical roles to dataset mnemonics
//!
//! Vendors name the same measurement differently (`GR`, `SGR`, `GRC`; `RT`,
//! `ILD`, `LLD`, `AT90`). For each role the ranked alias list is scanned in
//! order and, for each alias, the dataset mnemonics in curve order; the first
//! case-insensitive exact-or-prefix hit wins. Roles with no hit are left out.

use tracing::debug;

use crate::types::{alias_matches, CurveMap, CurveRole, LogDataset};

/// Best mnemonic for one role, if any alias matches.
pub fn map_role<'a>(role: CurveRole, mnemonics: &[&'a str]) -> Option<&'a str> {
    let upper: Vec<String> = mnemonics.iter().map(|m| m.trim().to_uppercase()).collect();
    role.aliases().iter().find_map(|alias| {
        upper
            .iter()
            .position(|m| alias_matches(alias, m))
            .map(|idx| mnemonics[idx])
    })
}

/// Map every canonical role against a list of mnemonics.
pub fn map_mnemonics(mnemonics: &[&str]) -> CurveMap {
    let mut map = CurveMap::new();
    for role in CurveRole::ALL {
        if let Some(mnemonic) = map_role(role, mnemonics) {
            map.insert(role, mnemonic);
        }
    }
    map
}

/// Map every canonical role against the dataset's curves.
pub fn map_curves(dataset: &LogDataset) -> CurveMap {
    let mnemonics: Vec<&str> = dataset.mnemonics().collect();
    let map = map_mnemonics(&mnemonics);
    debug!(
        curves = mnemonics.len(),
        mapped = map.len(),
        map = ?map.to_flat(),
        "Mapped curves to roles"
    );
    map
}
