//! Physical plausibility ranges per curve family
//!
//! Soft ranges cover normal formation response; hard ranges cover anything a
//! working tool could record. Values outside hard are treated as bad data.

use crate::types::{CurveRole, HeaderItem, QcFlag, QcSection, Severity};

/// Closed interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBounds {
    pub soft: Range,
    pub hard: Range,
}

const fn bounds(soft: (f64, f64), hard: (f64, f64)) -> CurveBounds {
    CurveBounds {
        soft: Range::new(soft.0, soft.1),
        hard: Range::new(hard.0, hard.1),
    }
}

/// Bounds for a role. Depth has none.
pub fn role_bounds(role: CurveRole) -> Option<CurveBounds> {
    let b = match role {
        CurveRole::Depth => return None,
        CurveRole::Gr => bounds((0.0, 200.0), (-10.0, 500.0)),
        CurveRole::Rhob => bounds((1.5, 3.0), (1.0, 3.5)),
        // Fraction; see `curve_bounds` for percent units
        CurveRole::Nphi => bounds((-0.05, 0.6), (-0.15, 1.0)),
        CurveRole::Rt => bounds((0.1, 2000.0), (0.01, 100_000.0)),
        CurveRole::Dt => bounds((40.0, 200.0), (30.0, 250.0)),
        CurveRole::Sp => bounds((-200.0, 100.0), (-500.0, 500.0)),
        CurveRole::Cali => bounds((4.0, 20.0), (2.0, 40.0)),
        CurveRole::Pe => bounds((1.0, 7.0), (0.0, 15.0)),
        CurveRole::Phie => bounds((0.0, 0.45), (0.0, 0.6)),
        CurveRole::Sw | CurveRole::Vsh => bounds((0.0, 1.0), (0.0, 1.0)),
        CurveRole::Perm => bounds((0.01, 10_000.0), (0.0, 100_000.0)),
    };
    Some(b)
}

/// Bounds for a curve, chosen by mnemonic family.
///
/// Neutron porosity logged in percent (unit `%` or `PU`) gets ranges × 100.
pub fn curve_bounds(curve: &HeaderItem) -> Option<CurveBounds> {
    let role = CurveRole::for_mnemonic(&curve.mnemonic)?;
    let b = role_bounds(role)?;
    let unit = curve.unit.trim();
    if role == CurveRole::Nphi && (unit.contains('%') || unit.eq_ignore_ascii_case("PU")) {
        return Some(CurveBounds {
            soft: b.soft.scaled(100.0),
            hard: b.hard.scaled(100.0),
        });
    }
    Some(b)
}

/// At most one flag per curve: critical if any value is beyond hard bounds,
/// else warning if any is beyond soft bounds.
pub fn check_bounds(mnemonic: &str, values: &[f64], b: &CurveBounds) -> Option<QcFlag> {
    let beyond_hard = values.iter().filter(|v| !b.hard.contains(**v)).count();
    if beyond_hard > 0 {
        return Some(QcFlag::new(
            Severity::Critical,
            QcSection::PhysicsBounds,
            format!(
                "{mnemonic}: {beyond_hard} value(s) outside hard range [{}, {}]",
                b.hard.min, b.hard.max
            ),
        ));
    }
    let beyond_soft = values.iter().filter(|v| !b.soft.contains(**v)).count();
    (beyond_soft > 0).then(|| {
        QcFlag::new(
            Severity::Warning,
            QcSection::PhysicsBounds,
            format!(
                "{mnemonic}: {beyond_soft} value(s) outside typical range [{}, {}]",
                b.soft.min, b.soft.max
            ),
        )
    })
}
