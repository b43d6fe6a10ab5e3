//! Monte Carlo Integration Tests
//!
//! Inputs loaded the way the CLI loads them (TOML tables tagged by `type`),
//! then run through the sequential and parallel engines.

use petro_engine::reservoir::recoverable_volume;
use petro_engine::simulation::{run_monte_carlo, run_parallel, run_with_rng, SimulationError};
use petro_engine::types::{
    FluidType, InputDistribution, McVariable, MonteCarloInputs, VolumetricDraw,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const INPUTS_TOML: &str = r#"
iterations = 4000
fluid_type = "oil"

[area]
type = "triangular"
min = 10.0
mode = 20.0
max = 100.0

[thickness]
type = "uniform"
min = 40.0
max = 60.0

[ntg]
type = "constant"
value = 0.8

[phi]
type = "normal"
mean = 0.2
std_dev = 0.02

[sw]
type = "constant"
value = 0.3

[fvf]
type = "constant"
value = 1.2

[rf]
type = "constant"
value = 0.3
"#;

fn inputs() -> MonteCarloInputs {
    toml::from_str(INPUTS_TOML).unwrap()
}

#[test]
fn inputs_deserialize_from_tagged_tables() {
    let inputs = inputs();
    assert_eq!(inputs.iterations, 4000);
    assert_eq!(inputs.fluid_type, FluidType::Oil);
    assert_eq!(
        inputs.area,
        InputDistribution::Triangular { min: 10.0, mode: 20.0, max: 100.0 }
    );
    assert!(inputs.ntg.is_constant());
}

#[test]
fn reserves_convention_ordering_for_skewed_area() {
    let result = run_monte_carlo(&inputs(), 2024).unwrap();
    let s = result.stats;
    assert!(s.p90 < s.p50 && s.p50 < s.p10, "{s:?}");
    assert!(s.mean > s.p50, "right skew should lift the mean above P50");
    assert_eq!(result.histogram.len(), 4000);
    assert!(result.histogram.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn sensitivity_ranks_area_first() {
    let result = run_monte_carlo(&inputs(), 1).unwrap();
    let vars: Vec<McVariable> = result.sensitivity.iter().map(|i| i.variable).collect();
    assert_eq!(vars.len(), 3);
    assert_eq!(vars[0], McVariable::Area);
    assert!(vars.contains(&McVariable::Thickness));
    assert!(vars.contains(&McVariable::Phi));
    assert!(result.sensitivity.iter().all(|i| i.low <= i.high));
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = run_monte_carlo(&inputs(), 77).unwrap();
    let b = run_with_rng(&inputs(), &mut StdRng::seed_from_u64(77)).unwrap();
    assert_eq!(a, b);

    let p1 = run_parallel(&inputs(), 77).unwrap();
    let p2 = run_parallel(&inputs(), 77).unwrap();
    assert_eq!(p1, p2);
}

#[test]
fn parallel_and_sequential_agree_statistically() {
    let seq = run_monte_carlo(&inputs(), 3).unwrap().stats;
    let par = run_parallel(&inputs(), 3).unwrap().stats;
    assert!((seq.p50 - par.p50).abs() / seq.p50 < 0.1, "{seq:?} vs {par:?}");
    assert!((seq.mean - par.mean).abs() / seq.mean < 0.1);
}

#[test]
fn constant_inputs_collapse_to_deterministic_volumetrics() {
    let c = |value| InputDistribution::Constant { value };
    let inputs = MonteCarloInputs {
        area: c(640.0),
        thickness: c(30.0),
        ntg: c(0.7),
        phi: c(0.18),
        sw: c(0.35),
        fvf: c(0.004),
        rf: c(0.65),
        iterations: 250,
        fluid_type: FluidType::Gas,
    };
    let expected = recoverable_volume(
        &VolumetricDraw {
            area: 640.0,
            thickness: 30.0,
            ntg: 0.7,
            phi: 0.18,
            sw: 0.35,
            fvf: 0.004,
            rf: 0.65,
        },
        FluidType::Gas,
    );
    let s = run_parallel(&inputs, 9).unwrap().stats;
    assert_eq!(s.p90, expected);
    assert_eq!(s.p50, expected);
    assert_eq!(s.p10, expected);
    assert!((s.mean - expected).abs() / expected < 1e-12);
}

#[test]
fn invalid_inputs_are_rejected() {
    let mut bad = inputs();
    bad.iterations = 0;
    assert_eq!(run_monte_carlo(&bad, 1), Err(SimulationError::ZeroIterations));

    let mut bad = inputs();
    bad.phi = InputDistribution::Normal { mean: 0.2, std_dev: f64::NAN };
    assert!(matches!(
        run_parallel(&bad, 1),
        Err(SimulationError::InvalidDistribution { variable: McVariable::Phi, .. })
    ));
}
