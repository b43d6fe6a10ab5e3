//! petro - command-line front end for the petrophysical engine
//!
//! # Usage
//!
//! ```bash
//! # Quality-control report for a LAS file
//! petro qc well.las --well-id 15/9-F-11
//!
//! # Interpret logs, aggregate a zone and estimate volumes
//! petro interpret well.las --top 2500 --base 2600 --area 640 --fluid oil --rf 0.3
//!
//! # Monte Carlo reserves from a TOML inputs file
//! petro simulate inputs.toml --seed 42 --parallel
//! ```
//!
//! Results are written to stdout as JSON; logs go to stderr.
//!
//! # Environment Variables
//!
//! - `PETRO_CONFIG`: Engine config TOML (overridden by `--config`)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use petro_engine::config::{self, EngineConfig};
use petro_engine::types::{
    CurveMap, CurveRole, FluidType, LogDataset, MonteCarloInputs, VolumetricParameters,
    VolumetricResult, ZonalStats,
};
use petro_engine::{acquisition, physics_engine, qc, reservoir, simulation};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "petro")]
#[command(about = "Petrophysical log interpretation and reserves estimation")]
#[command(version)]
struct CliArgs {
    /// Engine configuration TOML (cutoffs, interpretation parameters, QC weights)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Quality-control report for a LAS file
    Qc {
        /// LAS file to check
        las: PathBuf,
        /// Well identifier for the report (default: ~WELL name)
        #[arg(long)]
        well_id: Option<String>,
    },

    /// Derive VSH/PHIE/SW/PERM curves, aggregate a zone and run volumetrics
    Interpret {
        /// LAS file to interpret
        las: PathBuf,
        /// Zone top depth (default: first sample)
        #[arg(long)]
        top: Option<f64>,
        /// Zone base depth (default: last sample)
        #[arg(long)]
        base: Option<f64>,
        /// Drainage area in acres; volumetrics are skipped without it
        #[arg(long)]
        area: Option<f64>,
        /// Reservoir fluid
        #[arg(long, default_value = "oil")]
        fluid: FluidType,
        /// Recovery factor (fraction)
        #[arg(long, default_value = "0.3")]
        rf: f64,
    },

    /// Monte Carlo reserves from a TOML file of input distributions
    Simulate {
        /// Inputs TOML ([area], [thickness], ... tables with a `type` key)
        inputs: PathBuf,
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Override the iteration count
        #[arg(long)]
        iterations: Option<usize>,
        /// Spread iterations across all cores
        #[arg(long)]
        parallel: bool,
    },
}

// ============================================================================
// Output records
// ============================================================================

#[derive(Serialize)]
struct InterpretReport {
    well: Option<String>,
    curve_map: CurveMap,
    dropped_rows: usize,
    top: f64,
    base: f64,
    zonal_stats: Option<ZonalStats>,
    volumetrics: Option<VolumetricResult>,
}

// ============================================================================
// Commands
// ============================================================================

fn read_las(path: &Path) -> Result<LogDataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read LAS file {}", path.display()))?;
    let dataset = acquisition::try_parse_las(&text)
        .with_context(|| format!("Failed to parse LAS file {}", path.display()))?;
    if dataset.dropped_rows > 0 {
        warn!(
            dropped_rows = dataset.dropped_rows,
            "Some data rows did not match the curve count and were skipped"
        );
    }
    Ok(dataset)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn run_qc(las: &Path, well_id: Option<&str>) -> Result<()> {
    let dataset = read_las(las)?;
    let map = acquisition::map_curves(&dataset);
    let report = qc::analyze(&dataset, &map, well_id);
    print_json(&report)
}

fn run_interpret(
    las: &Path,
    top: Option<f64>,
    base: Option<f64>,
    area: Option<f64>,
    fluid: FluidType,
    rf: f64,
) -> Result<()> {
    let cfg = config::get();
    let dataset = read_las(las)?;
    let map = acquisition::map_curves(&dataset);
    let interp = physics_engine::run_interpretation(&dataset, &map, &cfg.interpretation)
        .context("Failed to append derived curves")?;

    let depths: Vec<f64> = interp
        .curve_map
        .get(CurveRole::Depth)
        .map(|m| interp.dataset.column(m).into_iter().flatten().collect())
        .unwrap_or_default();
    let (Some(first), Some(last)) = (depths.first(), depths.last()) else {
        bail!("No depth curve found in {}", las.display());
    };
    let top = top.unwrap_or(*first);
    let base = base.unwrap_or(*last);

    let zonal_stats =
        reservoir::compute_zonal_stats(&interp.dataset, &interp.curve_map, top, base, &cfg.cutoffs);
    if zonal_stats.is_none() {
        warn!(top, base, "Zone could not be evaluated");
    }

    let volumetrics = match (zonal_stats.as_ref(), area) {
        (Some(stats), Some(area_acres)) => Some(reservoir::calculate_volumetrics(
            stats,
            &VolumetricParameters {
                area_acres,
                recovery_factor: rf,
                fluid_type: fluid,
                bo: None,
                bg: None,
            },
        )),
        _ => None,
    };

    print_json(&InterpretReport {
        well: interp.dataset.well_name().map(str::to_string),
        curve_map: interp.curve_map.clone(),
        dropped_rows: interp.dataset.dropped_rows,
        top,
        base,
        zonal_stats,
        volumetrics,
    })
}

fn run_simulate(path: &Path, seed: u64, iterations: Option<usize>, parallel: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inputs {}", path.display()))?;
    let table: toml::Table = toml::from_str(&text)
        .with_context(|| format!("Invalid TOML in {}", path.display()))?;
    let explicit_iterations = table.contains_key("iterations");
    let mut inputs: MonteCarloInputs = table
        .try_into()
        .with_context(|| format!("Invalid Monte Carlo inputs in {}", path.display()))?;

    // --iterations, then the file, then [monte_carlo] default_iterations
    match iterations {
        Some(n) => inputs.iterations = n,
        None if !explicit_iterations => {
            inputs.iterations = config::get().monte_carlo.default_iterations;
        }
        None => {}
    }

    info!(iterations = inputs.iterations, seed, parallel, "Running Monte Carlo");
    let result = if parallel {
        simulation::run_parallel(&inputs, seed)
    } else {
        simulation::run_monte_carlo(&inputs, seed)
    }
    .context("Monte Carlo simulation failed")?;

    print_json(&result)
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(EngineConfig::load()),
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    config::init(load_config(args.config.as_deref())?);

    match args.command {
        SubCommand::Qc { las, well_id } => run_qc(&las, well_id.as_deref()),
        SubCommand::Interpret {
            las,
            top,
            base,
            area,
            fluid,
            rf,
        } => run_interpret(&las, top, base, area, fluid, rf),
        SubCommand::Simulate {
            inputs,
            seed,
            iterations,
            parallel,
        } => run_simulate(&inputs, seed, iterations, parallel),
    }
}
