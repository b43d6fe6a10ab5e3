//! Engine Configuration Module
//!
//! Per-deployment configuration loaded from TOML, exposing the interpretation
//! parameters, cutoffs and scoring weights as operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `PETRO_CONFIG` environment variable (path to TOML file)
//! 2. `petro.toml` in the current working directory
//! 3. Built-in defaults (matching `config::defaults`)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! config::init(EngineConfig::load());
//!
//! let cutoffs = config::get().cutoffs;
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;

use std::sync::OnceLock;

/// Global engine configuration, initialized once at startup.
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Initialize the global engine configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: EngineConfig) {
    if ENGINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global engine configuration.
///
/// Library callers that never call `init()` get the built-in defaults, which
/// are then locked in for the rest of the process.
pub fn get() -> &'static EngineConfig {
    ENGINE_CONFIG.get_or_init(EngineConfig::default)
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    ENGINE_CONFIG.get().is_some()
}
