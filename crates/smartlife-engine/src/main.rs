//! Headless runner for the Smart Life simulation.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load the run config from `smartlife.yaml` or `$SMARTLIFE_CONFIG`
//! 3. Load the `KEY = VALUE` rules file, writing the default template if
//!    it does not exist
//! 4. Create the engine
//! 5. Run the configured episodes, logging per-episode metrics
//! 6. Log a run summary

mod error;
mod policy;
mod run_config;
mod session;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use smartlife_core::{ConfigSource, KeyValueStore, SimulationEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;
use crate::run_config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, RunConfig};

/// Grid dimension used when neither the run config nor the rules file
/// names one.
const DEFAULT_DIMENSION: i32 = 100;

/// Application entry point for the runner.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the engine fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("smartlife-engine starting");

    // 2. Load run configuration.
    let config = load_run_config()?;
    info!(
        rules_file = %config.rules_file.display(),
        episodes = config.episodes,
        max_steps = config.max_steps,
        initial_fill = config.initial_fill,
        policy = %config.policy,
        seed = ?config.seed,
        "Run configuration loaded"
    );

    // 3. Load rules.
    let rules_store = KeyValueStore::load_or_create(&config.rules_file)?;
    info!(
        path = ?rules_store.path(),
        keys = rules_store.keys().count(),
        "Rules file loaded"
    );
    let width = config
        .width
        .unwrap_or_else(|| rules_store.get_int("ENV_WIDTH", DEFAULT_DIMENSION));
    let height = config
        .height
        .unwrap_or_else(|| rules_store.get_int("ENV_HEIGHT", DEFAULT_DIMENSION));

    // 4. Create the engine.
    let engine_result = match config.seed {
        Some(seed) => SimulationEngine::with_seed(width, height, Box::new(rules_store), seed),
        None => SimulationEngine::new(width, height, Box::new(rules_store)),
    };
    let mut engine = engine_result.map_err(RunnerError::from)?;
    info!(width, height, "Engine ready");
    info!("Active rules:\n{}", engine.rules());

    let mut policy_rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(1)),
        None => SmallRng::from_os_rng(),
    };

    // 5. Run episodes.
    let initial_count = config.initial_count(width, height);
    let mut best_reward = f64::NEG_INFINITY;
    for episode in 0..config.episodes {
        let report = session::run_episode(
            &mut engine,
            episode,
            initial_count,
            config.max_steps,
            config.policy,
            &mut policy_rng,
        )?;
        best_reward = best_reward.max(report.total_reward);
        info!(report = %serde_json::to_string(&report)?, "episode report");
    }

    // 6. Summary.
    info!(
        episodes = config.episodes,
        best_reward,
        "smartlife-engine finished"
    );
    Ok(())
}

/// Load the run config from `$SMARTLIFE_CONFIG` or `smartlife.yaml`.
///
/// A missing file means defaults.
fn load_run_config() -> Result<RunConfig, RunnerError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        RunConfig::from_file(&path)
    } else {
        info!(path = %path.display(), "Run config not found, using defaults");
        Ok(RunConfig::default())
    }
}
