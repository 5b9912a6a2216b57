//! Episode loop for headless runs.
//!
//! Each episode reseeds the engine, then steps it with the configured
//! [`MovePolicy`] until the population dies out, saturates the grid, or
//! the step limit is reached.

use rand::Rng;
use serde::Serialize;
use smartlife_core::SimulationEngine;
use smartlife_core::episode::{self, EndReason};
use tracing::{debug, info};

use crate::error::RunnerError;
use crate::policy::MovePolicy;

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEnd {
    /// The engine reported a terminal state.
    Terminal(EndReason),
    /// The step limit was reached first.
    StepLimit,
}

impl core::fmt::Display for EpisodeEnd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Terminal(reason) => write!(f, "{reason}"),
            Self::StepLimit => write!(f, "step_limit"),
        }
    }
}

/// Metrics for one finished episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeReport {
    /// Zero-based episode number.
    pub episode: u32,
    /// Cells actually placed by seeding.
    pub seeded: usize,
    /// Steps run.
    pub steps: u32,
    /// Sum of step rewards.
    pub total_reward: f64,
    /// Population after the last step.
    pub population: usize,
    /// Occupancy ratio after the last step.
    pub density: f64,
    /// Component density after the last step.
    pub component_density: f64,
    /// Why the episode stopped.
    pub end: EpisodeEnd,
}

/// Run one episode on `engine`.
///
/// # Errors
///
/// Returns [`RunnerError::Engine`] if seeding or a tick fails.
pub fn run_episode(
    engine: &mut SimulationEngine,
    episode_number: u32,
    initial_count: usize,
    max_steps: u32,
    policy: MovePolicy,
    rng: &mut impl Rng,
) -> Result<EpisodeReport, RunnerError> {
    episode::reset(engine, initial_count)?;
    let seeded = engine.population();

    let mut report = EpisodeReport {
        episode: episode_number,
        seeded,
        steps: 0,
        total_reward: 0.0,
        population: seeded,
        density: engine.density(),
        component_density: engine.component_density(),
        end: EpisodeEnd::StepLimit,
    };

    for step in 0..max_steps {
        let moves = policy.choose(engine.population(), rng);
        let outcome = episode::step(engine, moves.as_deref(), step)?;

        report.steps = step.saturating_add(1);
        report.total_reward += outcome.reward;
        report.population = outcome.population;
        report.density = outcome.density;
        report.component_density = outcome.component_density;

        debug!(
            episode = episode_number,
            step,
            population = outcome.population,
            births = outcome.summary.births,
            deaths = outcome.summary.total_deaths(),
            reward = outcome.reward,
            "step"
        );

        if let Some(reason) = outcome.end {
            report.end = EpisodeEnd::Terminal(reason);
            break;
        }
    }

    info!(
        episode = report.episode,
        seeded = report.seeded,
        steps = report.steps,
        population = report.population,
        density = report.density,
        component_density = report.component_density,
        total_reward = report.total_reward,
        end = %report.end,
        "episode finished"
    );
    Ok(report)
}
