//! Episode stepping for learning agents.
//!
//! Wraps the engine in a reset/step loop: [`reset`] seeds the grid and
//! returns the first observations, [`step`] runs one tick and scores it.
//!
//! The reward favours a large population whose component density stays
//! inside both rule windows, plus a small per-step survival bonus:
//!
//! ```text
//! reward = pop/area + 0.1
//!        - 0.1  if cd <= (survival_min - 1)/8 or cd >= (survival_max + 1)/8
//!        - 0.1  if cd <= (birth_min - 1)/8    or cd >= (birth_max + 1)/8
//!        + 0.002 * step
//!        + 2 * pop/area  at step 500
//! ```
//!
//! An episode is done when the population dies out or fills 80% of the
//! grid.

use serde::{Deserialize, Serialize};
use smartlife_world::ratio;

use crate::engine::SimulationEngine;
use crate::error::EngineError;
use crate::rules::RuleConfig;
use crate::tick::TickSummary;

/// Number of movement actions (the eight directions plus "stay").
pub const ACTION_SIZE: usize = 9;

/// Fraction of the grid at which an episode ends as saturated.
pub const SATURATION_RATIO: f64 = 0.8;

/// Step at which the population bonus is paid.
pub const BONUS_STEP: u32 = 500;

/// Flat bonus added to every reward before density penalties.
const BASE_BONUS: f64 = 0.1;

/// Penalty per violated density window.
const WINDOW_PENALTY: f64 = 0.1;

/// Reward per elapsed step.
const STEP_BONUS: f64 = 0.002;

/// Multiplier on the occupancy ratio at [`BONUS_STEP`].
const MILESTONE_MULTIPLIER: f64 = 2.0;

/// Number of movement actions.
pub const fn action_size() -> usize {
    ACTION_SIZE
}

/// Length of one observation vector under `rules`.
pub fn state_size(rules: &RuleConfig) -> usize {
    rules.window_len()
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// No live cells remain.
    Extinct,
    /// Live cells cover at least [`SATURATION_RATIO`] of the grid.
    Saturated,
}

impl core::fmt::Display for EndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Extinct => write!(f, "extinct"),
            Self::Saturated => write!(f, "saturated"),
        }
    }
}

/// The result of one [`step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Observations after the tick, one vector per live cell.
    pub observations: Vec<Vec<f32>>,
    /// Live cells after the tick.
    pub population: usize,
    /// `population / area`.
    pub density: f64,
    /// Mean component density.
    pub component_density: f64,
    /// Score for this step.
    pub reward: f64,
    /// Set when the episode is over.
    pub end: Option<EndReason>,
    /// Tick bookkeeping.
    pub summary: TickSummary,
}

impl StepOutcome {
    /// Whether the episode is over.
    pub const fn done(&self) -> bool {
        self.end.is_some()
    }
}

/// Seed the engine with up to `count` random cells and return the first
/// observations.
///
/// # Errors
///
/// Propagates [`SimulationEngine::initialize_random`] failures.
pub fn reset(engine: &mut SimulationEngine, count: usize) -> Result<Vec<Vec<f32>>, EngineError> {
    engine.initialize_random(count)?;
    Ok(engine.cell_states())
}

/// Run one tick, with moves if given, and score the result.
///
/// `step` is the caller's step counter within the episode.
///
/// # Errors
///
/// Propagates [`SimulationEngine::update`] and
/// [`SimulationEngine::update_with_moves`] failures.
pub fn step(
    engine: &mut SimulationEngine,
    moves: Option<&[i32]>,
    step: u32,
) -> Result<StepOutcome, EngineError> {
    let summary = match moves {
        Some(moves) => engine.update_with_moves(moves)?,
        None => engine.update()?,
    };

    let area = usize::try_from(engine.width())
        .unwrap_or(0)
        .saturating_mul(usize::try_from(engine.height()).unwrap_or(0));
    let population = engine.population();
    let component_density = engine.component_density();

    Ok(StepOutcome {
        observations: engine.cell_states(),
        population,
        density: engine.density(),
        component_density,
        reward: reward(population, area, component_density, engine.rules(), step),
        end: end_reason(population, area),
        summary,
    })
}

/// Score one step.
pub fn reward(
    population: usize,
    area: usize,
    component_density: f64,
    rules: &RuleConfig,
    step: u32,
) -> f64 {
    let occupancy = ratio(population, area);
    let mut reward = occupancy + BASE_BONUS;

    if outside_window(component_density, rules.survival_min, rules.survival_max) {
        reward -= WINDOW_PENALTY;
    }
    if outside_window(component_density, rules.birth_min, rules.birth_max) {
        reward -= WINDOW_PENALTY;
    }

    reward += STEP_BONUS * f64::from(step);

    if step == BONUS_STEP {
        reward += MILESTONE_MULTIPLIER * occupancy;
    }
    reward
}

/// Whether the episode is over, and why.
pub fn end_reason(population: usize, area: usize) -> Option<EndReason> {
    if population == 0 {
        Some(EndReason::Extinct)
    } else if ratio(population, area) >= SATURATION_RATIO {
        Some(EndReason::Saturated)
    } else {
        None
    }
}

/// Whether `density` falls outside the open neighbour-count window
/// `((min - 1)/8, (max + 1)/8)`.
fn outside_window(density: f64, min: i32, max: i32) -> bool {
    let low = (f64::from(min) - 1.0) / 8.0;
    let high = (f64::from(max) + 1.0) / 8.0;
    density <= low || density >= high
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use smartlife_types::Position;

    use super::*;
    use crate::config::KeyValueStore;

    const EPS: f64 = 1e-12;

    #[test]
    fn sizes() {
        assert_eq!(action_size(), 9);
        assert_eq!(state_size(&RuleConfig::default()), 121);
    }

    #[test]
    fn reward_inside_both_windows() {
        // Default rules: windows (1/8, 4/8) and (2/8, 4/8).
        let r = reward(10, 100, 0.3, &RuleConfig::default(), 0);
        assert!((r - 0.2).abs() < EPS);
    }

    #[test]
    fn reward_penalises_each_violated_window() {
        let rules = RuleConfig::default();
        // Below the birth window only.
        let r = reward(10, 100, 0.2, &rules, 0);
        assert!((r - 0.1).abs() < EPS);
        // Above both windows.
        let r = reward(10, 100, 1.0, &rules, 0);
        assert!(r.abs() < EPS);
    }

    #[test]
    fn reward_grows_with_step_and_pays_milestone() {
        let rules = RuleConfig::default();
        let r = reward(10, 100, 0.3, &rules, 100);
        assert!((r - 0.4).abs() < EPS);
        let r = reward(10, 100, 0.3, &rules, BONUS_STEP);
        assert!((r - (0.2 + 1.0 + 0.2)).abs() < EPS);
    }

    #[test]
    fn done_on_extinction_or_saturation() {
        assert_eq!(end_reason(0, 100), Some(EndReason::Extinct));
        assert_eq!(end_reason(79, 100), None);
        assert_eq!(end_reason(80, 100), Some(EndReason::Saturated));
    }

    #[test]
    fn step_scores_the_engine() {
        let rules = RuleConfig {
            restore_probability: 0.0,
            ..RuleConfig::default()
        };
        let mut engine =
            SimulationEngine::with_seed(10, 10, Box::new(KeyValueStore::from(&rules)), 2).unwrap();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            engine.place_cell(Position::new(x, y)).unwrap();
        }
        let outcome = step(&mut engine, None, 0).unwrap();
        assert_eq!(outcome.population, 4);
        assert_eq!(outcome.component_density, 1.0);
        assert!(!outcome.done());
        assert_eq!(outcome.observations.len(), 4);
        // Block density 1.0 is above both windows: 0.04 + 0.1 - 0.2.
        assert!((outcome.reward + 0.06).abs() < EPS);
    }

    #[test]
    fn reset_returns_one_observation_per_cell() {
        let mut engine =
            SimulationEngine::with_seed(10, 10, Box::new(KeyValueStore::in_memory()), 2).unwrap();
        let observations = reset(&mut engine, 12).unwrap();
        assert_eq!(observations.len(), 12);
    }
}
