//! The rule-evaluation tick.
//!
//! [`SimulationEngine::update`] advances the simulation by one generation in
//! three phases:
//!
//! 1. **Evaluate** -- every position is judged against the unmodified
//!    current grid: live cells outside the survival range are marked for
//!    death, empty positions inside the birth range are marked for birth.
//! 2. **Reconcile** -- marked cells are removed, then newborns are placed
//!    with fresh state (energy 1.0, age 0).
//! 3. **Maintain** -- every live cell, newborns included, goes through the
//!    vital maintenance roll: attrition, energy restore, ageing.
//!
//! Phase 1 never writes, so the outcome is independent of scan order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smartlife_cells::{DeathCause, death, vitals};
use smartlife_types::Position;
use tracing::debug;

use crate::engine::SimulationEngine;
use crate::error::EngineError;

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Tick number after this tick completed.
    pub tick: u64,
    /// Cells born by the birth rule.
    pub births: usize,
    /// Deaths grouped by cause.
    pub deaths: BTreeMap<DeathCause, usize>,
    /// Cells whose energy restore roll succeeded.
    pub restored: usize,
    /// Live cells at the end of the tick.
    pub population: usize,
}

impl TickSummary {
    /// Total deaths across all causes.
    pub fn total_deaths(&self) -> usize {
        self.deaths.values().fold(0_usize, |acc, n| acc.saturating_add(*n))
    }

    /// Record one death from `cause`.
    pub(crate) fn record_death(&mut self, cause: DeathCause) {
        let count = self.deaths.entry(cause).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Fold the counts of `later` into `self`, taking its tick number and
    /// population.
    pub(crate) fn absorb(&mut self, later: Self) {
        self.births = self.births.saturating_add(later.births);
        self.restored = self.restored.saturating_add(later.restored);
        for (cause, n) in later.deaths {
            let count = self.deaths.entry(cause).or_insert(0);
            *count = count.saturating_add(n);
        }
        self.tick = later.tick;
        self.population = later.population;
    }
}

impl SimulationEngine {
    /// Advance the simulation by one synchronous generation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cell`] if a cell counter overflows or the
    /// arena cannot grow. The grid may then be partially reconciled.
    pub fn update(&mut self) -> Result<TickSummary, EngineError> {
        let rules = self.rules;
        let mut summary = TickSummary::default();

        // Phase 1: evaluate against the untouched grid.
        let mut doomed: Vec<(Position, DeathCause)> = Vec::new();
        let mut newborn: Vec<Position> = Vec::new();
        for position in self.grid.positions() {
            let neighbors = self.grid.live_neighbors(position);
            if self.grid.is_occupied(position) {
                if let Some(cause) =
                    death::rule_death(neighbors, rules.survival_min, rules.survival_max)
                {
                    doomed.push((position, cause));
                }
            } else if rules.is_born(neighbors) {
                newborn.push(position);
            }
        }

        // Phase 2: reconcile.
        for (position, cause) in doomed {
            if self.remove_cell(position).is_some() {
                summary.record_death(cause);
            }
        }
        for position in newborn {
            self.spawn(position)?;
            summary.births = summary.births.saturating_add(1);
        }

        // Phase 3: maintenance.
        let vitals_config = rules.vitals();
        for slot in self.cells.slot_ids() {
            let Some(cell) = self.cells.get_mut(slot) else {
                continue;
            };
            let result = vitals::apply_maintenance_tick(cell, &vitals_config, &mut self.rng)?;
            let position = cell.position();
            if result.restored {
                summary.restored = summary.restored.saturating_add(1);
            }
            if let Some(cause) = result.death {
                self.remove_slot(slot, position);
                summary.record_death(cause);
            }
        }

        self.tick = self.tick.saturating_add(1);
        summary.tick = self.tick;
        summary.population = self.cells.len();

        debug!(
            tick = summary.tick,
            births = summary.births,
            deaths = summary.total_deaths(),
            restored = summary.restored,
            population = summary.population,
            "tick complete"
        );
        Ok(summary)
    }
}
