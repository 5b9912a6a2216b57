//! Directed movement with same-destination conflict resolution.
//!
//! [`SimulationEngine::update_with_moves`] takes one direction code per live
//! cell, in live-cell order, and runs a movement tick:
//!
//! 1. **Propose** -- each code is turned into a target position against the
//!    pre-move grid. A target that is off-grid or already occupied in that
//!    snapshot is dropped and the cell stays put. Cells therefore never
//!    follow each other into a position vacated in the same tick.
//! 2. **Resolve** -- proposals sharing a target are settled by
//!    [`resolve_conflicts`]: the highest pre-move energy wins, ties go to
//!    the earliest move index, every loser is removed.
//! 3. **Relocate** -- winners move.
//! 4. **Pay** -- every remaining cell pays `energy_consumption`; exhausted
//!    cells are removed.
//! 5. **Evaluate** -- a regular [`SimulationEngine::update`] runs.
//!
//! Unknown direction codes mean "stay".

use std::collections::BTreeMap;

use smartlife_cells::{DeathCause, vitals};
use smartlife_types::{Direction, Position, SlotId};
use tracing::debug;

use crate::engine::SimulationEngine;
use crate::error::EngineError;
use crate::tick::TickSummary;

/// One cell's request to move to an empty position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveProposal {
    /// Index of the cell's entry in the move list.
    pub index: usize,
    /// Arena slot of the moving cell.
    pub slot: SlotId,
    /// Pre-move position.
    pub from: Position,
    /// Requested position.
    pub to: Position,
    /// Pre-move energy, used to settle conflicts.
    pub energy: f64,
}

/// The settled outcome of a set of proposals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveResolution {
    /// Proposals that go ahead, one per target, in move-list order.
    pub winners: Vec<MoveProposal>,
    /// Proposals that lost a conflict, in move-list order.
    pub losers: Vec<MoveProposal>,
}

/// Settle proposals that share a target.
///
/// For each target the proposal with strictly the highest energy wins;
/// among equals the one that appears first in `proposals` wins. Everything
/// else for that target loses.
pub fn resolve_conflicts(proposals: &[MoveProposal]) -> MoveResolution {
    let mut by_target: BTreeMap<Position, Vec<&MoveProposal>> = BTreeMap::new();
    for proposal in proposals {
        by_target.entry(proposal.to).or_default().push(proposal);
    }

    let mut resolution = MoveResolution::default();
    for contenders in by_target.into_values() {
        let mut iter = contenders.into_iter();
        let Some(mut best) = iter.next() else {
            continue;
        };
        for candidate in iter {
            if candidate.energy > best.energy {
                resolution.losers.push(*best);
                best = candidate;
            } else {
                resolution.losers.push(*candidate);
            }
        }
        resolution.winners.push(*best);
    }

    resolution.winners.sort_by_key(|p| p.index);
    resolution.losers.sort_by_key(|p| p.index);
    resolution
}

impl SimulationEngine {
    /// Run a movement tick followed by a regular [`update`](Self::update).
    ///
    /// `moves[i]` is the direction code for the i-th live cell in live-cell
    /// order (see [`Direction::from_code`]).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LengthMismatch`] without changing anything if
    /// `moves` does not have one entry per live cell. Returns
    /// [`EngineError::World`] or [`EngineError::Cell`] if an internal
    /// invariant is broken mid-tick.
    pub fn update_with_moves(&mut self, moves: &[i32]) -> Result<TickSummary, EngineError> {
        let slots = self.cells.slot_ids();
        if moves.len() != slots.len() {
            return Err(EngineError::LengthMismatch {
                expected: slots.len(),
                actual: moves.len(),
            });
        }

        let proposals = self.propose(&slots, moves);
        let resolution = resolve_conflicts(&proposals);
        let mut summary = TickSummary::default();

        for loser in &resolution.losers {
            if self.remove_slot(loser.slot, loser.from).is_some() {
                summary.record_death(DeathCause::ConflictLost);
            }
        }
        if !resolution.losers.is_empty() {
            debug!(
                contested = resolution.losers.len(),
                "movement conflicts resolved"
            );
        }

        for winner in &resolution.winners {
            self.grid.vacate(winner.from);
        }
        for winner in &resolution.winners {
            self.grid.occupy(winner.to, winner.slot)?;
            if let Some(cell) = self.cells.get_mut(winner.slot) {
                cell.set_position(winner.to);
            }
        }

        let vitals_config = self.rules.vitals();
        for slot in self.cells.slot_ids() {
            let Some(cell) = self.cells.get_mut(slot) else {
                continue;
            };
            let death = vitals::apply_movement_cost(cell, &vitals_config);
            let position = cell.position();
            if let Some(cause) = death {
                self.remove_slot(slot, position);
                summary.record_death(cause);
            }
        }

        debug!(
            moved = resolution.winners.len(),
            removed = summary.total_deaths(),
            "movement phase complete"
        );

        summary.absorb(self.update()?);
        Ok(summary)
    }

    /// Build proposals against the current, unmodified grid.
    fn propose(&self, slots: &[SlotId], moves: &[i32]) -> Vec<MoveProposal> {
        let mut proposals = Vec::new();
        for (index, (&slot, &code)) in slots.iter().zip(moves).enumerate() {
            let Some(cell) = self.cells.get(slot) else {
                continue;
            };
            let from = cell.position();
            let direction = Direction::from_code(code);
            if direction == Direction::Stay {
                continue;
            }
            let Some(to) = direction.apply(from) else {
                continue;
            };
            if !self.grid.is_valid(to) || self.grid.is_occupied(to) {
                continue;
            }
            proposals.push(MoveProposal {
                index,
                slot,
                from,
                to,
                energy: cell.energy(),
            });
        }
        proposals
    }
}
