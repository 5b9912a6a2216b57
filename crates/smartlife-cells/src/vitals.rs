//! Vital mechanics applied to cells each tick.
//!
//! Two hooks exist:
//!
//! - [`apply_movement_cost`] runs on a movement tick, after cells have been
//!   relocated. Every cell pays `energy_consumption`.
//! - [`apply_maintenance_tick`] runs at the end of every rule evaluation, on
//!   every cell that survived it:
//!   1. Roll `death_rate`; on a hit the cell dies of attrition
//!   2. Roll `restore_probability`; on a hit add `restore_amount` energy
//!   3. Increment age
//!
//! Energy always flows through [`Cell::set_energy`], so a restore with a
//! negative amount can still kill a cell.

use rand::Rng;

use crate::cell::Cell;
use crate::config::VitalsConfig;
use crate::death::DeathCause;
use crate::error::CellError;

/// Result of applying one maintenance tick to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalTickResult {
    /// If the cell died during this tick, the cause.
    pub death: Option<DeathCause>,
    /// Whether the restore roll succeeded.
    pub restored: bool,
}

/// Roll a Bernoulli trial with probability `p`.
///
/// `p <= 0` never succeeds and `p >= 1` always does. Draws exactly one
/// value from `rng` either way so that seeded runs stay aligned.
fn roll(rng: &mut impl Rng, p: f64) -> bool {
    let draw: f64 = rng.random();
    draw < p
}

/// Charge a cell the per-move energy cost.
///
/// Returns [`DeathCause::Exhaustion`] if the payment drained the cell.
pub fn apply_movement_cost(cell: &mut Cell, config: &VitalsConfig) -> Option<DeathCause> {
    cell.consume_energy(config.energy_consumption);
    if cell.is_alive() {
        None
    } else {
        Some(DeathCause::Exhaustion)
    }
}

/// Apply one maintenance tick to a cell.
///
/// A cell that dies keeps its age unchanged; the caller removes it.
pub fn apply_maintenance_tick(
    cell: &mut Cell,
    config: &VitalsConfig,
    rng: &mut impl Rng,
) -> Result<VitalTickResult, CellError> {
    // 1. Attrition
    if roll(rng, config.death_rate) {
        cell.set_energy(0.0);
        return Ok(VitalTickResult {
            death: Some(DeathCause::Attrition),
            restored: false,
        });
    }

    // 2. Energy restore
    let restored = roll(rng, config.restore_probability);
    if restored {
        cell.restore_energy(config.restore_amount);
        if !cell.is_alive() {
            return Ok(VitalTickResult {
                death: Some(DeathCause::Exhaustion),
                restored,
            });
        }
    }

    // 3. Age
    cell.increase_age()?;

    Ok(VitalTickResult {
        death: None,
        restored,
    })
}
