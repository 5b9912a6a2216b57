//! Tunables for the per-tick vital mechanics.
//!
//! The engine derives a [`VitalsConfig`] from its rule configuration
//! (`ENERGY_CONSUMPTION`, `RESTORE_PROB`, `RESTORE_VALUE`, `DEATH_RATE`)
//! and passes it into the functions in [`crate::vitals`].

use serde::{Deserialize, Serialize};

/// Energy and mortality parameters applied to every live cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// Energy paid by every cell on a movement tick (default: 0.1).
    pub energy_consumption: f64,

    /// Chance per tick that a cell regains energy (default: 0.1).
    pub restore_probability: f64,

    /// Energy regained on a successful restore roll (default: 0.2).
    pub restore_amount: f64,

    /// Chance per tick that a cell dies regardless of its neighbours
    /// (default: 0.0).
    pub death_rate: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            energy_consumption: 0.1,
            restore_probability: 0.1,
            restore_amount: 0.2,
            death_rate: 0.0,
        }
    }
}

impl VitalsConfig {
    /// A configuration with no randomness and no movement cost.
    ///
    /// Useful wherever a tick must be fully determined by the grid.
    pub const fn inert() -> Self {
        Self {
            energy_consumption: 0.0,
            restore_probability: 0.0,
            restore_amount: 0.0,
            death_rate: 0.0,
        }
    }
}
