//! Move policies for headless runs.

use rand::Rng;
use serde::Deserialize;
use smartlife_core::episode::ACTION_SIZE;

/// How cells choose their moves each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// No movement phase; every step is a plain rule tick.
    #[default]
    #[serde(rename = "none")]
    Idle,
    /// Every cell picks one of the nine move codes uniformly at random.
    Random,
}

impl MovePolicy {
    /// Moves for `cells` live cells, or `None` for a plain tick.
    pub fn choose(self, cells: usize, rng: &mut impl Rng) -> Option<Vec<i32>> {
        match self {
            Self::Idle => None,
            Self::Random => {
                let upper = i32::try_from(ACTION_SIZE).unwrap_or(i32::MAX);
                Some((0..cells).map(|_| rng.random_range(0..upper)).collect())
            }
        }
    }
}

impl core::fmt::Display for MovePolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Idle => write!(f, "none"),
            Self::Random => write!(f, "random"),
        }
    }
}
