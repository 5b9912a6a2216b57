//! Why a cell left the simulation.
//!
//! Dead cells are removed from the arena and the grid immediately; the
//! cause is kept only for tick summaries and logging.

use serde::{Deserialize, Serialize};

/// The cause of a cell's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fewer live neighbours than the survival minimum.
    Isolation,
    /// More live neighbours than the survival maximum.
    Overcrowding,
    /// Energy reached zero.
    Exhaustion,
    /// Random death roll (`DEATH_RATE`).
    Attrition,
    /// Lost a same-destination movement conflict.
    ConflictLost,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Isolation => write!(f, "isolation"),
            Self::Overcrowding => write!(f, "overcrowding"),
            Self::Exhaustion => write!(f, "exhaustion"),
            Self::Attrition => write!(f, "attrition"),
            Self::ConflictLost => write!(f, "conflict_lost"),
        }
    }
}

/// Classify a rule-based death from the neighbour count that caused it.
///
/// Returns `None` when `neighbors` is inside `[survival_min, survival_max]`.
pub fn rule_death(neighbors: u8, survival_min: i32, survival_max: i32) -> Option<DeathCause> {
    let n = i32::from(neighbors);
    if n < survival_min {
        Some(DeathCause::Isolation)
    } else if n > survival_max {
        Some(DeathCause::Overcrowding)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survivor_has_no_cause() {
        assert_eq!(rule_death(2, 2, 3), None);
        assert_eq!(rule_death(3, 2, 3), None);
    }

    #[test]
    fn too_few_is_isolation() {
        assert_eq!(rule_death(1, 2, 3), Some(DeathCause::Isolation));
    }

    #[test]
    fn too_many_is_overcrowding() {
        assert_eq!(rule_death(4, 2, 3), Some(DeathCause::Overcrowding));
    }

    #[test]
    fn empty_range_reports_isolation_first() {
        assert_eq!(rule_death(3, 5, 1), Some(DeathCause::Isolation));
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(DeathCause::ConflictLost.to_string(), "conflict_lost");
    }
}
