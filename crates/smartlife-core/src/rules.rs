//! Rule parameters for the simulation.
//!
//! A [`RuleConfig`] is an immutable bundle read from a [`ConfigSource`] at
//! construction and on every successful reload. It is replaced as a whole,
//! never mutated field by field, so a tick always sees one consistent set
//! of rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use smartlife_cells::VitalsConfig;

use crate::config::{ConfigError, ConfigSource};

/// Configuration keys requested from the [`ConfigSource`].
pub mod keys {
    /// Lower bound of the survival range.
    pub const LIVE_MIN: &str = "LIVE_MIN";
    /// Upper bound of the survival range.
    pub const LIVE_MAX: &str = "LIVE_MAX";
    /// Lower bound of the birth range.
    pub const BREED_MIN: &str = "BREED_MIN";
    /// Upper bound of the birth range.
    pub const BREED_MAX: &str = "BREED_MAX";
    /// Vision window radius.
    pub const VISION: &str = "VISION";
    /// Energy paid per movement tick.
    pub const ENERGY_CONSUMPTION: &str = "ENERGY_CONSUMPTION";
    /// Per-tick restore probability.
    pub const RESTORE_PROB: &str = "RESTORE_PROB";
    /// Energy added by a successful restore.
    pub const RESTORE_VALUE: &str = "RESTORE_VALUE";
    /// Per-tick probability of random death.
    pub const DEATH_RATE: &str = "DEATH_RATE";
}

/// The rule parameter bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// A live cell survives with at least this many live neighbours.
    pub survival_min: i32,
    /// A live cell survives with at most this many live neighbours.
    pub survival_max: i32,
    /// An empty position is born with at least this many live neighbours.
    pub birth_min: i32,
    /// An empty position is born with at most this many live neighbours.
    pub birth_max: i32,
    /// Radius of the square observation window.
    pub vision_radius: i32,
    /// Energy every cell pays on a movement tick.
    pub energy_consumption: f64,
    /// Per-tick probability of an energy restore.
    pub restore_probability: f64,
    /// Energy added by a restore.
    pub restore_amount: f64,
    /// Per-tick probability of attrition.
    pub death_rate: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_min: 3,
            birth_max: 3,
            vision_radius: 5,
            energy_consumption: 0.1,
            restore_probability: 0.1,
            restore_amount: 0.2,
            death_rate: 0.0,
        }
    }
}

impl RuleConfig {
    /// Read every rule key from `source`, falling back to the defaults, and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        let d = Self::default();
        let rules = Self {
            survival_min: source.get_int(keys::LIVE_MIN, d.survival_min),
            survival_max: source.get_int(keys::LIVE_MAX, d.survival_max),
            birth_min: source.get_int(keys::BREED_MIN, d.birth_min),
            birth_max: source.get_int(keys::BREED_MAX, d.birth_max),
            vision_radius: source.get_int(keys::VISION, d.vision_radius),
            energy_consumption: source.get_double(keys::ENERGY_CONSUMPTION, d.energy_consumption),
            restore_probability: source.get_double(keys::RESTORE_PROB, d.restore_probability),
            restore_amount: source.get_double(keys::RESTORE_VALUE, d.restore_amount),
            death_rate: source.get_double(keys::DEATH_RATE, d.death_rate),
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Check that every value is usable.
    ///
    /// An empty range (`min > max`) is accepted; it simply never matches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vision_radius < 0 {
            return Err(ConfigError::Invalid {
                key: keys::VISION,
                reason: format!("radius must be non-negative, got {}", self.vision_radius),
            });
        }
        let reals = [
            (keys::ENERGY_CONSUMPTION, self.energy_consumption),
            (keys::RESTORE_PROB, self.restore_probability),
            (keys::RESTORE_VALUE, self.restore_amount),
            (keys::DEATH_RATE, self.death_rate),
        ];
        for (key, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        for (key, p) in [
            (keys::RESTORE_PROB, self.restore_probability),
            (keys::DEATH_RATE, self.death_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("probability must be within [0, 1], got {p}"),
                });
            }
        }
        Ok(())
    }

    /// Whether an empty position with `neighbors` live neighbours comes alive.
    pub fn is_born(&self, neighbors: u8) -> bool {
        (self.birth_min..=self.birth_max).contains(&i32::from(neighbors))
    }

    /// The subset of rules the per-cell vital mechanics need.
    pub const fn vitals(&self) -> VitalsConfig {
        VitalsConfig {
            energy_consumption: self.energy_consumption,
            restore_probability: self.restore_probability,
            restore_amount: self.restore_amount,
            death_rate: self.death_rate,
        }
    }

    /// Length of one vision vector, `(2 * vision_radius + 1)^2`.
    pub fn window_len(&self) -> usize {
        let side = usize::try_from(self.vision_radius)
            .unwrap_or(0)
            .saturating_mul(2)
            .saturating_add(1);
        side.saturating_mul(side)
    }
}

impl fmt::Display for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {}", keys::LIVE_MIN, self.survival_min)?;
        writeln!(f, "{} = {}", keys::LIVE_MAX, self.survival_max)?;
        writeln!(f, "{} = {}", keys::BREED_MIN, self.birth_min)?;
        writeln!(f, "{} = {}", keys::BREED_MAX, self.birth_max)?;
        writeln!(f, "{} = {}", keys::VISION, self.vision_radius)?;
        writeln!(f, "{} = {}", keys::ENERGY_CONSUMPTION, self.energy_consumption)?;
        writeln!(f, "{} = {}", keys::RESTORE_PROB, self.restore_probability)?;
        writeln!(f, "{} = {}", keys::RESTORE_VALUE, self.restore_amount)?;
        writeln!(f, "{} = {}", keys::DEATH_RATE, self.death_rate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::KeyValueStore;

    #[test]
    fn empty_source_yields_defaults() {
        let rules = RuleConfig::from_source(&KeyValueStore::in_memory()).unwrap();
        assert_eq!(rules, RuleConfig::default());
        assert_eq!(rules.death_rate, 0.0);
    }

    #[test]
    fn source_values_override_defaults() {
        let store = KeyValueStore::parse("LIVE_MIN = 5\nVISION = 1\nDEATH_RATE = 0.5\n").unwrap();
        let rules = RuleConfig::from_source(&store).unwrap();
        assert_eq!(rules.survival_min, 5);
        assert_eq!(rules.vision_radius, 1);
        assert_eq!(rules.death_rate, 0.5);
        assert_eq!(rules.survival_max, 3);
    }

    #[test]
    fn classic_thresholds() {
        let rules = RuleConfig::default();
        assert_eq!((rules.survival_min, rules.survival_max), (2, 3));
        assert!(rules.is_born(3));
        assert!(!rules.is_born(2));
    }

    #[test]
    fn empty_range_is_valid_and_never_matches() {
        let rules = RuleConfig {
            birth_min: 5,
            birth_max: 4,
            ..RuleConfig::default()
        };
        assert!(rules.validate().is_ok());
        assert!((0..=8).all(|n| !rules.is_born(n)));
    }

    #[test]
    fn rejects_negative_vision() {
        let rules = RuleConfig {
            vision_radius: -1,
            ..RuleConfig::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::Invalid { key: keys::VISION, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let rules = RuleConfig {
            death_rate: 1.5,
            ..RuleConfig::default()
        };
        assert!(rules.validate().is_err());
        let rules = RuleConfig {
            restore_amount: f64::NAN,
            ..RuleConfig::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn window_len_matches_radius() {
        assert_eq!(RuleConfig::default().window_len(), 121);
        let rules = RuleConfig {
            vision_radius: 0,
            ..RuleConfig::default()
        };
        assert_eq!(rules.window_len(), 1);
    }

    #[test]
    fn display_lists_every_key() {
        let text = RuleConfig::default().to_string();
        assert!(text.starts_with("LIVE_MIN = 2\n"));
        assert!(text.contains("RESTORE_VALUE = 0.2"));
        assert_eq!(text.lines().count(), 9);
    }
}
