//! Runner configuration.
//!
//! The runner reads `smartlife.yaml` (or the file named by
//! `SMARTLIFE_CONFIG`). Every field has a default, so an empty or missing
//! file runs one idle episode on the grid size named in the rules file.
//!
//! ```yaml
//! rules_file: config.txt
//! width: 64
//! height: 48
//! initial_fill: 0.25
//! episodes: 3
//! max_steps: 500
//! seed: 42
//! policy: random
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RunnerError;
use crate::policy::MovePolicy;

/// Environment variable that overrides the run config path.
pub const CONFIG_PATH_ENV: &str = "SMARTLIFE_CONFIG";

/// Run config path used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "smartlife.yaml";

/// Parameters of a headless run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// `KEY = VALUE` rules file; created from the default template when
    /// missing.
    #[serde(default = "default_rules_file")]
    pub rules_file: PathBuf,

    /// Grid width. Falls back to `ENV_WIDTH` in the rules file.
    #[serde(default)]
    pub width: Option<i32>,

    /// Grid height. Falls back to `ENV_HEIGHT` in the rules file.
    #[serde(default)]
    pub height: Option<i32>,

    /// Fraction of the grid seeded with live cells at the start of each
    /// episode.
    #[serde(default = "default_initial_fill")]
    pub initial_fill: f64,

    /// Number of episodes to run.
    #[serde(default = "default_episodes")]
    pub episodes: u32,

    /// Step limit per episode.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Seed for the engine and the move policy. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// How cells choose their moves.
    #[serde(default)]
    pub policy: MovePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rules_file: default_rules_file(),
            width: None,
            height: None,
            initial_fill: default_initial_fill(),
            episodes: default_episodes(),
            max_steps: default_max_steps(),
            seed: None,
            policy: MovePolicy::default(),
        }
    }
}

fn default_rules_file() -> PathBuf {
    PathBuf::from("config.txt")
}

const fn default_initial_fill() -> f64 {
    0.2
}

const fn default_episodes() -> u32 {
    1
}

const fn default_max_steps() -> u32 {
    1000
}

impl RunConfig {
    /// Load and validate a run config from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn from_file(path: &Path) -> Result<Self, RunnerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a run config from YAML text. Empty text yields
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the YAML is malformed or a value is out
    /// of range.
    pub fn parse(yaml: &str) -> Result<Self, RunnerError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidRunConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), RunnerError> {
        if !(0.0..=1.0).contains(&self.initial_fill) {
            return Err(RunnerError::InvalidRunConfig {
                reason: format!("initial_fill must be within [0, 1], got {}", self.initial_fill),
            });
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = value
                && v <= 0
            {
                return Err(RunnerError::InvalidRunConfig {
                    reason: format!("{name} must be positive, got {v}"),
                });
            }
        }
        Ok(())
    }

    /// Number of cells to seed on a `width x height` grid.
    pub fn initial_count(&self, width: i32, height: i32) -> usize {
        let area = f64::from(width.max(0)) * f64::from(height.max(0));
        let scaled = (area * self.initial_fill.clamp(0.0, 1.0)).round();
        // Safe: 0 <= scaled <= width * height, which fits in usize.
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let count = scaled as usize;
        count
    }
}
