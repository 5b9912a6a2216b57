//! The rule configuration collaborator.
//!
//! The engine never reads files itself. It asks a [`ConfigSource`] for typed
//! values by key, each with a caller-supplied default, and asks it to
//! [`reload`](ConfigSource::reload) when the caller wants fresh rules.
//!
//! [`KeyValueStore`] is the stock implementation: a flat text file of
//! `KEY = VALUE` lines.
//!
//! ```text
//! # comment
//! LIVE_MIN = 2
//! DEATH_RATE=0.1
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Keys are
//! case-sensitive. Values are kept as text and parsed on each typed read; a
//! value that does not parse as the requested type reads as the default.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::rules::{RuleConfig, keys};

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("failed to access config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A non-comment line is not of the form `KEY = VALUE`.
    #[error("line {line}: expected `KEY = VALUE`, found {content:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// The store has no backing file to read from or write to.
    #[error("config store has no backing file")]
    NoBackingFile,

    /// A value is out of its permitted range.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// The configuration key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A source of typed configuration values.
///
/// Implementations must answer every lookup: a missing or unreadable key
/// yields `default`.
pub trait ConfigSource: fmt::Debug {
    /// The integer stored under `key`, or `default`.
    fn get_int(&self, key: &str, default: i32) -> i32;

    /// The real number stored under `key`, or `default`.
    fn get_double(&self, key: &str, default: f64) -> f64;

    /// Re-read the underlying storage.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the storage cannot be read or parsed. The
    /// previously loaded values must remain in effect in that case.
    fn reload(&mut self) -> Result<(), ConfigError>;
}

/// The commented configuration file written when none exists.
pub const DEFAULT_TEMPLATE: &str = "\
# Smart Life configuration
#
# Survival: a live cell stays alive with LIVE_MIN..=LIVE_MAX live neighbours.
LIVE_MIN = 2
LIVE_MAX = 3

# Birth: an empty position comes alive with BREED_MIN..=BREED_MAX live neighbours.
BREED_MIN = 3
BREED_MAX = 3

# Radius of the square window each cell observes.
VISION = 5

# Per-tick probability that a cell dies regardless of neighbours.
DEATH_RATE = 0.1

# Energy paid by every cell on a movement tick.
ENERGY_CONSUMPTION = 0.1

# Per-tick probability and amount of energy restoration.
RESTORE_PROB = 0.1
RESTORE_VALUE = 0.2

# Grid dimensions.
ENV_WIDTH = 100
ENV_HEIGHT = 100
";

/// A flat `KEY = VALUE` configuration store, optionally backed by a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueStore {
    /// Backing file, if any.
    path: Option<PathBuf>,
    /// Raw values, ordered by key.
    entries: BTreeMap<String, String>,
}

impl KeyValueStore {
    /// An empty store with no backing file. Every lookup yields its default
    /// until values are set.
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    /// Parse `KEY = VALUE` text into an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for the first malformed line.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            path: None,
            entries: parse_entries(text)?,
        })
    }

    /// Load a store from `path`. The store remembers the path for
    /// [`reload`](ConfigSource::reload) and [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its content is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let entries = parse_entries(&text)?;
        info!(path = %path.display(), keys = entries.len(), "loaded configuration");
        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Load `path`, first writing [`DEFAULT_TEMPLATE`] there if no file
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the template cannot be written or the file
    /// cannot be loaded.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::create_default(path)?;
        Self::load(path)
    }

    /// Write [`DEFAULT_TEMPLATE`] to `path` unless a file already exists.
    ///
    /// Returns whether a file was written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written.
    pub fn create_default(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, DEFAULT_TEMPLATE)?;
        info!(path = %path.display(), "wrote default configuration");
        Ok(true)
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the store back to its backing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoBackingFile`] for an in-memory store, or
    /// [`ConfigError::Io`] if the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoBackingFile)?;
        self.save_to(path)
    }

    /// Write the store to `path` in key order. Comments are not preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the write fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_string())?;
        debug!(path = %path.display(), keys = self.entries.len(), "saved configuration");
        Ok(())
    }

    /// The raw text stored under `key`, or `default`.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.entries
            .get(key)
            .map_or_else(|| String::from(default), Clone::clone)
    }

    /// Store an integer under `key`.
    pub fn set_int(&mut self, key: &str, value: i32) {
        self.entries.insert(String::from(key), value.to_string());
    }

    /// Store a real number under `key`.
    pub fn set_double(&mut self, key: &str, value: f64) {
        self.entries.insert(String::from(key), value.to_string());
    }

    /// Store raw text under `key`.
    pub fn set_string(&mut self, key: &str, value: &str) {
        self.entries.insert(String::from(key), String::from(value));
    }

    /// Whether `key` has a value.
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parse the value under `key` as `T`, warning when it exists but does
    /// not parse.
    fn typed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.entries.get(key)?;
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            warn!(key, value = %raw, "unparsable config value, using default");
        }
        parsed
    }
}

impl ConfigSource for KeyValueStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.typed(key).unwrap_or(default)
    }

    fn get_double(&self, key: &str, default: f64) -> f64 {
        self.typed(key).unwrap_or(default)
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let text = std::fs::read_to_string(path)?;
        let entries = parse_entries(&text)?;
        info!(path = %path.display(), keys = entries.len(), "reloaded configuration");
        self.entries = entries;
        Ok(())
    }
}

impl From<&RuleConfig> for KeyValueStore {
    fn from(rules: &RuleConfig) -> Self {
        let mut store = Self::in_memory();
        store.set_int(keys::LIVE_MIN, rules.survival_min);
        store.set_int(keys::LIVE_MAX, rules.survival_max);
        store.set_int(keys::BREED_MIN, rules.birth_min);
        store.set_int(keys::BREED_MAX, rules.birth_max);
        store.set_int(keys::VISION, rules.vision_radius);
        store.set_double(keys::ENERGY_CONSUMPTION, rules.energy_consumption);
        store.set_double(keys::RESTORE_PROB, rules.restore_probability);
        store.set_double(keys::RESTORE_VALUE, rules.restore_amount);
        store.set_double(keys::DEATH_RATE, rules.death_rate);
        store
    }
}

impl fmt::Display for KeyValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

/// Parse `KEY = VALUE` lines into an ordered map. Later duplicates win.
fn parse_entries(text: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut entries = BTreeMap::new();
    for (number, raw) in (1_usize..).zip(text.lines()) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = line
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| !key.is_empty());
        let Some((key, value)) = parsed else {
            return Err(ConfigError::Parse {
                line: number,
                content: String::from(line),
            });
        };
        entries.insert(String::from(key), String::from(value));
    }
    Ok(entries)
}
