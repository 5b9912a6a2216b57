//! Simulation engine and tick cycle for the Smart Life simulation.
//!
//! This crate owns the [`SimulationEngine`]: a bounded grid of cells that
//! evolves under configurable birth/survival thresholds, with per-cell
//! energy and age and an optional agent-directed movement phase.
//!
//! A typical caller constructs the engine from a [`ConfigSource`], seeds it
//! with [`SimulationEngine::initialize_random`] or explicit placements, and
//! then alternates ticks ([`SimulationEngine::update`] or
//! [`SimulationEngine::update_with_moves`]) with observation queries.
//!
//! # Modules
//!
//! - [`config`] -- The [`ConfigSource`] contract and the `KEY = VALUE`
//!   [`KeyValueStore`].
//! - [`engine`] -- Engine construction, placement, seeding, and
//!   position queries.
//! - [`episode`] -- Reward/termination stepping for learning agents.
//! - [`error`] -- [`EngineError`], the engine's error taxonomy.
//! - [`movement`] -- Directed movement with same-destination conflict
//!   resolution.
//! - [`observation`] -- Grid snapshots, vision vectors, population and
//!   density metrics.
//! - [`rules`] -- [`RuleConfig`], the immutable rule parameter bundle.
//! - [`tick`] -- The synchronous rule-evaluation tick.

pub mod config;
pub mod engine;
pub mod episode;
pub mod error;
pub mod movement;
pub mod observation;
pub mod rules;
pub mod tick;

// Re-export primary types at crate root for convenience.
pub use config::{ConfigError, ConfigSource, KeyValueStore};
pub use engine::SimulationEngine;
pub use episode::{EndReason, StepOutcome};
pub use error::EngineError;
pub use movement::{MoveProposal, MoveResolution, resolve_conflicts};
pub use rules::RuleConfig;
pub use tick::TickSummary;
