//! Cell state, storage, and lifecycle for the Smart Life simulation.
//!
//! This crate holds the logic layer for individual cells -- everything that
//! mutates a single cell's state without looking at the grid. The engine in
//! `smartlife-core` decides *which* cells live, move, or die; this crate
//! decides what that means for a cell's energy and age.
//!
//! # Modules
//!
//! - [`arena`] -- Slot arena owning every live [`Cell`] ([`CellArena`])
//! - [`cell`] -- The [`Cell`] record and its energy/age mutators
//! - [`config`] -- Tunables for the per-tick vital mechanics ([`VitalsConfig`])
//! - [`death`] -- Why a cell left the simulation ([`DeathCause`])
//! - [`error`] -- Error types for cell operations ([`CellError`])
//! - [`vitals`] -- Per-tick maintenance and movement costs

pub mod arena;
pub mod cell;
pub mod config;
pub mod death;
pub mod error;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use arena::CellArena;
pub use cell::Cell;
pub use config::VitalsConfig;
pub use death::DeathCause;
pub use error::CellError;
pub use vitals::VitalTickResult;
