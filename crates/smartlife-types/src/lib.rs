//! Shared type definitions for the Smart Life simulation.
//!
//! This crate is the leaf of the workspace. Every other crate speaks in
//! terms of these types: grid coordinates, cell identifiers, movement
//! directions and the plain-data cell records handed back to callers.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes for cells and arena slots
//! - [`position`] -- Grid coordinates and the 9-way movement [`Direction`]
//! - [`structs`] -- Plain-data records returned by observation queries

pub mod ids;
pub mod position;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{CellId, SlotId};
pub use position::{Direction, Position};
pub use structs::CellSnapshot;
