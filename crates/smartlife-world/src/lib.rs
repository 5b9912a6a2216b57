//! The spatial layer of the Smart Life simulation.
//!
//! This crate models the bounded 2D grid the cells live on: which positions
//! exist, which are occupied and by whom, what a cell can see, and how live
//! positions cluster into connected components.
//!
//! # Modules
//!
//! - [`components`] -- 8-connected component labelling and the
//!   bounding-box density metric.
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`Grid`], the row-major occupancy matrix. All indexing goes
//!   through one helper so `x` is always bounded by width and `y` by height.
//! - [`neighborhood`] -- Moore neighbour counts, square windows, vision
//!   vectors, and empty-neighbour queries.

pub mod components;
pub mod error;
pub mod grid;
pub mod neighborhood;

// Re-export primary types at crate root.
pub use components::{Component, component_density, connected_components, ratio};
pub use error::WorldError;
pub use grid::Grid;
pub use neighborhood::{MOORE_OFFSETS, window};
