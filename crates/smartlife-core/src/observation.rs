//! Read-only views of the engine state.
//!
//! Every per-cell listing follows live-cell order, so `cell_states()[i]`,
//! `cells()[i]` and the i-th entry of a move list all refer to the same
//! cell.
//!
//! Live-cell order is arena slot order, not birth order. Freed slots are
//! reused most-recent-first, so a cell born this tick can be listed ahead
//! of cells that have lived for many ticks. Callers that track cells across
//! ticks should key on [`CellSnapshot::id`] rather than on list index.

use smartlife_types::CellSnapshot;
use smartlife_world::{component_density, ratio};

use crate::engine::SimulationEngine;

impl SimulationEngine {
    /// One vision vector per live cell: the flattened, row-major
    /// `(2r+1)^2` occupancy window centred on the cell, where `r` is the
    /// vision radius. The cell's own position reads 1.0 and off-grid
    /// positions read 0.0.
    pub fn cell_states(&self) -> Vec<Vec<f32>> {
        let radius = self.rules.vision_radius;
        self.cells
            .iter()
            .map(|(_, cell)| self.grid.vision_vector(cell.position(), radius))
            .collect()
    }

    /// Copy of the occupancy matrix, `rows[y][x]`.
    pub fn grid_state(&self) -> Vec<Vec<bool>> {
        self.grid.rows()
    }

    /// Snapshot of every live cell.
    pub fn cells(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(|(_, cell)| cell.snapshot()).collect()
    }

    /// Number of occupied grid positions.
    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// `population / (width * height)`.
    pub fn density(&self) -> f64 {
        ratio(self.population(), self.grid.area())
    }

    /// Mean bounding-box density over the 8-connected components of live
    /// cells, or 0.0 for an empty grid.
    pub fn component_density(&self) -> f64 {
        component_density(&self.grid)
    }
}
